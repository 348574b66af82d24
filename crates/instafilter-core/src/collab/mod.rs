//! Collaborators at the edge of the session.
//!
//! - [`ImageSource`] supplies a photo when the user picks one.
//! - [`ImageSink`] persists the derived image and reports back through
//!   [`SaveCallbacks`].
//!
//! Platform code implements these; [`BytesSource`] and [`FileSink`] cover the
//! byte-buffer and file-system cases.

mod file;
mod source;

use thiserror::Error;

use crate::encode::EncodeError;
use crate::ImageData;

pub use file::FileSink;
pub use source::BytesSource;

/// Supplies an image in response to a pick gesture.
pub trait ImageSource {
    /// Returns `None` when the user cancelled or nothing usable was picked.
    fn pick(&mut self) -> Option<ImageData>;
}

/// Why a save failed. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Could not encode image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Could not write image: {0}")]
    Io(#[from] std::io::Error),

    /// The platform refused the write (e.g. permission denied).
    #[error("{0}")]
    Rejected(String),
}

/// Terminal callbacks for a save. Exactly one of them is invoked.
pub struct SaveCallbacks {
    on_success: Box<dyn FnOnce()>,
    on_error: Box<dyn FnOnce(SaveError)>,
}

impl SaveCallbacks {
    pub fn new(on_success: impl FnOnce() + 'static, on_error: impl FnOnce(SaveError) + 'static) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }

    /// Callbacks that do nothing.
    pub fn ignore() -> Self {
        Self::new(|| {}, |_| {})
    }

    pub fn succeed(self) {
        (self.on_success)();
    }

    pub fn fail(self, error: SaveError) {
        log::warn!("Saving image failed: {error}");
        (self.on_error)(error);
    }

    /// Dispatch on a result.
    pub fn finish(self, result: Result<(), SaveError>) {
        match result {
            Ok(()) => self.succeed(),
            Err(e) => self.fail(e),
        }
    }
}

impl std::fmt::Debug for SaveCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveCallbacks").finish_non_exhaustive()
    }
}

/// Persists an image.
///
/// Implementations may finish asynchronously; the caller does not wait and
/// only learns the outcome through `callbacks`.
pub trait ImageSink {
    fn persist(&mut self, image: ImageData, callbacks: SaveCallbacks);
}
