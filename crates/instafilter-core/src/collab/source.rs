use super::ImageSource;
use crate::decode::decode_image;
use crate::ImageData;

/// An [`ImageSource`] over encoded bytes already handed over by the picker.
///
/// Each buffer is yielded once. Undecodable bytes are logged and treated like
/// a cancelled pick.
#[derive(Debug, Default)]
pub struct BytesSource {
    pending: Option<Vec<u8>>,
}

impl BytesSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            pending: Some(bytes),
        }
    }

    pub fn is_spent(&self) -> bool {
        self.pending.is_none()
    }
}

impl ImageSource for BytesSource {
    fn pick(&mut self) -> Option<ImageData> {
        let bytes = self.pending.take()?;
        match decode_image(&bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Ignoring picked image: {e}");
                None
            }
        }
    }
}
