//! InstaFilter Core - photo filter session and image filter engine
//!
//! This crate holds everything behind the filter screen: the session that
//! tracks the selected filter and slider values, the raster filters, and the
//! codecs used to load picked photos and save results.
//!
//! # Usage
//!
//! ```ignore
//! use instafilter_core::{FilterKind, FilterSession, SessionConfig};
//!
//! let mut session = FilterSession::new(SessionConfig::default());
//! session.load_source(Some(photo));
//! session.select_filter(FilterKind::Vignette);
//! session.set_intensity(0.8);
//! let preview = session.derived();
//! ```

pub mod collab;
pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
mod image_data;
pub mod session;

pub use collab::{BytesSource, FileSink, ImageSink, ImageSource, SaveCallbacks, SaveError};
pub use config::{ExportSettings, RadiusMapping, SessionConfig, SwitchPolicy};
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_jpeg, encode_png, EncodeError, ExportFormat};
pub use filter::{FilterEngine, FilterInputs, FilterKind, FilterSpec, ParameterKey, RasterEngine};
pub use image_data::ImageData;
pub use session::{FilterSession, FilterState, SaveOutcome, SessionPhase, SliderVisibility};
