use std::fs;
use std::path::{Path, PathBuf};

use super::{ImageSink, SaveCallbacks, SaveError};
use crate::config::ExportSettings;
use crate::encode::encode;
use crate::ImageData;

/// Writes saved images to a file.
///
/// The extension is taken from the export format, replacing any the caller
/// gave. Completes synchronously.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    settings: ExportSettings,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, settings: ExportSettings) -> Self {
        let mut path = path.into();
        path.set_extension(settings.format.extension());
        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, image: &ImageData) -> Result<(), SaveError> {
        let bytes = encode(image, self.settings.format, self.settings.quality)?;
        fs::write(&self.path, bytes)?;
        log::info!("Saved {}x{} image to {}", image.width, image.height, self.path.display());
        Ok(())
    }
}

impl ImageSink for FileSink {
    fn persist(&mut self, image: ImageData, callbacks: SaveCallbacks) {
        callbacks.finish(self.write(&image));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use crate::encode::ExportFormat;
    use std::cell::Cell;
    use std::rc::Rc;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("instafilter-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_writes_png() {
        let settings = ExportSettings {
            format: ExportFormat::Png,
            quality: 90,
        };
        let mut sink = FileSink::new(temp_path("out.jpg"), settings);
        assert_eq!(sink.path().extension().unwrap(), "png");

        let img = ImageData::filled(5, 4, [9, 8, 7]);
        let ok = Rc::new(Cell::new(false));
        let flag = ok.clone();
        sink.persist(img.clone(), SaveCallbacks::new(move || flag.set(true), |_| {}));
        assert!(ok.get());

        let written = fs::read(sink.path()).unwrap();
        assert_eq!(decode_image(&written).unwrap(), img);
        fs::remove_file(sink.path()).unwrap();
    }

    #[test]
    fn test_missing_directory_reports_io_error() {
        let path = temp_path("no-such-dir").join("out");
        let mut sink = FileSink::new(path, ExportSettings::default());
        let failed = Rc::new(Cell::new(false));
        let flag = failed.clone();
        sink.persist(
            ImageData::filled(2, 2, [0, 0, 0]),
            SaveCallbacks::new(|| {}, move |e| flag.set(matches!(e, SaveError::Io(_)))),
        );
        assert!(failed.get());
    }
}
