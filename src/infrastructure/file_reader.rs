use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{LoadedFile, PickError, Preview, SelectedFile};

pub struct ImageReader;

impl ImageReader {
    /// Reads the file at `path` and decodes its preview.
    ///
    /// Bytes that are not a decodable image still produce a selection; only
    /// I/O failures are errors.
    pub fn read_selected(path: &Path) -> Result<LoadedFile, PickError> {
        let path = expand_home(path);
        if path.is_dir() {
            return Err(PickError::NotAFile { path: path.display().to_string() });
        }
        let bytes = fs::read(&path).map_err(|e| PickError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let preview = Preview::from_bytes(&bytes);
        Ok(LoadedFile {
            file: SelectedFile::new(path, bytes),
            preview,
        })
    }
}

/// Replaces a leading `~` with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use tempfile::tempdir;

    #[test]
    fn test_read_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("word.png");
        ImageBuffer::from_pixel(20, 10, Rgb([10u8, 20, 30]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let loaded = ImageReader::read_selected(&path).unwrap();
        assert_eq!(loaded.file.file_name, "word.png");
        assert_eq!(loaded.file.content_type, "image/png");
        assert!(!loaded.file.is_empty());
        match loaded.preview {
            Preview::Image(image) => {
                assert_eq!((image.width, image.height), (20, 10));
                assert_eq!(image.pixel(5, 5), [10, 20, 30]);
            }
            other => panic!("expected an image preview, got {:?}", other),
        }
    }

    #[test]
    fn test_read_non_image_is_still_selected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not an image").unwrap();

        let loaded = ImageReader::read_selected(&path).unwrap();
        assert_eq!(loaded.file.bytes, b"not an image");
        assert!(matches!(loaded.preview, Preview::Undecodable(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = ImageReader::read_selected(&path).unwrap_err();
        match err {
            PickError::Read { path: reported, .. } => assert!(reported.ends_with("missing.png")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_directory() {
        let dir = tempdir().unwrap();
        let err = ImageReader::read_selected(dir.path()).unwrap_err();
        assert!(matches!(err, PickError::NotAFile { .. }));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/abs/a.png")), PathBuf::from("/abs/a.png"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/a.png")), home.join("a.png"));
        }
    }
}
