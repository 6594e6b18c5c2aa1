use std::io::Write;
use std::path::Path;

use derma_core::ImageBlob;
use tempfile::TempPath;

/// A locally resolvable copy of the current image, for display.
///
/// Backed by a temp file that is deleted when the preview is released or
/// dropped.
#[derive(Debug)]
pub struct Preview {
    path: TempPath,
    url: String,
}

impl Preview {
    /// Write `blob` to a fresh temp file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the temp file cannot be written.
    pub fn create(blob: &ImageBlob) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("derma-preview-")
            .suffix(&format!(".{}", blob.mime.extension()))
            .tempfile()?;
        file.write_all(&blob.data)?;
        file.flush()?;

        let path = file.into_temp_path();
        let url = format!("file://{}", path.display());
        tracing::debug!(%url, "preview created");
        Ok(Self { path, url })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Delete the backing file now rather than at drop.
    pub fn release(self) {
        let url = self.url;
        if let Err(error) = self.path.close() {
            tracing::warn!(%url, %error, "failed to remove preview file");
        } else {
            tracing::debug!(%url, "preview released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_core::ImageMime;

    #[test]
    fn preview_file_lives_until_released() {
        let blob = ImageBlob::new(vec![1, 2, 3], ImageMime::Png, "face.png");
        let preview = Preview::create(&blob).unwrap();
        let path = preview.path().to_path_buf();

        assert!(preview.url().starts_with("file://"));
        assert!(preview.url().ends_with(".png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        preview.release();
        assert!(!path.exists());
    }

    #[test]
    fn dropping_a_preview_removes_the_file() {
        let blob = ImageBlob::new(vec![9], ImageMime::Jpeg, "face.jpg");
        let path = Preview::create(&blob).unwrap().path().to_path_buf();
        assert!(!path.exists());
    }
}
