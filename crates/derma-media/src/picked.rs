use std::fs;
use std::path::Path;

use derma_config::{DEFAULT_MAX_UPLOAD_BYTES, UploadConfig};
use derma_core::ImageMime;

use crate::error::{MediaError, ValidationError};

const UNKNOWN_MIME: &str = "application/octet-stream";

/// A file chosen by the user, before validation.
#[derive(Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    /// MIME type as declared by whatever picked the file.
    pub mime: String,
    pub data: Vec<u8>,
}

impl PickedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Read a file from disk.
    ///
    /// The MIME type comes from the extension, falling back to sniffing the
    /// content. Files larger than `max_bytes` (capped at 10 MiB) are refused
    /// from metadata without reading them.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Validation` for oversize files and
    /// `MediaError::Io` if the file cannot be read.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self, MediaError> {
        let max_bytes = max_bytes.min(DEFAULT_MAX_UPLOAD_BYTES);
        let size = fs::metadata(path)?.len();
        if size > max_bytes {
            return Err(ValidationError::TooLarge {
                size,
                max: max_bytes,
            }
            .into());
        }

        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime = path
            .extension()
            .and_then(|ext| ImageMime::from_extension(&ext.to_string_lossy()))
            .or_else(|| sniff(&data))
            .map_or(UNKNOWN_MIME, ImageMime::as_str);

        Ok(Self::new(name, mime, data))
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.data.len()).unwrap_or(u64::MAX)
    }

    /// Check type and size against the upload constraints.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] that applies.
    pub fn validate(&self, upload: &UploadConfig) -> Result<ImageMime, ValidationError> {
        let unsupported = || ValidationError::UnsupportedType {
            mime: self.mime.clone(),
        };
        if !upload.accepts(&self.mime) {
            return Err(unsupported());
        }
        let mime = ImageMime::from_mime(&self.mime).ok_or_else(unsupported)?;

        if self.data.is_empty() {
            return Err(ValidationError::Empty);
        }
        let size = self.size();
        let max = upload.ceiling();
        if size > max {
            return Err(ValidationError::TooLarge { size, max });
        }
        Ok(mime)
    }
}

impl std::fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}

fn sniff(data: &[u8]) -> Option<ImageMime> {
    match image::guess_format(data).ok()? {
        image::ImageFormat::Jpeg => Some(ImageMime::Jpeg),
        image::ImageFormat::Png => Some(ImageMime::Png),
        image::ImageFormat::WebP => Some(ImageMime::Webp),
        _ => None,
    }
}
