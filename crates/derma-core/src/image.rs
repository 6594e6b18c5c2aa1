//! Encoded image bytes as they travel from acquisition to submission.

use std::fmt;

use crate::enums::ImageMime;

/// An encoded image plus the metadata the upload needs.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// Encoded bytes (JPEG/PNG/WebP).
    pub data: Vec<u8>,
    pub mime: ImageMime,
    /// File name reported in the multipart upload.
    pub file_name: String,
}

impl ImageBlob {
    #[must_use]
    pub fn new(data: Vec<u8>, mime: ImageMime, file_name: impl Into<String>) -> Self {
        Self {
            data,
            mime,
            file_name: file_name.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Raw bytes are never useful in logs.
impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}
