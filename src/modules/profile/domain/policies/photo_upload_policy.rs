use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhotoUploadError {
    #[error("File is empty")]
    Empty,

    #[error("File is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}

#[derive(Debug, Clone)]
pub struct PhotoUploadPolicy {
    pub max_file_size_bytes: u64,
    pub allowed_mime_types: &'static [&'static str],
}

impl Default for PhotoUploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_mime_types: Self::DEFAULT_ALLOWED_MIME_TYPES,
        }
    }
}

impl PhotoUploadPolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024; // 2MB
    /// Largest photo whose base64 data URL still fits a 1 MiB Firestore document.
    pub const REMOTE_DOCUMENT_MAX_FILE_SIZE_BYTES: u64 = 700 * 1024;
    pub const DEFAULT_ALLOWED_MIME_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/png", "image/webp", "image/gif"];

    /// Reads `PHOTO_MAX_BYTES`, falling back to 2MB when unset or unparsable.
    pub fn from_env() -> Self {
        let max_file_size_bytes = std::env::var("PHOTO_MAX_BYTES")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(Self::DEFAULT_MAX_FILE_SIZE_BYTES);

        Self {
            max_file_size_bytes,
            ..Self::default()
        }
    }

    /// The same policy with the size limit lowered to `max` if it is above it.
    pub fn capped_at(self, max: u64) -> Self {
        Self {
            max_file_size_bytes: self.max_file_size_bytes.min(max),
            ..self
        }
    }

    /// Strips parameters (`image/png; charset=...`) and lowercases the essence.
    pub fn normalize_mime(content_type: &str) -> String {
        content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    pub fn check_type(&self, content_type: &str) -> Result<String, PhotoUploadError> {
        let mime = Self::normalize_mime(content_type);
        if self.allowed_mime_types.contains(&mime.as_str()) {
            Ok(mime)
        } else {
            Err(PhotoUploadError::UnsupportedType(mime))
        }
    }

    pub fn check_size(&self, size: u64) -> Result<(), PhotoUploadError> {
        if size == 0 {
            return Err(PhotoUploadError::Empty);
        }
        if size > self.max_file_size_bytes {
            return Err(PhotoUploadError::TooLarge {
                size,
                max: self.max_file_size_bytes,
            });
        }
        Ok(())
    }

    /// Validates the upload and renders it as an inline `data:` URL.
    pub fn to_data_url(&self, content_type: &str, bytes: &[u8]) -> Result<String, PhotoUploadError> {
        let mime = self.check_type(content_type)?;
        self.check_size(bytes.len() as u64)?;
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }
}
