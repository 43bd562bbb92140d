//! Avatar upload preview.
//!
//! # Responsibility
//! - Turn a selected image file into a displayable data URL.
//! - Keep the large and small avatar in sync.
//!
//! # Invariants
//! - Both avatar slots always show the same source.
//! - A failed read leaves the previous avatar in place.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::path::Path;

/// Upper bound for avatar files read by [`FsAvatarReader`].
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// File-to-data-URL collaborator.
pub trait AvatarReader {
    fn read_data_url(&self, path: &Path) -> impl Future<Output = Result<String, AvatarError>>;
}

#[derive(Debug)]
pub enum AvatarError {
    Io(std::io::Error),
    Empty,
    TooLarge { size: u64, limit: u64 },
    UnsupportedType(String),
}

impl Display for AvatarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read avatar file: {err}"),
            Self::Empty => write!(f, "avatar file is empty"),
            Self::TooLarge { size, limit } => {
                write!(f, "avatar file is {size} bytes; limit is {limit}")
            }
            Self::UnsupportedType(ext) => write!(f, "unsupported avatar image type: `{ext}`"),
        }
    }
}

impl Error for AvatarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AvatarError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Reads avatar files from the local filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsAvatarReader {
    max_bytes: u64,
}

impl Default for FsAvatarReader {
    fn default() -> Self {
        Self {
            max_bytes: MAX_AVATAR_BYTES,
        }
    }
}

impl FsAvatarReader {
    pub fn with_limit(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl AvatarReader for FsAvatarReader {
    async fn read_data_url(&self, path: &Path) -> Result<String, AvatarError> {
        let mime = image_mime_for(path)?;
        let size = std::fs::metadata(path)?.len();
        if size == 0 {
            return Err(AvatarError::Empty);
        }
        if size > self.max_bytes {
            return Err(AvatarError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        let bytes = std::fs::read(path)?;
        Ok(data_url(mime, &bytes))
    }
}

/// Builds a base64 `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Maps an image file extension to its MIME type.
pub fn image_mime_for(path: &Path) -> Result<&'static str, AvatarError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(AvatarError::UnsupportedType(ext)),
    }
}

/// Image source shared by the profile avatar and the topbar button avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarState {
    source: Option<String>,
}

impl AvatarState {
    /// Source for the large profile avatar.
    pub fn large(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Source for the small button avatar.
    pub fn small(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Loads `path` through `reader` and shows it in both avatar slots.
    ///
    /// # Errors
    /// Returns the reader error for display; the current avatar is kept.
    pub async fn upload(
        &mut self,
        reader: &impl AvatarReader,
        path: &Path,
    ) -> Result<(), AvatarError> {
        match reader.read_data_url(path).await {
            Ok(source) => {
                info!(
                    "event=avatar_update module=session status=ok bytes={}",
                    source.len()
                );
                self.source = Some(source);
                Ok(())
            }
            Err(err) => {
                warn!("event=avatar_update module=session status=error error={err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{data_url, image_mime_for, AvatarError};
    use std::path::Path;

    #[test]
    fn data_url_is_base64_encoded() {
        assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn mime_lookup_is_case_insensitive() {
        assert_eq!(
            image_mime_for(Path::new("me.JPG")).expect("jpg"),
            "image/jpeg"
        );
        assert_eq!(
            image_mime_for(Path::new("/tmp/a.webp")).expect("webp"),
            "image/webp"
        );
    }

    #[test]
    fn rejects_non_image_extensions() {
        let err = image_mime_for(Path::new("notes.txt")).expect_err("txt is not an image");
        assert!(matches!(err, AvatarError::UnsupportedType(ext) if ext == "txt"));
        assert!(image_mime_for(Path::new("no_extension")).is_err());
    }
}
