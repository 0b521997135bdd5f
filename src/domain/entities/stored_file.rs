//! Uploaded files and the storage backend trait.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// A file accepted by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated name: `{uuid}{extension}`
    pub file_name: String,
    pub file_url: String,
    pub file_size: u64,
    pub content_type: Option<String>,
}

/// Whether a client supplied file name can be used to address a stored file.
///
/// Rejects anything that could escape the upload directory or address the
/// directory itself. Stored names never start with a dot.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

/// Flat, name-addressed blob storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `bytes` under `file_name`, creating the backing location if needed.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), AppError>;

    /// Remove `file_name`. Returns `false` when it did not exist.
    async fn delete(&self, file_name: &str) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("3f2a.png", true)]
    #[test_case("", false)]
    #[test_case("../etc/passwd", false)]
    #[test_case("a/b.png", false)]
    #[test_case("a\\b.png", false)]
    #[test_case("..png", false)]
    #[test_case(".", false ; "single dot")]
    #[test_case(".env", false ; "hidden file")]
    #[test_case("a\0.png", false ; "nul byte")]
    fn file_name_safety(name: &str, expected: bool) {
        assert_eq!(is_safe_file_name(name), expected);
    }
}
