//! Local file transport

use crate::error::SourceError;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Reads requirements from a `file://` URI
#[derive(Debug, Clone)]
pub struct FileSource {
    uri: Url,
    path: PathBuf,
}

impl FileSource {
    /// Creates a file source; URIs naming a remote host fall back to the raw path
    pub fn new(uri: Url) -> Self {
        let path = uri
            .to_file_path()
            .unwrap_or_else(|()| PathBuf::from(uri.path()));
        Self { uri, path }
    }

    /// Returns the source URI
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Reads the whole file
    pub async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        debug!(path = %self.path.display(), "reading requirements file");
        tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::file_not_found(&self.path)
            } else {
                SourceError::file_read(&self.path, e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gomodreq.yml");
        fs::write(&path, "required:\n  golang.org/x/text: latest\n").unwrap();

        let source = FileSource::new(Url::from_file_path(&path).unwrap());
        assert_eq!(source.path.as_path(), path.as_path());
        let data = source.fetch().await.unwrap();
        assert_eq!(data, b"required:\n  golang.org/x/text: latest\n");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        let source = FileSource::new(Url::from_file_path(&path).unwrap());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(Url::from_directory_path(dir.path()).unwrap());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::FileRead { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_percent_encoded_path() {
        let source = FileSource::new(Url::parse("file:///tmp/my%20req.yml").unwrap());
        assert_eq!(source.path.as_path(), Path::new("/tmp/my req.yml"));
    }
}
