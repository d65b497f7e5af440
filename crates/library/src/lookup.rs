//! Filesystem-backed movie resolution

use std::fmt;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Container extensions probed when locating a movie, in priority order,
/// with the content type served for each
pub const SUPPORTED_EXTENSIONS: [(&str, &str); 2] =
    [("mp4", "video/mp4"), ("mkv", "video/x-matroska")];

/// Content type for a supported container extension
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    SUPPORTED_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
}

/// A movie resolved to a servable file on disk
#[derive(Debug, Clone)]
pub struct MovieFile {
    /// Path to the file
    pub path: PathBuf,
    /// Total file size in bytes
    pub size: u64,
    /// Content type derived from the container extension
    pub content_type: &'static str,
}

/// Failures while resolving a movie name
#[derive(Debug)]
pub enum LookupError {
    /// No supported container exists for the movie name
    NotFound(String),
    /// The movie name would escape the library directory
    InvalidName(String),
    /// Filesystem error while probing
    Io(io::Error),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound(name) => write!(f, "Movie not found: {}", name),
            LookupError::InvalidName(name) => write!(f, "Invalid movie name: {}", name),
            LookupError::Io(e) => write!(f, "Library probe failed: {}", e),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<io::Error> for LookupError {
    fn from(err: io::Error) -> Self {
        LookupError::Io(err)
    }
}

/// Resolves a movie identifier to a playable file
///
/// Injected into the server so movie storage can be swapped without touching
/// the streaming routes.
#[async_trait]
pub trait MovieResolver: Send + Sync {
    /// Resolve `name` to a file path, size, and content type
    async fn resolve(&self, name: &str) -> Result<MovieFile, LookupError>;
}

/// Flat-directory movie library: files live at `<root>/<name>.<ext>`
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    /// Create a library rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The library root directory
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl MovieResolver for DirectoryLibrary {
    async fn resolve(&self, name: &str) -> Result<MovieFile, LookupError> {
        // Names are single path components; anything that could climb out of
        // the library directory is rejected before touching the filesystem
        if name.is_empty() || name.contains(['/', '\\', '\0']) || name.contains("..") {
            return Err(LookupError::InvalidName(name.to_string()));
        }

        for (ext, content_type) in SUPPORTED_EXTENSIONS {
            let path = self.root.join(format!("{}.{}", name, ext));
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {
                    tracing::debug!("resolved movie '{}' to {}", name, path.display());
                    return Ok(MovieFile {
                        path,
                        size: meta.len(),
                        content_type,
                    });
                }
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(LookupError::Io(e)),
            }
        }

        Err(LookupError::NotFound(name.to_string()))
    }
}
