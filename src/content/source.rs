use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("resource not found: {path}")]
    NotFound { path: String },
    #[error("refusing to read outside the site root: {path}")]
    InvalidPath { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed post index: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read access to the static assets of the site.
pub trait ContentSource: fmt::Debug + Send + Sync {
    fn fetch(&self, path: &str) -> Result<String, ContentError>;
}

/// Static assets served from a directory on disk.
#[derive(Debug, Clone)]
pub struct SiteDirectory {
    root: PathBuf,
}

impl SiteDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ContentError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || path.is_empty() {
            return Err(ContentError::InvalidPath {
                path: path.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl ContentSource for SiteDirectory {
    fn fetch(&self, path: &str) -> Result<String, ContentError> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ContentError::NotFound {
                path: path.to_string(),
            },
            _ => ContentError::Io {
                path: path.to_string(),
                source,
            },
        })
    }
}
