use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MediaError {
    #[error("media URI cannot be empty")]
    EmptyUri,

    #[error("invalid media URL: {0}")]
    InvalidUrl(String),
}

/// Location of an image: a bundled file or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaUri {
    FilePath(PathBuf),
    Url(Url),
}

impl MediaUri {
    /// # Errors
    ///
    /// Returns `MediaError::EmptyUri` for an empty path.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let p = path.into();
        if p.as_os_str().is_empty() {
            return Err(MediaError::EmptyUri);
        }
        Ok(MediaUri::FilePath(p))
    }

    /// # Errors
    ///
    /// Returns `MediaError::EmptyUri` for blank input and
    /// `MediaError::InvalidUrl` when the string does not parse.
    pub fn from_url(url: impl AsRef<str>) -> Result<Self, MediaError> {
        let s = url.as_ref().trim();
        if s.is_empty() {
            return Err(MediaError::EmptyUri);
        }
        let u = Url::parse(s).map_err(|_| MediaError::InvalidUrl(s.to_string()))?;
        Ok(MediaUri::Url(u))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            MediaUri::FilePath(p) => Some(p.as_path()),
            MediaUri::Url(_) => None,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            MediaUri::Url(u) => Some(u),
            MediaUri::FilePath(_) => None,
        }
    }
}

impl fmt::Display for MediaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaUri::FilePath(p) => write!(f, "{}", p.display()),
            MediaUri::Url(u) => write!(f, "{u}"),
        }
    }
}
