//! The in-memory reason list.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Error type for loading the reason list.
#[derive(Debug, Error)]
pub enum ReasonsError {
    #[error("failed to read reasons file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reasons file {path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("reasons file {0} contains no reasons")]
    Empty(PathBuf),

    #[error("reasons file {path}: entry {index} is blank")]
    Blank { path: PathBuf, index: usize },
}

/// Ordered, read-only list of rejection reasons.
///
/// Cloning is cheap; all clones share the same backing slice.
#[derive(Debug, Clone)]
pub struct ReasonList {
    reasons: Arc<[String]>,
}

impl ReasonList {
    /// Load reasons from a JSON array file.
    pub fn load(path: &Path) -> Result<Self, ReasonsError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReasonsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reasons: Vec<String> =
            serde_json::from_str(&content).map_err(|source| ReasonsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if reasons.is_empty() {
            return Err(ReasonsError::Empty(path.to_path_buf()));
        }

        if let Some(index) = reasons.iter().position(|r| r.trim().is_empty()) {
            return Err(ReasonsError::Blank {
                path: path.to_path_buf(),
                index,
            });
        }

        Ok(Self::from_vec(reasons))
    }

    pub fn from_vec(reasons: Vec<String>) -> Self {
        Self {
            reasons: reasons.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn contains(&self, reason: &str) -> bool {
        self.reasons.iter().any(|r| r == reason)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.reasons.iter().map(String::as_str)
    }

    /// Pick one reason uniformly at random.
    ///
    /// Returns `None` only for an empty list, which `load` never produces.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.reasons.choose(rng).map(String::as_str)
    }
}
