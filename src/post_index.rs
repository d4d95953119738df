//! Runtime side of the index artifact: one read per session, then lookups.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::warn;
use thiserror::Error;

use crate::front_matter::parse_front_matter;
use crate::post::PostRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read index {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("index {} is not valid: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A post body that could not be fetched. A record pointing at a file that
/// no longer exists is a distinct state from an I/O failure, so the caller
/// can say "post is gone" instead of showing a blank page.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("post source {} does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("could not read post source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The published index, loaded once and treated as read-only reference
/// data for the rest of the session.
#[derive(Debug, Default)]
pub struct PostIndex {
    records: Vec<PostRecord>,
}

impl PostIndex {
    pub async fn load(path: &Path) -> Result<PostIndex, LoadError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
        let records = serde_json::from_str(&raw).map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(PostIndex { records })
    }

    /// A missing or broken artifact is the empty blog, not a crash.
    pub async fn load_or_empty(path: &Path) -> PostIndex {
        match Self::load(path).await {
            Ok(index) => index,
            Err(e) => {
                warn!("{}; starting with an empty index", e);
                PostIndex::default()
            }
        }
    }

    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a post up by its route. A route without a subcategory matches
    /// on category and slug alone, whatever the record's subcategory says.
    /// The first match wins; `None` is the not-found state.
    pub fn find(
        &self,
        category: &str,
        subcategory: Option<&str>,
        slug: &str,
    ) -> Option<&PostRecord> {
        self.records.iter().find(|record| {
            if record.category != category || record.slug != slug {
                return false;
            }
            match subcategory {
                Some(sub) => record.subcategory.as_deref() == Some(sub),
                None => true,
            }
        })
    }
}

/// Fetches one post's body on demand, keyed by the record's stored
/// relative path, with the front matter stripped off. A file that stopped
/// parsing since it was indexed is served raw rather than not at all.
pub async fn load_body(posts_dir: &Path, record: &PostRecord) -> Result<String, BodyError> {
    let path = posts_dir.join(&record.filepath);
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(BodyError::NotFound { path }),
        Err(e) => return Err(BodyError::Io { path, source: e }),
    };

    match parse_front_matter(&raw) {
        Ok((_, body)) => Ok(body.to_string()),
        Err(_) => Ok(raw),
    }
}
