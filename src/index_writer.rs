use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::{fs, io};

use thiserror::Error;

use crate::config::{SortBy, SortOrder};
use crate::post::PostRecord;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not create index directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not serialize the index: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write index file {}: {source}", path.display())]
    WriteFile { path: PathBuf, source: io::Error },
}

/// Sorts records in place. The sort is stable, so posts with equal keys
/// keep the scanner's deterministic order.
pub fn sort_records(records: &mut [PostRecord], sort_by: SortBy, sort_order: SortOrder) {
    records.sort_by(|a, b| {
        let (a, b) = match sort_order {
            SortOrder::Ascending => (a, b),
            SortOrder::Descending => (b, a),
        };
        match sort_by {
            SortBy::Date => a.sort_date().cmp(&b.sort_date()),
            SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    });
}

/// Two records resolving to the same route. The runtime returns the first
/// one on lookup, so the second is unreachable until renamed.
#[derive(Debug, PartialEq)]
pub struct RouteCollision {
    pub route: String,
    pub first: String,
    pub second: String,
}

impl Display for RouteCollision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "posts {} and {} share the route {}",
            self.first, self.second, self.route
        )
    }
}

/// Reports posts that resolve to the same route. All of them stay in the
/// index; collisions are a warning, not a build failure.
pub fn find_route_collisions(records: &[PostRecord]) -> Vec<RouteCollision> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut collisions = Vec::new();

    for record in records {
        match seen.entry(record.route()) {
            Entry::Occupied(entry) => {
                collisions.push(RouteCollision {
                    route: entry.key().clone(),
                    first: entry.get().to_string(),
                    second: record.filepath.clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(record.filepath.as_str());
            }
        }
    }

    collisions
}

/// Serializes the records, pretty-printed, and moves the file into place
/// with a rename so an interrupted run never leaves a truncated artifact.
pub fn write_index(records: &[PostRecord], output_file: &Path) -> Result<(), WriteError> {
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;

    let tmp_file = tmp_path(output_file);
    fs::write(&tmp_file, json).map_err(|e| WriteError::WriteFile {
        path: tmp_file.clone(),
        source: e,
    })?;
    fs::rename(&tmp_file, output_file).map_err(|e| WriteError::WriteFile {
        path: output_file.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn tmp_path(output_file: &Path) -> PathBuf {
    let mut name = output_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("index.json"));
    name.push(".tmp");
    output_file.with_file_name(name)
}
