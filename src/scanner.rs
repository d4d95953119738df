use std::path::{Path, PathBuf};
use std::{fs, io};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("content root {} is not readable: {source}", path.display())]
    RootUnreadable { path: PathBuf, source: io::Error },
    #[error("content root {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

/// Collects every markdown content file under the root, recursively, in a
/// deterministic depth-first lexicographic order. An unreadable root is an
/// error; unreadable entries further down are skipped and will surface when
/// something tries to read them.
pub fn scan_posts(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let metadata = fs::metadata(root).map_err(|e| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() && is_content_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

// Markdown sources only. Assets living next to posts are not indexed.
fn is_content_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => matches!(ext.to_ascii_lowercase().as_str(), "md" | "mdx"),
        None => false,
    }
}
