//! The build run: scan, parse, normalize, sort, write.

use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::{debug, info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::front_matter::{parse_front_matter, ParseError};
use crate::index_writer::{
    find_route_collisions, sort_records, write_index, RouteCollision, WriteError,
};
use crate::normalizer::{normalize, ValidationError};
use crate::post::PostRecord;
use crate::scanner::{scan_posts, ScanError};

/// Failures that end the run. Everything file-local is downgraded to an
/// [`IndexWarning`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

// Reasons a single file is left out of the index.
#[derive(Debug, Error)]
enum FileError {
    #[error("could not read file: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A file the run left out, and why.
#[derive(Debug)]
pub struct IndexWarning {
    pub path: String,
    pub reason: String,
}

/// What one build run did.
#[derive(Debug)]
pub struct PipelineReport {
    pub indexed: usize,
    pub skipped_drafts: usize,
    pub warnings: Vec<IndexWarning>,
    pub collisions: Vec<RouteCollision>,
    pub output_file: PathBuf,
}

/// Runs the whole chain and publishes the index artifact. A broken file
/// costs only that file; a missing content root or an unwritable output
/// aborts the run and leaves any previous artifact as it was.
pub fn run(config: &Config) -> Result<PipelineReport, PipelineError> {
    let posts_dir = &config.paths.posts_dir;
    let output_file = &config.paths.output_file;

    let paths = scan_posts(posts_dir)?;
    info!(
        "Indexing {} content files under {}",
        paths.len(),
        posts_dir.display()
    );

    let mut records = Vec::new();
    let mut skipped_drafts = 0;
    let mut warnings = Vec::new();

    for path in &paths {
        let relative = path.strip_prefix(posts_dir).unwrap_or(path);
        match index_one(path, relative, &config.index.required_fields) {
            Ok(Some(record)) => {
                debug!("Indexed {} as {}", relative.display(), record.route());
                records.push(record);
            }
            Ok(None) => {
                debug!("Leaving draft {} out", relative.display());
                skipped_drafts += 1;
            }
            Err(reason) => {
                warn!("Skipping {}: {}", relative.display(), reason);
                warnings.push(IndexWarning {
                    path: relative.display().to_string(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    sort_records(&mut records, config.index.sort_by, config.index.sort_order);

    let collisions = find_route_collisions(&records);
    for collision in &collisions {
        warn!("{}", collision);
    }

    write_index(&records, output_file)?;
    info!(
        "Wrote {} posts to {} ({} drafts, {} files skipped)",
        records.len(),
        output_file.display(),
        skipped_drafts,
        warnings.len()
    );

    Ok(PipelineReport {
        indexed: records.len(),
        skipped_drafts,
        warnings,
        collisions,
        output_file: output_file.clone(),
    })
}

fn index_one(
    path: &Path,
    relative: &Path,
    required_fields: &[String],
) -> Result<Option<PostRecord>, FileError> {
    let raw = fs::read_to_string(path)?;
    let (front_matter, body) = parse_front_matter(&raw)?;
    Ok(normalize(&front_matter, body, relative, required_fields)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Paths;
    use crate::test_data::POST_DATA;

    fn write_post(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(root: &Path) -> Config {
        Config {
            paths: Paths {
                posts_dir: root.join("posts"),
                output_file: root.join("public/posts/index.json"),
            },
            ..Config::default()
        }
    }

    fn read_index(config: &Config) -> Vec<PostRecord> {
        let raw = fs::read_to_string(&config.paths.output_file).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        write_post(
            &posts,
            "math/algebra/linear.md",
            "---\ntitle: Linear Algebra\ndate: 2024-01-01\n---\n\nVectors and matrices.\n",
        );
        write_post(
            &posts,
            "life/note.md",
            "---\ntitle: A Note\ndate: 2024-06-01\n---\n\nShort one.\n",
        );

        let config = config_for(dir.path());
        let report = run(&config).unwrap();

        assert_eq!(report.indexed, 2);
        assert_eq!(report.skipped_drafts, 0);
        assert!(report.warnings.is_empty());
        assert!(report.collisions.is_empty());
        assert_eq!(report.output_file, config.paths.output_file);

        let index = read_index(&config);
        assert_eq!(index[0].title, "A Note");
        assert_eq!(index[0].category, "life");
        assert_eq!(index[0].subcategory, None);
        assert_eq!(index[1].title, "Linear Algebra");
        assert_eq!(index[1].category, "math");
        assert_eq!(index[1].subcategory.as_deref(), Some("algebra"));
    }

    #[test]
    fn test_full_front_matter_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        write_post(&dir.path().join("posts"), "life/garden.md", POST_DATA);

        let config = config_for(dir.path());
        run(&config).unwrap();

        let index = read_index(&config);
        assert_eq!(index.len(), 1);
        let post = &index[0];
        assert_eq!(post.title, "Growing a Garden");
        assert_eq!(post.description, "What a year of container gardening taught me");
        assert_eq!(post.author, "Ada Lovelace");
        assert_eq!(post.slug, "growing-a-garden");
        assert_eq!(post.filepath, "life/garden.md");
        assert_eq!(post.toc, vec!["What worked", "Watering", "What did not"]);
        assert!(post.word_count > 0);
    }

    #[test]
    fn test_broken_files_cost_only_themselves() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        write_post(
            &posts,
            "tech/good.md",
            "---\ntitle: Good\ndate: 2024-03-01\n---\nbody\n",
        );
        write_post(&posts, "tech/untitled.md", "---\ndate: 2024-03-02\n---\nbody\n");
        write_post(&posts, "tech/unterminated.md", "---\ntitle: Broken\n");
        write_post(&posts, "tech/plain.md", "No front matter at all.\n");
        write_post(
            &posts,
            "tech/draft.md",
            "---\ntitle: Soon\ndate: 2024-03-03\ndraft: true\n---\nbody\n",
        );

        let config = config_for(dir.path());
        let report = run(&config).unwrap();

        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped_drafts, 1);
        assert_eq!(report.warnings.len(), 3);

        let warned: Vec<&str> = report.warnings.iter().map(|w| w.path.as_str()).collect();
        assert!(warned.contains(&"tech/untitled.md"));
        assert!(warned.contains(&"tech/unterminated.md"));
        assert!(warned.contains(&"tech/plain.md"));

        let untitled = report
            .warnings
            .iter()
            .find(|w| w.path == "tech/untitled.md")
            .unwrap();
        assert_eq!(untitled.reason, "missing required field: title");

        let index = read_index(&config);
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].title, "Good");
    }

    #[test]
    fn test_route_collision_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        write_post(
            &posts,
            "tech/stores.md",
            "---\ntitle: Stores\ndate: 2024-01-01\n---\nfirst\n",
        );
        write_post(
            &posts,
            "tech/stores-again.md",
            "---\ntitle: Stores\ndate: 2023-01-01\nslug: stores\n---\nsecond\n",
        );

        let config = config_for(dir.path());
        let report = run(&config).unwrap();

        assert_eq!(report.indexed, 2);
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].route, "tech/stores");
        assert_eq!(report.collisions[0].first, "tech/stores.md");
        assert_eq!(report.collisions[0].second, "tech/stores-again.md");
        assert_eq!(read_index(&config).len(), 2);
    }

    #[test]
    fn test_empty_root_publishes_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();

        let config = config_for(dir.path());
        let report = run(&config).unwrap();

        assert_eq!(report.indexed, 0);
        assert_eq!(fs::read_to_string(&config.paths.output_file).unwrap(), "[]");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Scan(_)));
        assert!(!config.paths.output_file.exists());
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        write_post(
            &posts,
            "tech/good.md",
            "---\ntitle: Good\ndate: 2024-03-01\n---\nbody\n",
        );
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/posts"), "in the way").unwrap();

        let config = config_for(dir.path());
        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Write(_)));
    }
}
