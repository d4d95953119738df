//! Generates a fresh post file, front matter filled in, ready to edit.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::text_utils::slugify;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("no usable slug could be made out of the title {0:?}")]
    UnusableTitle(String),
    #[error("{} already exists, not overwriting it", path.display())]
    AlreadyExists { path: PathBuf },
    #[error("could not create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What the `new` command knows about the post it is creating.
#[derive(Debug)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub subcategory: Option<String>,
    /// If empty, OS user real name is being used.
    pub author: Option<String>,
}

/// Writes `<posts_dir>/<category>[/<subcategory>]/<slug>.md` and returns
/// the path. Never overwrites an existing file.
pub fn scaffold_post(posts_dir: &Path, post: &NewPost) -> Result<PathBuf, ScaffoldError> {
    let slug = slugify(&post.title);
    if slug.is_empty() {
        return Err(ScaffoldError::UnusableTitle(post.title.clone()));
    }

    let mut dir = posts_dir.join(&post.category);
    if let Some(ref subcategory) = post.subcategory {
        dir = dir.join(subcategory);
    }
    fs::create_dir_all(&dir).map_err(|e| ScaffoldError::Io {
        path: dir.clone(),
        source: e,
    })?;

    let author = match post.author {
        Some(ref author) => author.clone(),
        None => os_user_name(),
    };
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let content = format!("{}\n{}", render_header(post, &author, &date), render_body());

    let path = dir.join(format!("{}.md", slug));
    write_new_file(&path, &content)?;

    Ok(path)
}

fn os_user_name() -> String {
    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

fn render_header(post: &NewPost, author: &str, date: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", quoted(&post.title));
    let _ = writeln!(&mut buf, "description: \"\"");
    let _ = writeln!(&mut buf, "date: {}", date);
    let _ = writeln!(&mut buf, "author: {}", quoted(author));
    let _ = writeln!(&mut buf, "---");

    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example.");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content.");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## First section");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Section headings like the one above end up in the table of contents.");

    buf
}

// Plain YAML scalars trip over colons and quotes, so every generated
// value is written double-quoted.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn write_new_file(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    use std::io::Write;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(ScaffoldError::AlreadyExists {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ScaffoldError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    file.write_all(content.as_bytes())
        .map_err(|e| ScaffoldError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}
