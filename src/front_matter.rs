//! YAML front matter, fenced by `---` lines at the top of a post file.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("front matter fence opened but never closed")]
    UnterminatedFence,
    #[error("invalid front matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// The metadata keys a post may carry. Unknown keys are ignored, empty
/// values are kept as-is and treated as missing by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub draft: bool,
}

impl FrontMatter {
    /// Looks a field up by its key name, for the configurable
    /// required-field check. Unknown names are never satisfied.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => self.title.as_deref(),
            "description" => self.description.as_deref(),
            "date" => self.date.as_deref(),
            "slug" => self.slug.as_deref(),
            "category" => self.category.as_deref(),
            "subcategory" => self.subcategory.as_deref(),
            "author" => self.author.as_deref(),
            "image" => self.image.as_deref(),
            _ => None,
        }
    }
}

/// Parses a raw post file into typed front matter and the markdown body.
/// A file with no opening fence is all body with empty metadata.
pub fn parse_front_matter(raw: &str) -> Result<(FrontMatter, &str), ParseError> {
    let (block, body) = split_front_matter(raw)?;
    let front_matter = match block {
        Some(block) if !block.trim().is_empty() => serde_yaml::from_str(block)?,
        _ => FrontMatter::default(),
    };
    Ok((front_matter, body))
}

fn split_front_matter(raw: &str) -> Result<(Option<&str>, &str), ParseError> {
    let Some(rest) = strip_opening_fence(raw) else {
        return Ok((None, raw));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(block), body));
        }
        offset += line.len();
    }

    Err(ParseError::UnterminatedFence)
}

// The opening fence has to be the very first line of the file.
fn strip_opening_fence(raw: &str) -> Option<&str> {
    let first_line_end = raw.find('\n')?;
    if raw[..first_line_end].trim_end() == "---" {
        Some(&raw[first_line_end + 1..])
    } else {
        None
    }
}
