use std::path::Path;

use thiserror::Error;

use crate::front_matter::FrontMatter;
use crate::post::PostRecord;
use crate::text_utils::{extract_headings, slugify, word_count};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("no usable slug could be derived from the slug field, title, or file name")]
    UnusableSlug,
}

/// Turns parsed front matter and body into an index record. `Ok(None)`
/// means the post is draft-flagged and stays out of the index.
///
/// The relative path supplies the taxonomy: the first segment is the
/// category fallback, the second is the subcategory when the file sits at
/// least two directories deep. Front matter wins over the path for the
/// category; the subcategory is always the directory layout's call.
pub fn normalize(
    front_matter: &FrontMatter,
    body: &str,
    relative_path: &Path,
    required_fields: &[String],
) -> Result<Option<PostRecord>, ValidationError> {
    if front_matter.draft {
        return Ok(None);
    }

    for field in required_fields {
        // category is satisfied by the directory layout, checked below
        if field == "category" {
            continue;
        }
        if non_empty(front_matter.field(field)).is_none() {
            return Err(ValidationError::MissingField(field.clone()));
        }
    }

    // title and date are load-bearing whatever the configuration says:
    // the slug chain and the index sort depend on them
    let title = non_empty(front_matter.title.as_deref())
        .ok_or_else(|| ValidationError::MissingField("title".to_string()))?;
    let date = non_empty(front_matter.date.as_deref())
        .ok_or_else(|| ValidationError::MissingField("date".to_string()))?;

    let segments = path_segments(relative_path);
    let category = match non_empty(front_matter.category.as_deref()) {
        Some(category) => category.to_string(),
        None if segments.len() >= 2 => segments[0].clone(),
        None => return Err(ValidationError::MissingField("category".to_string())),
    };
    let subcategory = if segments.len() >= 3 {
        Some(segments[1].clone())
    } else {
        None
    };

    let slug = derive_slug(front_matter, relative_path)?;

    Ok(Some(PostRecord {
        title: title.to_string(),
        description: front_matter.description.clone().unwrap_or_default(),
        date: date.to_string(),
        category,
        subcategory,
        slug,
        author: match non_empty(front_matter.author.as_deref()) {
            Some(author) => author.to_string(),
            None => "Unknown".to_string(),
        },
        image: front_matter.image.clone().unwrap_or_default(),
        filepath: segments.join("/"),
        word_count: word_count(body),
        toc: extract_headings(body),
    }))
}

// Explicit slug first, then the title, then the file stem. Every candidate
// goes through slugify so hand-written slugs cannot smuggle in characters
// the routes do not accept.
fn derive_slug(
    front_matter: &FrontMatter,
    relative_path: &Path,
) -> Result<String, ValidationError> {
    if let Some(explicit) = front_matter.slug.as_deref() {
        let slug = slugify(explicit);
        if !slug.is_empty() {
            return Ok(slug);
        }
    }

    if let Some(title) = front_matter.title.as_deref() {
        let slug = slugify(title);
        if !slug.is_empty() {
            return Ok(slug);
        }
    }

    let stem = relative_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");
    let slug = slugify(stem);
    if slug.is_empty() {
        return Err(ValidationError::UnusableSlug);
    }
    Ok(slug)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn path_segments(relative_path: &Path) -> Vec<String> {
    relative_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(title: &str, date: &str) -> FrontMatter {
        FrontMatter {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            ..FrontMatter::default()
        }
    }

    fn required() -> Vec<String> {
        vec!["title".to_string(), "date".to_string()]
    }

    #[test]
    fn test_record_from_nested_path() {
        let body = "intro words here\n\n## Vectors\n\nmore words\n";
        let post = normalize(
            &fm("Linear Algebra", "2024-01-09"),
            body,
            Path::new("math/algebra/linear.md"),
            &required(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(post.title, "Linear Algebra");
        assert_eq!(post.date, "2024-01-09");
        assert_eq!(post.category, "math");
        assert_eq!(post.subcategory.as_deref(), Some("algebra"));
        assert_eq!(post.slug, "linear-algebra");
        assert_eq!(post.author, "Unknown");
        assert_eq!(post.description, "");
        assert_eq!(post.image, "");
        assert_eq!(post.filepath, "math/algebra/linear.md");
        assert_eq!(post.word_count, 6);
        assert_eq!(post.toc, vec!["Vectors"]);
    }

    #[test]
    fn test_single_directory_has_no_subcategory() {
        let post = normalize(&fm("A Note", "2024-02-01"), "", Path::new("life/note.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.category, "life");
        assert_eq!(post.subcategory, None);
    }

    #[test]
    fn test_deep_nesting_keeps_second_segment() {
        let post = normalize(
            &fm("Deep", "2024-02-01"),
            "",
            Path::new("a/b/c/d.md"),
            &required(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(post.category, "a");
        assert_eq!(post.subcategory.as_deref(), Some("b"));
        assert_eq!(post.filepath, "a/b/c/d.md");
    }

    #[test]
    fn test_front_matter_category_wins() {
        let mut meta = fm("Notes", "2024-02-01");
        meta.category = Some("physics".to_string());
        let post = normalize(&meta, "", Path::new("math/notes.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.category, "physics");
    }

    #[test]
    fn test_root_level_file_needs_explicit_category() {
        let err = normalize(&fm("Loose", "2024-02-01"), "", Path::new("loose.md"), &required())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("category".to_string()));

        let mut meta = fm("Loose", "2024-02-01");
        meta.category = Some("misc".to_string());
        let post = normalize(&meta, "", Path::new("loose.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.category, "misc");
        assert_eq!(post.subcategory, None);
        assert_eq!(post.filepath, "loose.md");
    }

    #[test]
    fn test_draft_is_skipped() {
        let mut meta = fm("Hidden", "2024-02-01");
        meta.draft = true;
        let res = normalize(&meta, "", Path::new("tech/hidden.md"), &required()).unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut meta = fm("Untitled", "2024-02-01");
        meta.title = None;
        let err = normalize(&meta, "", Path::new("tech/x.md"), &required()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title".to_string()));

        let mut meta = fm("Titled", "");
        meta.date = None;
        let err = normalize(&meta, "", Path::new("tech/x.md"), &required()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("date".to_string()));

        // whitespace-only counts as missing
        let meta = fm("Titled", "   ");
        let err = normalize(&meta, "", Path::new("tech/x.md"), &required()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("date".to_string()));
    }

    #[test]
    fn test_extra_required_field_from_config() {
        let mut fields = required();
        fields.push("description".to_string());

        let err = normalize(&fm("Post", "2024-02-01"), "", Path::new("tech/x.md"), &fields)
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("description".to_string()));

        let mut meta = fm("Post", "2024-02-01");
        meta.description = Some("short summary".to_string());
        let post = normalize(&meta, "", Path::new("tech/x.md"), &fields)
            .unwrap()
            .unwrap();
        assert_eq!(post.description, "short summary");
    }

    #[test]
    fn test_unknown_required_field_never_passes() {
        let fields = vec!["banner".to_string()];
        let err = normalize(&fm("Post", "2024-02-01"), "", Path::new("tech/x.md"), &fields)
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("banner".to_string()));
    }

    #[test]
    fn test_slug_chain() {
        // explicit slug, normalized
        let mut meta = fm("Some Title", "2024-02-01");
        meta.slug = Some("My Fancy Slug!".to_string());
        let post = normalize(&meta, "", Path::new("tech/x.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.slug, "my-fancy-slug");

        // falls back to the title
        let post = normalize(&fm("Some Title", "2024-02-01"), "", Path::new("tech/x.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.slug, "some-title");

        // then to the file stem
        let post = normalize(&fm("!!!", "2024-02-01"), "", Path::new("tech/raw-notes.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.slug, "raw-notes");

        // nothing usable anywhere
        let err = normalize(&fm("!!!", "2024-02-01"), "", Path::new("tech/???.md"), &required())
            .unwrap_err();
        assert_eq!(err, ValidationError::UnusableSlug);
    }

    #[test]
    fn test_author_defaults_to_unknown() {
        let mut meta = fm("Post", "2024-02-01");
        meta.author = Some("  ".to_string());
        let post = normalize(&meta, "", Path::new("tech/x.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.author, "Unknown");

        let mut meta = fm("Post", "2024-02-01");
        meta.author = Some("Ada Lovelace".to_string());
        let post = normalize(&meta, "", Path::new("tech/x.md"), &required())
            .unwrap()
            .unwrap();
        assert_eq!(post.author, "Ada Lovelace");
    }
}
