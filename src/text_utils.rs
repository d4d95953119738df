use std::ops::Index;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").unwrap();
    static ref HEADING_REGEX: Regex = Regex::new(r"^#{2,3}\s+(.+)$").unwrap();
}

/// Parses the leading date out of a post date string. Time and timezone
/// suffixes ("2024-01-09 10:42:32", "2024-01-09T10:42:32Z") are accepted
/// and ignored.
pub fn parse_post_date(buf: &str) -> Option<NaiveDate> {
    // We are using the regex approach to make it more flexible
    let caps = DATE_REGEX.captures(buf)?;

    let y: i32 = caps.index(1).parse().ok()?;
    let m: u32 = caps.index(2).parse().ok()?;
    let d: u32 = caps.index(3).parse().ok()?;

    NaiveDate::from_ymd_opt(y, m, d)
}

/// Lowercase, ASCII, hyphen-separated form of a title. Accented characters
/// are transliterated, anything else non-alphanumeric collapses into a
/// single hyphen. Never starts or ends with a hyphen.
pub fn slugify(text: &str) -> String {
    let ascii = unidecode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut prev_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen && !slug.is_empty() {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Whitespace-separated token count of the post body.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Collects h2/h3 heading texts in document order. Top-level h1 is the post
/// title and deeper levels are too fine-grained for a table of contents.
pub fn extract_headings(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| HEADING_REGEX.captures(line))
        .map(|caps| caps.index(1).trim().to_string())
        .collect()
}
