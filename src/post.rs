use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::text_utils::parse_post_date;

/// One indexed post, laid out exactly as it is serialized into the index
/// artifact. Field order here is the field order in the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub slug: String,
    pub author: String,
    pub image: String,
    pub filepath: String,
    #[serde(rename = "wordCount")]
    pub word_count: usize,
    pub toc: Vec<String>,
}

impl PostRecord {
    /// Sort key of the record. Unparseable dates sort as the Unix epoch,
    /// which puts them last in a newest-first index.
    pub fn sort_date(&self) -> NaiveDate {
        parse_post_date(&self.date).unwrap_or_default()
    }

    /// Estimated minutes to read at 200 words per minute, never below one.
    pub fn reading_time(&self) -> usize {
        ((self.word_count + 199) / 200).max(1)
    }

    /// Route of the post within the blog, `category/slug` or
    /// `category/subcategory/slug`.
    pub fn route(&self) -> String {
        match self.subcategory {
            Some(ref sub) => format!("{}/{}/{}", self.category, sub, self.slug),
            None => format!("{}/{}", self.category, self.slug),
        }
    }
}
