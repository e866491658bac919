use crate::anchor::generate_anchor;
use serde::{Deserialize, Serialize};

/// One exported diary row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Left empty so the importing database assigns it.
    pub id: String,
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD HH:MM:SS`, or the raw header text when it needs manual review.
    pub post_date: String,
    pub updated_at: String,
    pub category: String,
    pub tags: String,
    pub anchor_name: String,
}

impl DiaryEntry {
    /// Builds a row from extracted parts. `updated_at` mirrors `post_date` and the anchor is
    /// derived from it.
    pub fn new(title: &str, content: &str, post_date: &str, category: &str) -> Self {
        let post_date = post_date.to_string();
        Self {
            id: String::new(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            anchor_name: generate_anchor(&post_date),
            updated_at: post_date.clone(),
            post_date,
            category: category.to_string(),
            tags: String::new(),
        }
    }
}
