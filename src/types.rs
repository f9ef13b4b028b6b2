//! Content types shared by the catalog, the metadata resolver, the page
//! renderer and the CLI output.

use serde::Serialize;
use std::path::PathBuf;

/// Number of characters kept when an article excerpt is derived from its body.
pub const EXCERPT_CHARS: usize = 140;

/// A short-form article from `content/articles/*.md`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Article {
    /// URL slug: the `slug` header field, else the filename stem
    pub slug: String,
    /// `title` header field, else the slug
    pub title: String,
    /// Raw `date` header value. Kept as text; sort order is string order.
    pub date: String,
    /// Free-form label such as "5 min read"
    pub reading_time: String,
    /// Preview image reference (absolute URL or site path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Explicit `excerpt` header, else derived from the body
    pub excerpt: String,
    /// Markdown body with the header block removed
    pub body: String,
    /// File the article was loaded from
    pub source: PathBuf,
}

/// A long-form project case study from `content/projects/*.md`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Project {
    pub slug: String,
    pub title: String,
    /// e.g. "React Native", "Next.js & NestJS"
    pub category: String,
    /// Explicit `excerpt` header only; empty when absent
    pub excerpt: String,
    pub stack: Vec<String>,
    /// Screenshot references; the first one is the link-preview image
    pub images: Vec<String>,
    /// Public URL of the shipped project; empty when absent
    pub live_url: String,
    pub body: String,
    pub source: PathBuf,
}

impl Project {
    /// Meta description: the excerpt, or a generic case-study line.
    pub fn description(&self) -> String {
        if self.excerpt.is_empty() {
            format!("Case study: {}", self.title)
        } else {
            self.excerpt.clone()
        }
    }
}

/// Derive an excerpt from body text: the first [`EXCERPT_CHARS`] characters,
/// with a literal `...` appended when the text was longer.
pub fn derive_excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
