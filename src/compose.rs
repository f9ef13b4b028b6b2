//! Document composition.
//!
//! Merges rendered page markup and a [`SeoMetadata`] record into the client
//! bundle's `index.html`. The template's own head tags are defaults for the
//! client-side app; composing replaces them so every prerendered document
//! carries exactly one set of SEO tags.
//!
//! ## Steps
//!
//! ```text
//! 1. <div id="root"></div>        → <div id="root">{markup}</div>
//! 2. strip default head tags      description, canonical, og:*, twitter:*, ld+json
//! 3. <title>…</title>             → <title>{title}</title>
//! 4. insert before </head>        description, canonical, og, twitter, ld+json
//! ```
//!
//! Stripping matches tags by shape, case-insensitively, and also consumes
//! the whitespace after each one so the head does not accumulate blank lines.

use crate::metadata::SeoMetadata;
use crate::origin::SiteOrigin;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template has no empty mount element <div id=\"{mount_id}\"></div>")]
    MissingMountPoint { mount_id: String },
    #[error("template has {count} mount elements <div id=\"{mount_id}\"></div>, expected exactly one")]
    DuplicateMountPoint { mount_id: String, count: usize },
}

/// Default head tags removed before the resolved ones are inserted.
static STRIP_PATTERNS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        r#"(?i)<meta[^>]+name=["']description["'][^>]*>\s*"#,
        r#"(?i)<link[^>]+rel=["']canonical["'][^>]*>\s*"#,
        r#"(?i)<meta[^>]+property=["']og:[^"']+["'][^>]*>\s*"#,
        r#"(?i)<meta[^>]+name=["']twitter:[^"']+["'][^>]*>\s*"#,
        r#"(?is)<script[^>]+type=["']application/ld\+json["'][^>]*>.*?</script>\s*"#,
    ]
    .map(|pattern| Regex::new(pattern).expect("strip pattern must compile"))
});

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>.*?</title>").expect("title pattern must compile"));

/// A validated client bundle `index.html`.
#[derive(Debug, Clone)]
pub struct Template {
    html: String,
    mount: String,
}

impl Template {
    /// Wrap `raw`, requiring exactly one empty `<div id="{mount_id}"></div>`.
    pub fn new(raw: impl Into<String>, mount_id: &str) -> Result<Self, TemplateError> {
        let html = raw.into();
        let mount = format!(r#"<div id="{mount_id}"></div>"#);
        match html.matches(&mount).count() {
            1 => Ok(Self { html, mount }),
            0 => Err(TemplateError::MissingMountPoint {
                mount_id: mount_id.to_string(),
            }),
            count => Err(TemplateError::DuplicateMountPoint {
                mount_id: mount_id.to_string(),
                count,
            }),
        }
    }

    fn mount(&self, markup: &str) -> String {
        let filled = format!("{}{markup}</div>", self.mount.trim_end_matches("</div>"));
        self.html.replacen(&self.mount, &filled, 1)
    }
}

/// Escape text for an HTML attribute value or text node.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compose the final document for `route`.
///
/// `meta.canonical` falls back to `origin + route` when unset.
pub fn compose(
    template: &Template,
    markup: &str,
    meta: &SeoMetadata,
    origin: &SiteOrigin,
    route: &str,
) -> String {
    let mut doc = template.mount(markup);
    for pattern in STRIP_PATTERNS.iter() {
        doc = pattern.replace_all(&doc, "").into_owned();
    }
    doc = replace_title(&doc, &meta.title);

    if let Some(description) = &meta.description {
        doc = insert_in_head(
            &doc,
            &format!(r#"<meta name="description" content="{}">"#, escape_html(description)),
        );
    }

    let canonical = meta.canonical.clone().unwrap_or_else(|| origin.url(route));
    doc = insert_in_head(
        &doc,
        &format!(r#"<link rel="canonical" href="{}">"#, escape_html(&canonical)),
    );

    if !meta.og.is_empty() {
        let tags = meta_tags("property", &meta.og);
        doc = insert_in_head(&doc, &tags);
    }
    if !meta.twitter.is_empty() {
        let tags = meta_tags("name", &meta.twitter);
        doc = insert_in_head(&doc, &tags);
    }

    for entry in &meta.json_ld {
        // emitted exactly as serialized; content must not carry `</script>`
        let json = entry.to_string();
        if json.to_ascii_lowercase().contains("</script") {
            tracing::warn!(route, "structured data contains </script>");
        }
        doc = insert_in_head(
            &doc,
            &format!(r#"<script type="application/ld+json">{json}</script>"#),
        );
    }
    doc
}

/// Compose the not-found document: markup and title only. The template's
/// default head tags are left in place.
pub fn compose_not_found(template: &Template, markup: &str, title: Option<&str>) -> String {
    let doc = template.mount(markup);
    replace_title(&doc, title.unwrap_or("Not Found"))
}

fn replace_title(doc: &str, title: &str) -> String {
    let tag = format!("<title>{}</title>", escape_html(title));
    TITLE.replacen(doc, 1, NoExpand(&tag)).into_owned()
}

fn meta_tags(attr: &str, pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                r#"<meta {attr}="{}" content="{}">"#,
                escape_html(key),
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Insert `block` before the first `</head>`. A document without one is
/// returned unchanged.
fn insert_in_head(doc: &str, block: &str) -> String {
    doc.replacen("</head>", &format!("  {block}\n  </head>"), 1)
}
