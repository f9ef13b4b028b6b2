//! SEO metadata resolution.
//!
//! Maps a route to the head metadata for its prerendered document: title,
//! description, canonical URL, Open Graph and Twitter Card tags, and JSON-LD
//! structured data.
//!
//! ## Dispatch
//!
//! The route is canonicalized and classified once ([`RouteKind`]), then:
//!
//! ```text
//! /articles/{slug}   catalog hit → article record      miss → home
//! /projects/{slug}   catalog hit → case-study record   miss → home
//! /projects, /articles, /experience, /contact → listing/page record
//! anything else → home record
//! ```
//!
//! The home record does not depend on the requested path, so an unknown
//! route resolves to exactly the same record as `/`.
//!
//! ## Record shape
//!
//! Every branch goes through the same builders: [`og_tags`],
//! [`twitter_tags`] and the `*_ld` structured-data functions. JSON-LD always
//! starts with the site-wide `Person` and `WebSite` objects; detail pages add
//! their `Article`/`CreativeWork` object and a two-entry `BreadcrumbList`.
//!
//! ## Preview images
//!
//! Resolved per field, first non-empty source wins:
//!
//! - **Article**: `thumbnail` → `site.image`
//! - **Project**: first of `images` → `site.image`
//! - **Pages**: `site.image`
//!
//! References without a URL scheme are joined onto the site origin.

use crate::context::SiteContext;
use crate::route::{RouteKind, StaticPage, canonicalize};
use crate::types::{Article, Project};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Value, json};

/// Head metadata for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct SeoMetadata {
    pub title: String,
    pub description: Option<String>,
    /// Absolute canonical URL
    pub canonical: Option<String>,
    /// `og:*` property/value pairs, in emission order
    pub og: Vec<(String, String)>,
    /// `twitter:*` name/value pairs, in emission order
    pub twitter: Vec<(String, String)>,
    /// Structured-data objects, one `<script>` each
    pub json_ld: Vec<Value>,
}

/// Resolve a metadata field from multiple sources.
///
/// Returns the first non-None, non-empty (after trimming) value.
pub fn first_non_empty(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Resolve the metadata record for `path`.
pub fn resolve(ctx: &SiteContext, path: &str) -> SeoMetadata {
    let route = canonicalize(path);
    let url = ctx.origin.url(&route);

    match RouteKind::classify(&route) {
        RouteKind::ArticleDetail(slug) => {
            if let Some(article) = ctx.catalog.find_article(&slug) {
                return article_meta(ctx, article, url);
            }
            tracing::debug!(route = %route, "unknown article slug; using home metadata");
        }
        RouteKind::ProjectDetail(slug) => {
            if let Some(project) = ctx.catalog.find_project(&slug) {
                return project_meta(ctx, project, url);
            }
            tracing::debug!(route = %route, "unknown project slug; using home metadata");
        }
        RouteKind::StaticPage(StaticPage::Home) => {}
        RouteKind::StaticPage(page) => return page_meta(ctx, page, url),
        RouteKind::Unknown => {
            tracing::debug!(route = %route, "unrecognized route; using home metadata")
        }
    }

    home_meta(ctx)
}

/// The facts every branch feeds into the shared tag builders.
struct PageFacts {
    og_type: &'static str,
    title: String,
    description: String,
    url: String,
    image: Option<String>,
}

impl PageFacts {
    fn into_metadata(self, ctx: &SiteContext, json_ld: Vec<Value>) -> SeoMetadata {
        SeoMetadata {
            og: og_tags(ctx, &self),
            twitter: twitter_tags(&self),
            canonical: Some(self.url),
            description: Some(self.description),
            title: self.title,
            json_ld,
        }
    }
}

fn page_title(ctx: &SiteContext, title: &str) -> String {
    format!("{title} | {}", ctx.site_name())
}

fn preview_image(ctx: &SiteContext, own: Option<&str>) -> Option<String> {
    first_non_empty(&[own, ctx.config.site.image.as_deref()])
        .map(|reference| ctx.origin.resolve_image(&reference))
}

fn home_meta(ctx: &SiteContext) -> SeoMetadata {
    let site = &ctx.config.site;
    let title = if site.tagline.trim().is_empty() {
        site.name.clone()
    } else {
        format!("{} | {}", site.name, site.tagline)
    };
    let facts = PageFacts {
        og_type: "website",
        title,
        description: site.description.clone(),
        url: ctx.origin.url("/"),
        image: preview_image(ctx, None),
    };
    facts.into_metadata(ctx, site_identity_ld(ctx))
}

fn page_meta(ctx: &SiteContext, page: StaticPage, url: String) -> SeoMetadata {
    let description = match page {
        StaticPage::Home => ctx.config.site.description.clone(),
        StaticPage::Projects => "Freelance & personal projects.".to_string(),
        StaticPage::Articles => "Thoughts & insights on software development.".to_string(),
        StaticPage::Experience => "A quick look at my ongoing roles and contributions.".to_string(),
        StaticPage::Contact => format!("Get in touch with {}.", ctx.site_name()),
    };
    let facts = PageFacts {
        og_type: "website",
        title: page_title(ctx, page.label()),
        description,
        url,
        image: preview_image(ctx, None),
    };
    facts.into_metadata(ctx, site_identity_ld(ctx))
}

fn article_meta(ctx: &SiteContext, article: &Article, url: String) -> SeoMetadata {
    let image = preview_image(ctx, article.thumbnail.as_deref());
    let mut json_ld = site_identity_ld(ctx);
    json_ld.push(article_ld(ctx, article, &url, image.as_deref()));
    json_ld.push(breadcrumb_ld(ctx, StaticPage::Articles, &article.title, &url));

    let facts = PageFacts {
        og_type: "article",
        title: page_title(ctx, &article.title),
        description: article.excerpt.clone(),
        url,
        image,
    };
    facts.into_metadata(ctx, json_ld)
}

fn project_meta(ctx: &SiteContext, project: &Project, url: String) -> SeoMetadata {
    let image = preview_image(ctx, project.images.first().map(String::as_str));
    let description = project.description();
    let mut json_ld = site_identity_ld(ctx);
    json_ld.push(creative_work_ld(ctx, project, &description, &url, image.as_deref()));
    json_ld.push(breadcrumb_ld(ctx, StaticPage::Projects, &project.title, &url));

    let facts = PageFacts {
        og_type: "website",
        title: page_title(ctx, &project.title),
        description,
        url,
        image,
    };
    facts.into_metadata(ctx, json_ld)
}

// ============================================================================
// Tag builders
// ============================================================================

fn og_tags(ctx: &SiteContext, facts: &PageFacts) -> Vec<(String, String)> {
    let mut tags = vec![
        ("og:type", facts.og_type.to_string()),
        ("og:title", facts.title.clone()),
        ("og:description", facts.description.clone()),
        ("og:url", facts.url.clone()),
        ("og:site_name", ctx.site_name().to_string()),
        ("og:locale", ctx.config.site.locale.clone()),
    ];
    if let Some(image) = &facts.image {
        tags.push(("og:image", image.clone()));
    }
    owned_pairs(tags)
}

fn twitter_tags(facts: &PageFacts) -> Vec<(String, String)> {
    let card = if facts.image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    let mut tags = vec![
        ("twitter:card", card.to_string()),
        ("twitter:title", facts.title.clone()),
        ("twitter:description", facts.description.clone()),
    ];
    if let Some(image) = &facts.image {
        tags.push(("twitter:image", image.clone()));
    }
    owned_pairs(tags)
}

fn owned_pairs(tags: Vec<(&str, String)>) -> Vec<(String, String)> {
    tags.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// ============================================================================
// Structured data
// ============================================================================

const SCHEMA_CONTEXT: &str = "https://schema.org";

fn person_id(ctx: &SiteContext) -> String {
    ctx.origin.url("/#person")
}

/// Insert `key` only when `value` is present and non-empty.
fn insert_opt(object: &mut Value, key: &str, value: Option<&str>) {
    if let (Some(map), Some(v)) = (object.as_object_mut(), value.filter(|v| !v.is_empty())) {
        map.insert(key.to_string(), Value::String(v.to_string()));
    }
}

/// `Person` then `WebSite`: the prefix of every record's JSON-LD.
fn site_identity_ld(ctx: &SiteContext) -> Vec<Value> {
    vec![person_ld(ctx), website_ld(ctx)]
}

fn person_ld(ctx: &SiteContext) -> Value {
    let person = &ctx.config.person;
    let mut ld = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Person",
        "@id": person_id(ctx),
        "name": person.name,
        "url": ctx.origin.url("/"),
        "jobTitle": person.job_title,
        "sameAs": person.same_as,
    });
    let email = (!person.email.is_empty()).then(|| format!("mailto:{}", person.email));
    insert_opt(&mut ld, "email", email.as_deref());
    let image = person.image.as_deref().map(|i| ctx.origin.resolve_image(i));
    insert_opt(&mut ld, "image", image.as_deref());
    ld
}

fn website_ld(ctx: &SiteContext) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "@id": ctx.origin.url("/#website"),
        "url": ctx.origin.url("/"),
        "name": ctx.site_name(),
        "description": ctx.config.site.description,
        "inLanguage": ctx.config.site.locale.replace('_', "-"),
        "publisher": { "@id": person_id(ctx) },
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}?q={{search_term_string}}", ctx.origin.url("/articles")),
            "query-input": "required name=search_term_string",
        },
    })
}

fn article_ld(ctx: &SiteContext, article: &Article, url: &str, image: Option<&str>) -> Value {
    let mut ld = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Article",
        "headline": article.title,
        "description": article.excerpt,
        "url": url,
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
        "author": {
            "@type": "Person",
            "@id": person_id(ctx),
            "name": ctx.config.person.name,
        },
    });
    let published = (!article.date.trim().is_empty()).then(|| iso_date(&article.date));
    insert_opt(&mut ld, "datePublished", published.as_deref());
    insert_opt(&mut ld, "image", image);
    ld
}

fn creative_work_ld(
    ctx: &SiteContext,
    project: &Project,
    description: &str,
    url: &str,
    image: Option<&str>,
) -> Value {
    let mut ld = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "CreativeWork",
        "name": project.title,
        "description": description,
        "url": url,
        "creator": { "@id": person_id(ctx) },
    });
    insert_opt(&mut ld, "genre", Some(project.category.as_str()));
    let keywords = project.stack.join(", ");
    insert_opt(&mut ld, "keywords", Some(keywords.as_str()));
    insert_opt(&mut ld, "image", image);
    insert_opt(&mut ld, "sameAs", Some(project.live_url.as_str()));
    ld
}

fn breadcrumb_ld(ctx: &SiteContext, listing: StaticPage, name: &str, url: &str) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": listing.label(),
                "item": ctx.origin.url(listing.path()),
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": name,
                "item": url,
            },
        ],
    })
}

/// Date-time layouts without an offset, all read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Serialize a content date for `datePublished`.
///
/// RFC 3339 timestamps, offset-free date-times (`T` or space separated,
/// seconds optional, taken as UTC) and plain `YYYY-MM-DD` dates (midnight
/// UTC) become ISO-8601 with millisecond precision. Anything else is
/// returned unchanged.
pub fn iso_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let instant = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        });
    match instant {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => {
            tracing::debug!(date = raw, "unparseable date kept verbatim");
            raw.to_string()
        }
    }
}
