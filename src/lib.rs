//! # Folio
//!
//! A build-time prerenderer for a personal portfolio single-page app. Given
//! the client bundle's `index.html` and a directory of markdown content, it
//! writes one complete HTML document per route with the page markup already
//! in place and per-page SEO metadata in the head, plus `sitemap.xml`,
//! `robots.txt` and `404.html`.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      content/ + site.toml  →  SiteContext    (catalog, config, origin)
//! 2. Generate  SiteContext + dist/index.html  →  dist/ (one document per route)
//! ```
//!
//! Within stage 2 every route goes through the same three pure steps:
//!
//! ```text
//! render(ctx, route)    →  page markup
//! resolve(ctx, route)   →  SeoMetadata
//! compose(template, markup, meta)  →  final document
//! ```
//!
//! The context is immutable and shared, so routes are prerendered in parallel
//! without coordination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: reads `articles/` and `projects/` into a sorted, slug-unique [`content::Catalog`] |
//! | [`frontmatter`] | The `---` header block grammar used by content files |
//! | [`config`] | `site.toml` loading, stock defaults, merging and validation |
//! | [`origin`] | Canonical `https` origin every absolute URL is built from |
//! | [`context`] | The immutable [`context::SiteContext`] passed to renderer and resolver |
//! | [`route`] | Route enumeration and the [`route::RouteKind`] classification |
//! | [`metadata`] | SEO record per route: title, description, canonical, OG, Twitter, JSON-LD |
//! | [`render`] | Page markup per route using Maud |
//! | [`compose`] | Merges markup and metadata into the client template |
//! | [`generate`] | Stage 2: prerenders every route and writes the crawler files |
//! | [`types`] | Content types (`Article`, `Project`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Classification, Two Consumers
//!
//! [`route::RouteKind::classify`] decides what a path points at. The metadata
//! resolver and the page renderer both match on it exhaustively, so a new
//! route shape cannot be rendered without also getting metadata.
//!
//! ## Soft Fallbacks
//!
//! Unknown paths render the home page with home metadata. A detail path with
//! an unknown slug renders a "not found" notice but still carries home
//! metadata. Malformed content headers and unparseable dates degrade to
//! defaults instead of failing the build. What does fail the build: a missing
//! template, a template without exactly one mount element, invalid
//! `site.toml`, duplicate slugs, and any I/O error.
//!
//! ## Maud Over String Templates
//!
//! Page markup is generated with [Maud](https://maud.lambda.xyz/): malformed
//! markup is a compile error and every interpolation is escaped. Only
//! markdown bodies are inserted pre-escaped.

pub mod compose;
pub mod config;
pub mod content;
pub mod context;
pub mod frontmatter;
pub mod generate;
pub mod metadata;
pub mod origin;
pub mod output;
pub mod render;
pub mod route;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Install the global `tracing` subscriber.
///
/// `verbose` is the `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
/// `RUST_LOG` directives are honored on top. Logs go to stderr so stdout
/// stays clean for command output.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
