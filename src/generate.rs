//! Static site prerendering.
//!
//! Stage 2 of the build. Takes the content catalog and the client bundle
//! template and writes one fully-formed HTML document per route, plus the
//! crawler files.
//!
//! ## Steps
//!
//! 1. Load config and content into a [`SiteContext`].
//! 2. Read the template (`dist/index.html`, else `dist/client/index.html`).
//!    It is read in full before anything under `dist/` is written, since the
//!    home route overwrites `dist/index.html`.
//! 3. For every route, in parallel: render, resolve metadata, compose, write.
//! 4. Write `sitemap.xml`, `robots.txt` and `404.html`.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                       # /
//! ├── 404.html                         # home markup, home title
//! ├── robots.txt
//! ├── sitemap.xml
//! ├── projects/
//! │   ├── index.html                   # /projects
//! │   └── erzengel-ecommerce/
//! │       └── index.html               # /projects/erzengel-ecommerce
//! ├── articles/
//! │   └── ...
//! ├── experience/index.html
//! └── contact/index.html
//! ```
//!
//! Any failure aborts the build. Files already written stay on disk, but
//! the command exits non-zero.

use crate::compose::{Template, TemplateError, compose, compose_not_found};
use crate::config::{self, ConfigError};
use crate::content::{Catalog, ContentError};
use crate::context::SiteContext;
use crate::metadata;
use crate::origin::SiteOrigin;
use crate::render;
use crate::route;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Template error in {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        source: TemplateError,
    },
    #[error(
        "No client template found at {} or {}; build the client bundle first",
        .primary.display(),
        .alternate.display()
    )]
    MissingTemplate { primary: PathBuf, alternate: PathBuf },
}

/// Inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub content_dir: PathBuf,
    pub dist_dir: PathBuf,
    /// `site.toml`; stock defaults when the file does not exist
    pub config_path: PathBuf,
    /// Base URL from the environment (`$SITE_URL`, else `$VITE_SITE_URL`)
    pub base_url_env: Option<String>,
    /// "Now" for the experience timeline
    pub today: NaiveDate,
}

/// What a build wrote.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub origin: SiteOrigin,
    pub template_path: PathBuf,
    pub dist_dir: PathBuf,
    /// Every prerendered route, in enumeration order
    pub routes: Vec<String>,
    pub articles: usize,
    pub projects: usize,
}

/// Load config and content into the immutable context shared by all routes.
pub fn load_context(options: &BuildOptions) -> Result<SiteContext, GenerateError> {
    let config = config::load_config(&options.config_path)?;
    let base_url = config::effective_base_url(&config, options.base_url_env.clone());
    let catalog = Catalog::load(&options.content_dir)?;
    Ok(SiteContext::new(config, &base_url, catalog, options.today))
}

/// Run the full prerender.
pub fn build(options: &BuildOptions) -> Result<BuildReport, GenerateError> {
    let ctx = load_context(options)?;
    let (template_path, template) = load_template(&options.dist_dir, &ctx.config.template.mount_id)?;
    let dist = &options.dist_dir;

    let routes = route::routes(&ctx.catalog);
    tracing::info!(
        routes = routes.len(),
        origin = %ctx.origin,
        template = %template_path.display(),
        "prerendering"
    );

    routes
        .par_iter()
        .try_for_each(|route| write_route(&ctx, &template, dist, route))?;

    write_file(&dist.join("sitemap.xml"), &sitemap_xml(&ctx.origin, &routes))?;
    write_file(&dist.join("robots.txt"), &robots_txt(&ctx.origin))?;

    let home_markup = render::render(&ctx, "/");
    let home_title = metadata::resolve(&ctx, "/").title;
    write_file(
        &dist.join("404.html"),
        &compose_not_found(&template, &home_markup, Some(&home_title)),
    )?;
    tracing::info!(dist = %dist.display(), "wrote sitemap.xml, robots.txt, 404.html");

    Ok(BuildReport {
        origin: ctx.origin.clone(),
        template_path,
        dist_dir: dist.clone(),
        articles: ctx.catalog.articles().len(),
        projects: ctx.catalog.projects().len(),
        routes,
    })
}

/// Find and read the client bundle template.
///
/// Checks `<dist>/index.html` first, then `<dist>/client/index.html`.
pub fn load_template(dist: &Path, mount_id: &str) -> Result<(PathBuf, Template), GenerateError> {
    let primary = dist.join("index.html");
    let alternate = dist.join("client").join("index.html");
    let path = if primary.is_file() {
        primary
    } else if alternate.is_file() {
        alternate
    } else {
        return Err(GenerateError::MissingTemplate { primary, alternate });
    };
    let raw = fs::read_to_string(&path)?;
    let template = Template::new(raw, mount_id).map_err(|source| GenerateError::Template {
        path: path.clone(),
        source,
    })?;
    Ok((path, template))
}

/// Output file for a route: `<dist>/index.html` for the root, else
/// `<dist>/<route>/index.html`.
pub fn route_output_path(dist: &Path, route: &str) -> PathBuf {
    let relative = route.trim_matches('/');
    if relative.is_empty() {
        dist.join("index.html")
    } else {
        dist.join(relative).join("index.html")
    }
}

fn write_route(
    ctx: &SiteContext,
    template: &Template,
    dist: &Path,
    route: &str,
) -> Result<(), GenerateError> {
    let markup = render::render(ctx, route);
    let meta = metadata::resolve(ctx, route);
    let doc = compose(template, &markup, &meta, &ctx.origin, route);
    let path = route_output_path(dist, route);
    write_file(&path, &doc)?;
    tracing::debug!(route, path = %path.display(), "prerendered");
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// `sitemap.xml` listing one `<url>` per route.
pub fn sitemap_xml(origin: &SiteOrigin, routes: &[String]) -> String {
    let urls = routes
        .iter()
        .map(|route| format!("  <url><loc>{}</loc></url>", escape_xml(&origin.url(route))))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {urls}\n\
         </urlset>"
    )
}

pub fn robots_txt(origin: &SiteOrigin) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}\n",
        origin.url("/sitemap.xml")
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
