//! Content catalog loading.
//!
//! Stage 1 of the build. Reads the markdown content tree once and produces
//! an immutable [`Catalog`] that every later stage borrows.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── articles/
//! │   ├── event-driven-nestjs.md     # → /articles/event-driven-nestjs
//! │   └── react-native-offline.md
//! └── projects/
//!     ├── erzengel-ecommerce.md      # → /projects/erzengel-ecommerce
//!     └── simontana-forest.md        # slug may be overridden in the header
//! ```
//!
//! Either directory may be missing; it then contributes an empty catalog.
//! Only `*.md` files are read, in sorted path order, so ties in the catalog
//! sort keep filename order.
//!
//! ## Ordering
//!
//! - **Articles**: newest first, by comparing raw `date` strings. ISO dates
//!   sort correctly; anything else sorts lexically.
//! - **Projects**: by title, case-insensitive, ascending.
//!
//! ## Validation
//!
//! Header anomalies never fail the build (see [`crate::frontmatter`]). Two
//! files resolving to the same slug within one catalog do: the second would
//! be unreachable and would overwrite the first's output.

use crate::frontmatter;
use crate::types::{Article, Project, derive_excerpt};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(
        "Duplicate {kind} slug '{slug}' in {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        kind: &'static str,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Both content catalogs, sorted and slug-unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: Vec<Article>,
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog from already-parsed items. Sorts both lists and
    /// rejects duplicate slugs.
    pub fn new(mut articles: Vec<Article>, mut projects: Vec<Project>) -> Result<Self, ContentError> {
        sort_articles(&mut articles);
        sort_projects(&mut projects);
        ensure_unique("article", articles.iter().map(|a| (a.slug.as_str(), &a.source)))?;
        ensure_unique("project", projects.iter().map(|p| (p.slug.as_str(), &p.source)))?;
        Ok(Self { articles, projects })
    }

    /// Load `articles/` and `projects/` under the content root.
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        let articles = load_articles(&root.join("articles"))?;
        let projects = load_projects(&root.join("projects"))?;
        tracing::info!(
            articles = articles.len(),
            projects = projects.len(),
            root = %root.display(),
            "loaded content catalog"
        );
        Self::new(articles, projects)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find_article(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    pub fn find_project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }
}

/// Load every article in `dir`, newest first.
pub fn load_articles(dir: &Path) -> Result<Vec<Article>, ContentError> {
    let mut articles = Vec::new();
    for path in markdown_files(dir)? {
        let raw = fs::read_to_string(&path)?;
        articles.push(parse_article(&path, &raw));
    }
    sort_articles(&mut articles);
    Ok(articles)
}

/// Load every project case study in `dir`, by title.
pub fn load_projects(dir: &Path) -> Result<Vec<Project>, ContentError> {
    let mut projects = Vec::new();
    for path in markdown_files(dir)? {
        let raw = fs::read_to_string(&path)?;
        projects.push(parse_project(&path, &raw));
    }
    sort_projects(&mut projects);
    Ok(projects)
}

/// Parse one article file. Never fails: missing fields default to empty.
pub fn parse_article(path: &Path, raw: &str) -> Article {
    let (header, body) = frontmatter::parse(raw);
    if header.is_empty() {
        tracing::debug!(path = %path.display(), "article has no header block");
    }
    let slug = slug_for(path, header.text("slug"));
    let excerpt = match header.text("excerpt") {
        Some(explicit) => explicit.to_string(),
        None => derive_excerpt(body),
    };
    Article {
        title: header.text("title").unwrap_or(&slug).to_string(),
        date: header.text("date").unwrap_or_default().to_string(),
        reading_time: header.text("readingTime").unwrap_or_default().to_string(),
        thumbnail: header.text("thumbnail").map(String::from),
        excerpt,
        body: body.to_string(),
        source: path.to_path_buf(),
        slug,
    }
}

/// Parse one project file. Never fails: missing fields default to empty.
pub fn parse_project(path: &Path, raw: &str) -> Project {
    let (header, body) = frontmatter::parse(raw);
    if header.is_empty() {
        tracing::debug!(path = %path.display(), "project has no header block");
    }
    let slug = slug_for(path, header.text("slug"));
    Project {
        title: header.text("title").unwrap_or(&slug).to_string(),
        category: header.text("category").unwrap_or_default().to_string(),
        excerpt: header.text("excerpt").unwrap_or_default().to_string(),
        stack: header.list("stack").to_vec(),
        images: header.list("images").to_vec(),
        live_url: header.text("liveUrl").unwrap_or_default().to_string(),
        body: body.trim_end().to_string(),
        source: path.to_path_buf(),
        slug,
    }
}

/// Header `slug:` if it is a single safe path segment, else the file stem.
///
/// A slug becomes both a URL segment and an output directory name, so it may
/// not be empty or `.`/`..`, and may not contain `/`, `\`, `?` or `#`.
fn slug_for(path: &Path, explicit: Option<&str>) -> String {
    if let Some(slug) = explicit.map(str::trim) {
        if is_safe_slug(slug) {
            return slug.to_string();
        }
        tracing::warn!(
            path = %path.display(),
            slug,
            "unusable slug in header; using the file name"
        );
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if is_safe_slug(&stem) {
        return stem;
    }
    let cleaned: String = stem
        .chars()
        .map(|c| if is_slug_separator(c) { '-' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '-' || c == '.');
    let slug = if cleaned.is_empty() { "untitled" } else { cleaned };
    tracing::warn!(path = %path.display(), slug, "file name is not a usable slug");
    slug.to_string()
}

fn is_slug_separator(c: char) -> bool {
    matches!(c, '/' | '\\' | '?' | '#')
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(is_slug_separator)
}

fn sort_articles(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

fn sort_projects(projects: &mut [Project]) {
    projects.sort_by_cached_key(|p| p.title.to_lowercase());
}

fn ensure_unique<'a>(
    kind: &'static str,
    items: impl Iterator<Item = (&'a str, &'a PathBuf)>,
) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &PathBuf> = HashMap::new();
    for (slug, source) in items {
        if let Some(first) = seen.insert(slug, source) {
            return Err(ContentError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
                first: first.clone(),
                second: source.clone(),
            });
        }
    }
    Ok(())
}

/// Markdown files directly inside `dir`, sorted. A missing directory is empty.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "content directory missing; catalog is empty");
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn article_fields_from_header() {
        let raw = "---\ntitle: \"Event-Driven NestJS\"\ndate: 2024-10-23\nreadingTime: 6 min read\nthumbnail: /images/kafka.png\nexcerpt: Short.\n---\n\nBody.";
        let article = parse_article(Path::new("content/articles/nestjs.md"), raw);
        assert_eq!(article.slug, "nestjs");
        assert_eq!(article.title, "Event-Driven NestJS");
        assert_eq!(article.date, "2024-10-23");
        assert_eq!(article.reading_time, "6 min read");
        assert_eq!(article.thumbnail.as_deref(), Some("/images/kafka.png"));
        assert_eq!(article.excerpt, "Short.");
        assert_eq!(article.body, "Body.");
    }

    #[test]
    fn article_slug_header_overrides_filename() {
        let raw = "---\nslug: custom-slug\n---\nx";
        let article = parse_article(Path::new("a/file-name.md"), raw);
        assert_eq!(article.slug, "custom-slug");
        assert_eq!(article.title, "custom-slug");
    }

    #[test]
    fn article_without_header_uses_defaults() {
        let article = parse_article(Path::new("a/plain.md"), "Just text.");
        assert_eq!(article.slug, "plain");
        assert_eq!(article.title, "plain");
        assert_eq!(article.date, "");
        assert_eq!(article.reading_time, "");
        assert!(article.thumbnail.is_none());
        assert_eq!(article.body, "Just text.");
        assert_eq!(article.excerpt, "Just text.");
    }

    #[test]
    fn derived_excerpt_truncates_long_body() {
        let body = "x".repeat(200);
        let raw = format!("---\ntitle: T\n---\n{body}");
        let article = parse_article(Path::new("a/t.md"), &raw);
        assert_eq!(article.excerpt, format!("{}...", "x".repeat(140)));
    }

    #[test]
    fn explicit_excerpt_is_not_truncated() {
        let long = "y".repeat(180);
        let raw = format!("---\nexcerpt: {long}\n---\nbody");
        let article = parse_article(Path::new("a/t.md"), &raw);
        assert_eq!(article.excerpt, long);
    }

    #[test]
    fn project_fields_and_lists() {
        let raw = "---\ntitle: Erzengel | E-commerce\ncategory: Next.js & NestJS\nliveUrl: https://erzengel.id\nstack:\n  - Next.js\n  - NestJS\nimages:\n  - /images/erzengel/1.png\n  - /images/erzengel/2.png\n---\n\n## Overview\n\nText.\n\n";
        let project = parse_project(Path::new("p/erzengel-ecommerce.md"), raw);
        assert_eq!(project.slug, "erzengel-ecommerce");
        assert_eq!(project.title, "Erzengel | E-commerce");
        assert_eq!(project.category, "Next.js & NestJS");
        assert_eq!(project.live_url, "https://erzengel.id");
        assert_eq!(project.stack, vec!["Next.js", "NestJS"]);
        assert_eq!(project.images.len(), 2);
        assert_eq!(project.excerpt, "");
        assert_eq!(project.body, "## Overview\n\nText.");
    }

    #[test]
    fn project_without_header_has_empty_lists() {
        let project = parse_project(Path::new("p/bare.md"), "body");
        assert!(project.stack.is_empty());
        assert!(project.images.is_empty());
        assert_eq!(project.live_url, "");
    }

    #[test]
    fn load_reads_both_catalogs() {
        let tmp = setup_content();
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.articles().len(), 3);
        assert_eq!(catalog.projects().len(), 2);
    }

    #[test]
    fn articles_sorted_newest_first() {
        let tmp = setup_content();
        let catalog = Catalog::load(tmp.path()).unwrap();
        let dates: Vec<&str> = catalog.articles().iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates, ["2024-10-23", "2024-03-01", "2023-12-31"]);
    }

    #[test]
    fn projects_sorted_by_title_case_insensitive() {
        let tmp = setup_content();
        let catalog = Catalog::load(tmp.path()).unwrap();
        let titles: Vec<&str> = catalog.projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["erzengel | E-commerce Platform", "Simontana | Forest Monitoring"]);
    }

    #[test]
    fn slugs_unique_within_catalog() {
        let tmp = setup_content();
        let catalog = Catalog::load(tmp.path()).unwrap();
        let slugs: HashSet<&str> = catalog.articles().iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs.len(), catalog.articles().len());
    }

    #[test]
    fn duplicate_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        write_content(tmp.path(), "articles", "one.md", "---\nslug: same\n---\nA");
        write_content(tmp.path(), "articles", "two.md", "---\nslug: same\n---\nB");
        let result = Catalog::load(tmp.path());
        assert!(matches!(
            result,
            Err(ContentError::DuplicateSlug { kind: "article", .. })
        ));
    }

    #[test]
    fn same_slug_in_different_catalogs_is_fine() {
        let tmp = TempDir::new().unwrap();
        write_content(tmp.path(), "articles", "shared.md", "A");
        write_content(tmp.path(), "projects", "shared.md", "B");
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert!(catalog.find_article("shared").is_some());
        assert!(catalog.find_project("shared").is_some());
    }

    #[test]
    fn missing_directories_give_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert!(catalog.articles().is_empty());
        assert!(catalog.projects().is_empty());
    }

    #[test]
    fn non_markdown_files_ignored() {
        let tmp = TempDir::new().unwrap();
        write_content(tmp.path(), "articles", "notes.txt", "ignored");
        write_content(tmp.path(), "articles", "kept.MD", "kept");
        let articles = load_articles(&tmp.path().join("articles")).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].slug, "kept");
    }

    #[test]
    fn unsafe_header_slug_falls_back_to_file_name() {
        for bad in ["../../outside", "2024/intro", "a\\b", "q?x=1", "frag#top", "..", "   "] {
            let raw = format!("---\nslug: {bad}\n---\nBody");
            let article = parse_article(Path::new("content/articles/intro.md"), &raw);
            assert_eq!(article.slug, "intro", "{bad:?}");
        }
    }

    #[test]
    fn header_slug_is_trimmed() {
        let article = parse_article(Path::new("a/x.md"), "---\nslug: 'custom-slug '\n---\n");
        assert_eq!(article.slug, "custom-slug");
    }

    #[test]
    fn unusable_file_stem_is_cleaned() {
        let project = parse_project(Path::new("p/what#now?.md"), "body");
        assert_eq!(project.slug, "what-now");
        let project = parse_project(Path::new("p/..md"), "body");
        assert_eq!(project.slug, "untitled");
    }

    #[test]
    fn loaded_routes_stay_inside_their_section() {
        let tmp = TempDir::new().unwrap();
        write_content(tmp.path(), "articles", "escape.md", "---\nslug: ../../outside\n---\nA");
        write_content(tmp.path(), "articles", "nested.md", "---\nslug: 2024/intro\n---\nB");
        write_content(tmp.path(), "projects", "weird.md", "---\nslug: a?b#c\n---\nC");
        let catalog = Catalog::load(tmp.path()).unwrap();
        for route in crate::route::routes(&catalog) {
            assert!(!route.contains(".."), "{route}");
            assert_ne!(
                crate::route::RouteKind::classify(&route),
                crate::route::RouteKind::Unknown,
                "{route}"
            );
        }
    }

    #[test]
    fn find_misses_return_none() {
        let catalog = sample_catalog();
        assert!(catalog.find_article("nope").is_none());
        assert!(catalog.find_project("nope").is_none());
    }
}
