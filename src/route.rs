//! Route enumeration and classification.
//!
//! A route is a normalized absolute path: leading slash, no trailing slash
//! except for the root. The full route set is the fixed top-level pages
//! followed by one detail route per catalog item.
//!
//! [`RouteKind::classify`] is the single place that understands route
//! shapes. The metadata resolver and the page renderer both dispatch on its
//! result, so every enumerated route is guaranteed a matching branch in
//! each of them.

use crate::content::Catalog;

/// Top-level pages with fixed paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPage {
    Home,
    Projects,
    Articles,
    Experience,
    Contact,
}

impl StaticPage {
    /// In route-enumeration and navigation order.
    pub const ALL: [StaticPage; 5] = [
        StaticPage::Home,
        StaticPage::Projects,
        StaticPage::Articles,
        StaticPage::Experience,
        StaticPage::Contact,
    ];

    pub fn path(self) -> &'static str {
        match self {
            StaticPage::Home => "/",
            StaticPage::Projects => "/projects",
            StaticPage::Articles => "/articles",
            StaticPage::Experience => "/experience",
            StaticPage::Contact => "/contact",
        }
    }

    /// Navigation label and page-title prefix.
    pub fn label(self) -> &'static str {
        match self {
            StaticPage::Home => "Home",
            StaticPage::Projects => "Projects",
            StaticPage::Articles => "Articles",
            StaticPage::Experience => "Experience",
            StaticPage::Contact => "Contact",
        }
    }

    fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }
}

/// What a path points at, decided once from its shape alone.
///
/// Detail variants carry the slug but say nothing about whether the catalog
/// contains it; consumers look it up and fall back on a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    ArticleDetail(String),
    ProjectDetail(String),
    StaticPage(StaticPage),
    Unknown,
}

impl RouteKind {
    pub fn classify(path: &str) -> Self {
        let path = canonicalize(path);
        if let Some(slug) = detail_slug(&path, "/articles/") {
            return RouteKind::ArticleDetail(slug.to_string());
        }
        if let Some(slug) = detail_slug(&path, "/projects/") {
            return RouteKind::ProjectDetail(slug.to_string());
        }
        match StaticPage::from_path(&path) {
            Some(page) => RouteKind::StaticPage(page),
            None => RouteKind::Unknown,
        }
    }
}

/// One non-empty path segment after `prefix`.
fn detail_slug<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let slug = path.strip_prefix(prefix)?;
    (!slug.is_empty() && !slug.contains('/')).then_some(slug)
}

/// Normalize a request path into route form.
///
/// Drops any query string or fragment, ensures a leading slash and strips a
/// trailing slash unless the path is the root.
pub fn canonicalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut route = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if route.len() > 1 && route.ends_with('/') {
        route.pop();
    }
    route
}

pub fn article_route(slug: &str) -> String {
    format!("/articles/{slug}")
}

pub fn project_route(slug: &str) -> String {
    format!("/projects/{slug}")
}

/// Every route to prerender: static pages, then articles, then projects,
/// each in catalog order.
pub fn routes(catalog: &Catalog) -> Vec<String> {
    StaticPage::ALL
        .iter()
        .map(|p| p.path().to_string())
        .chain(catalog.articles().iter().map(|a| article_route(&a.slug)))
        .chain(catalog.projects().iter().map(|p| project_route(&p.slug)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_catalog;
    use std::collections::HashSet;

    #[test]
    fn routes_start_with_static_pages() {
        let catalog = Catalog::default();
        assert_eq!(
            routes(&catalog),
            ["/", "/projects", "/articles", "/experience", "/contact"]
        );
    }

    #[test]
    fn routes_include_one_entry_per_item() {
        let catalog = sample_catalog();
        let all = routes(&catalog);
        assert_eq!(
            all.len(),
            5 + catalog.articles().len() + catalog.projects().len()
        );
        assert!(all.contains(&"/articles/event-driven-nestjs".to_string()));
        assert!(all.contains(&"/projects/erzengel-ecommerce".to_string()));
    }

    #[test]
    fn routes_have_no_duplicates() {
        let all = routes(&sample_catalog());
        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn routes_are_already_canonical() {
        for route in routes(&sample_catalog()) {
            assert_eq!(canonicalize(&route), route);
        }
    }

    #[test]
    fn canonicalize_strips_trailing_slash_except_root() {
        assert_eq!(canonicalize("/"), "/");
        assert_eq!(canonicalize("/projects/"), "/projects");
        assert_eq!(canonicalize("/articles/x/"), "/articles/x");
        assert_eq!(canonicalize(""), "/");
    }

    #[test]
    fn canonicalize_adds_leading_slash_and_drops_query() {
        assert_eq!(canonicalize("contact"), "/contact");
        assert_eq!(canonicalize("/articles?q=rust"), "/articles");
        assert_eq!(canonicalize("/contact#form"), "/contact");
    }

    #[test]
    fn classify_detail_routes() {
        assert_eq!(
            RouteKind::classify("/articles/hello"),
            RouteKind::ArticleDetail("hello".into())
        );
        assert_eq!(
            RouteKind::classify("/projects/world/"),
            RouteKind::ProjectDetail("world".into())
        );
    }

    #[test]
    fn classify_static_pages() {
        for page in StaticPage::ALL {
            assert_eq!(RouteKind::classify(page.path()), RouteKind::StaticPage(page));
        }
    }

    #[test]
    fn classify_unknown_shapes() {
        assert_eq!(RouteKind::classify("/nonexistent"), RouteKind::Unknown);
        assert_eq!(RouteKind::classify("/articles/a/b"), RouteKind::Unknown);
        assert_eq!(RouteKind::classify("/about"), RouteKind::Unknown);
    }

    #[test]
    fn every_enumerated_route_classifies() {
        for route in routes(&sample_catalog()) {
            assert_ne!(RouteKind::classify(&route), RouteKind::Unknown, "{route}");
        }
    }
}
