//! Canonical site origin.
//!
//! Every absolute URL the build emits (canonical links, `og:url`, sitemap
//! entries, JSON-LD ids) is built from one [`SiteOrigin`]. The origin is
//! derived once from the configured base URL and normalized so that
//! `http://www.Example.com/`, `https://example.com` and
//! `https://www.example.com/` all canonicalize to `https://example.com`.

use std::fmt;
use url::Url;

/// Origin used when the configured base URL is missing or unparseable.
pub const FALLBACK_ORIGIN: &str = "https://yuben.me";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin(String);

impl SiteOrigin {
    /// Derive the origin from a base URL.
    ///
    /// Forces `https`, lowercases the host, strips a leading `www.`, keeps an
    /// explicit port and drops any path, query or fragment. Falls back to
    /// [`FALLBACK_ORIGIN`] when `raw` cannot be parsed as a URL with a host.
    pub fn from_base_url(raw: &str) -> Self {
        match Self::parse(raw) {
            Some(origin) => origin,
            None => {
                tracing::warn!(base_url = raw, fallback = FALLBACK_ORIGIN, "unparseable base URL");
                Self(FALLBACK_ORIGIN.to_string())
            }
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let url = Url::parse(raw.trim()).ok()?;
        let host = url.host_str()?.to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        if host.is_empty() {
            return None;
        }
        let origin = match url.port() {
            Some(port) => format!("https://{host}:{port}"),
            None => format!("https://{host}"),
        };
        Some(Self(origin))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL for a site path. `path` is expected to be a route
    /// (leading slash); one is added if missing.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.0, path)
        } else {
            format!("{}/{}", self.0, path)
        }
    }

    /// Resolve an image reference: absolute URLs (anything with a scheme)
    /// pass through, everything else is joined onto the origin.
    pub fn resolve_image(&self, reference: &str) -> String {
        if has_scheme(reference) {
            reference.to_string()
        } else {
            self.url(reference)
        }
    }
}

impl fmt::Display for SiteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `scheme:` prefix per RFC 3986 (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`),
/// plus protocol-relative `//host/...` references.
fn has_scheme(reference: &str) -> bool {
    if reference.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_forces_https_and_strips_www() {
        let origin = SiteOrigin::from_base_url("http://www.Example.com/");
        assert_eq!(origin.as_str(), "https://example.com");
    }

    #[test]
    fn equivalent_base_urls_canonicalize_identically() {
        let variants = [
            "https://example.com",
            "https://example.com/",
            "http://example.com",
            "https://www.example.com/",
            "HTTP://WWW.EXAMPLE.COM",
        ];
        for v in variants {
            assert_eq!(SiteOrigin::from_base_url(v).as_str(), "https://example.com", "{v}");
        }
    }

    #[test]
    fn origin_drops_path_keeps_port() {
        let origin = SiteOrigin::from_base_url("http://localhost:4173/app/");
        assert_eq!(origin.as_str(), "https://localhost:4173");
    }

    #[test]
    fn unparseable_base_url_falls_back() {
        assert_eq!(SiteOrigin::from_base_url("not a url").as_str(), FALLBACK_ORIGIN);
        assert_eq!(SiteOrigin::from_base_url("").as_str(), FALLBACK_ORIGIN);
    }

    #[test]
    fn url_joins_paths() {
        let origin = SiteOrigin::from_base_url("https://example.com");
        assert_eq!(origin.url("/"), "https://example.com/");
        assert_eq!(origin.url("/articles"), "https://example.com/articles");
        assert_eq!(origin.url("images/a.png"), "https://example.com/images/a.png");
    }

    #[test]
    fn absolute_images_pass_through() {
        let origin = SiteOrigin::from_base_url("https://example.com");
        assert_eq!(
            origin.resolve_image("https://cdn.test/a.png"),
            "https://cdn.test/a.png"
        );
        assert_eq!(origin.resolve_image("//cdn.test/a.png"), "//cdn.test/a.png");
        assert_eq!(
            origin.resolve_image("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn relative_images_get_origin() {
        let origin = SiteOrigin::from_base_url("https://example.com");
        assert_eq!(
            origin.resolve_image("/images/a.png"),
            "https://example.com/images/a.png"
        );
        assert_eq!(
            origin.resolve_image("images/a.png"),
            "https://example.com/images/a.png"
        );
    }
}
