//! The immutable inputs shared by every route.

use crate::config::SiteConfig;
use crate::content::Catalog;
use crate::origin::SiteOrigin;
use chrono::NaiveDate;

/// Everything the metadata resolver and page renderer read.
///
/// Built once per build and only ever borrowed, so routes can be processed
/// in parallel without coordination.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub config: SiteConfig,
    pub origin: SiteOrigin,
    pub catalog: Catalog,
    /// "Now" for the experience timeline. Fixed per build so rendering is
    /// deterministic.
    pub today: NaiveDate,
}

impl SiteContext {
    pub fn new(config: SiteConfig, base_url: &str, catalog: Catalog, today: NaiveDate) -> Self {
        Self {
            origin: SiteOrigin::from_base_url(base_url),
            config,
            catalog,
            today,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.config.site.name
    }
}
