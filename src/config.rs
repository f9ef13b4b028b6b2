//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! the base layer; a user `site.toml` overrides any subset of keys on top.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Yuben Bauty"                    # Suffix of every page title
//! tagline = "Software Engineer"           # Home page title suffix
//! description = "Modern web & mobile solutions."
//! base_url = "https://yuben.me"           # Overridden by $SITE_URL / $VITE_SITE_URL
//! locale = "en_US"
//! # image = "/og-image.png"               # Default link-preview image
//!
//! [person]
//! name = "Yuben Rizky Putra Bauty"
//! job_title = "Software Engineer"
//! email = "yubenbauty@gmail.com"
//! same_as = ["https://github.com/yubenB/"]
//!
//! [template]
//! mount_id = "root"                       # <div id="root"></div> in index.html
//!
//! [[experience]]
//! company = "Rakhasa Artha Wisesa Corp"
//! title = "Backend Developer"
//! start = "2024-10-23"
//! current = true
//! ```
//!
//! Unknown keys are rejected to catch typos early. `[[experience]]` is an
//! array: a user file that lists roles replaces the stock list entirely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variables that override `site.base_url`, first non-empty wins.
/// `VITE_SITE_URL` is the name the client bundler's build already uses.
pub const BASE_URL_ENV: [&str; 2] = ["SITE_URL", "VITE_SITE_URL"];

/// The first non-empty [`BASE_URL_ENV`] value, read through `lookup`.
pub fn base_url_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    BASE_URL_ENV
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in titles, descriptions and link previews.
    pub site: SiteSection,
    /// The person the portfolio is about (JSON-LD `Person`, home page).
    pub person: PersonConfig,
    /// Client bundle template settings.
    pub template: TemplateConfig,
    /// Roles shown on the experience page, newest first.
    pub experience: Vec<Role>,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.template.mount_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "template.mount_id must not be empty".into(),
            ));
        }
        for role in &self.experience {
            parse_role_date(&role.start).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "experience start date for {} must be YYYY-MM-DD, got {:?}",
                    role.company, role.start
                ))
            })?;
            if let Some(end) = &role.end {
                parse_role_date(end).ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "experience end date for {} must be YYYY-MM-DD, got {:?}",
                        role.company, end
                    ))
                })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub name: String,
    pub tagline: String,
    pub description: String,
    /// Public base URL. Scheme, `www.` and trailing slash are normalized away
    /// when the origin is derived.
    pub base_url: String,
    pub locale: String,
    /// Link-preview image for pages without one of their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Yuben Bauty".to_string(),
            tagline: "Software Engineer".to_string(),
            description: "Modern web & mobile solutions.".to_string(),
            base_url: "https://yuben.me".to_string(),
            locale: "en_US".to_string(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersonConfig {
    pub name: String,
    pub job_title: String,
    /// Home page headline.
    pub headline: String,
    /// Home page introduction, one entry per paragraph.
    pub bio: Vec<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Profile URLs (JSON-LD `sameAs`, contact page links).
    pub same_as: Vec<String>,
    /// Technology chips on the home page.
    pub technologies: Vec<String>,
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            name: "Yuben Rizky Putra Bauty".to_string(),
            job_title: "Software Engineer".to_string(),
            headline: "Software Engineer Crafting Modern Web & Mobile Solutions.".to_string(),
            bio: vec![
                "Hi, I'm Yuben Rizky Putra Bauty, a passionate Software Engineer focused on \
                 backend systems, mobile apps, and web development."
                    .to_string(),
                "Outside of work, I freelance on React Native mobile apps that solve \
                 real-world problems, from forest monitoring to insurance claim processing."
                    .to_string(),
            ],
            email: "yubenbauty@gmail.com".to_string(),
            image: None,
            same_as: vec![
                "https://www.linkedin.com/in/yuben-bauty/".to_string(),
                "https://github.com/yubenB/".to_string(),
                "https://www.instagram.com/yuben.rpb".to_string(),
            ],
            technologies: [
                "JavaScript",
                "TypeScript",
                "Node.js",
                "NestJS",
                "React",
                "Next.js",
                "React Native",
                "PostgreSQL",
                "Docker",
                "Kubernetes",
                "RabbitMQ",
                "Go",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// `id` of the empty mount element the rendered markup goes into.
    pub mount_id: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            mount_id: "root".to_string(),
        }
    }
}

/// A position on the experience timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub company: String,
    pub title: String,
    /// ISO date (`YYYY-MM-DD`).
    pub start: String,
    /// ISO date; absent for ongoing roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,
}

impl Role {
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_role_date(&self.start)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.as_deref().and_then(parse_role_date)
    }
}

fn parse_role_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// The stock experience timeline.
fn default_roles() -> Vec<Role> {
    vec![
        Role {
            company: "Rakhasa Artha Wisesa Corp".to_string(),
            title: "Backend Developer".to_string(),
            start: "2024-10-23".to_string(),
            end: None,
            current: true,
            responsibilities: vec![
                "Design and implement REST APIs with Node.js/TypeScript".to_string(),
                "Build data models, migrations, and queries (PostgreSQL/Prisma)".to_string(),
                "Integrate authentication/authorization and request validation".to_string(),
            ],
        },
        Role {
            company: "Rapit Solution".to_string(),
            title: "Mobile Developer Freelance".to_string(),
            start: "2023-07-06".to_string(),
            end: None,
            current: true,
            responsibilities: vec![
                "Develop cross-platform mobile apps (React Native)".to_string(),
                "Integrate APIs, push notifications, and third-party SDKs".to_string(),
            ],
        },
    ]
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// The experience list is part of the stock layer so a user file without
/// `[[experience]]` keeps it.
pub fn stock_defaults_value() -> toml::Value {
    let stock = SiteConfig {
        experience: default_roles(),
        ..SiteConfig::default()
    };
    toml::Value::try_from(stock).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value (arrays included)
/// replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value. `Ok(None)` if the file is absent.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config from `path`, falling back to stock defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    let config = resolve_config(overlay)?;
    tracing::debug!(path = %path.display(), site = %config.site.name, "loaded site config");
    Ok(config)
}

/// The base URL to derive the site origin from: the environment value (see
/// [`base_url_from_env`]) when non-empty, otherwise `site.base_url`.
pub fn effective_base_url(config: &SiteConfig, env_value: Option<String>) -> String {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| config.site.base_url.clone())
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "Projects | Yuben Bauty".
name = "Yuben Bauty"

# Home page title is "<name> | <tagline>".
tagline = "Software Engineer"

# Home page meta description.
description = "Modern web & mobile solutions."

# Public base URL. The SITE_URL (or VITE_SITE_URL) environment variable
# takes precedence.
# Canonical URLs always use https, drop a leading "www." and the trailing slash.
base_url = "https://yuben.me"

locale = "en_US"

# Link-preview image for pages without their own (absolute URL or site path).
# image = "/og-image.png"

# ---------------------------------------------------------------------------
# Person (home page, JSON-LD Person)
# ---------------------------------------------------------------------------
[person]
name = "Yuben Rizky Putra Bauty"
job_title = "Software Engineer"
headline = "Software Engineer Crafting Modern Web & Mobile Solutions."
bio = [
    "Hi, I'm Yuben Rizky Putra Bauty, a passionate Software Engineer focused on backend systems, mobile apps, and web development.",
    "Outside of work, I freelance on React Native mobile apps that solve real-world problems, from forest monitoring to insurance claim processing.",
]
email = "yubenbauty@gmail.com"
# image = "/images/profile.jpg"
same_as = [
    "https://www.linkedin.com/in/yuben-bauty/",
    "https://github.com/yubenB/",
    "https://www.instagram.com/yuben.rpb",
]
technologies = ["JavaScript", "TypeScript", "Node.js", "NestJS", "React", "Next.js", "React Native", "PostgreSQL", "Docker", "Kubernetes", "RabbitMQ", "Go"]

# ---------------------------------------------------------------------------
# Client bundle template
# ---------------------------------------------------------------------------
[template]
# index.html must contain exactly one empty <div id="<mount_id>"></div>.
mount_id = "root"

# ---------------------------------------------------------------------------
# Experience timeline (listing any role replaces the whole stock list)
# ---------------------------------------------------------------------------
[[experience]]
company = "Rakhasa Artha Wisesa Corp"
title = "Backend Developer"
start = "2024-10-23"
current = true
responsibilities = [
    "Design and implement REST APIs with Node.js/TypeScript",
    "Build data models, migrations, and queries (PostgreSQL/Prisma)",
    "Integrate authentication/authorization and request validation",
]

[[experience]]
company = "Rapit Solution"
title = "Mobile Developer Freelance"
start = "2023-07-06"
current = true
responsibilities = [
    "Develop cross-platform mobile apps (React Native)",
    "Integrate APIs, push notifications, and third-party SDKs",
]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Yuben Bauty");
        assert_eq!(config.site.base_url, "https://yuben.me");
        assert_eq!(config.template.mount_id, "root");
        assert!(config.site.image.is_none());
    }

    #[test]
    fn load_config_returns_stock_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(config.site.name, "Yuben Bauty");
        assert_eq!(config.experience.len(), 2);
        assert_eq!(config.experience[0].company, "Rakhasa Artha Wisesa Corp");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[site]
name = "Jane Doe"
image = "/og.png"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site.name, "Jane Doe");
        assert_eq!(config.site.image.as_deref(), Some("/og.png"));
        assert_eq!(config.site.tagline, "Software Engineer");
        assert_eq!(config.person.email, "yubenbauty@gmail.com");
        assert_eq!(config.experience.len(), 2);
    }

    #[test]
    fn experience_list_replaces_stock_roles() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[experience]]
company = "Acme"
title = "Engineer"
start = "2020-01-01"
end = "2021-06-30"
"#,
        )
        .unwrap();
        let config = resolve_config(Some(overlay)).unwrap();
        assert_eq!(config.experience.len(), 1);
        let role = &config.experience[0];
        assert_eq!(role.company, "Acme");
        assert!(!role.current);
        assert_eq!(role.end_date(), NaiveDate::from_ymd_opt(2021, 6, 30));
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str("[site]\nnmae = \"typo\"\n").unwrap();
        assert!(resolve_config(Some(overlay)).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let overlay: toml::Value = toml::from_str("[theme]\ncolor = \"red\"\n").unwrap();
        assert!(resolve_config(Some(overlay)).is_err());
    }

    #[test]
    fn empty_site_name_rejected() {
        let overlay: toml::Value = toml::from_str("[site]\nname = \"  \"\n").unwrap();
        let err = resolve_config(Some(overlay)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn empty_mount_id_rejected() {
        let overlay: toml::Value = toml::from_str("[template]\nmount_id = \"\"\n").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn bad_role_date_rejected() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[experience]]
company = "Acme"
title = "Engineer"
start = "last spring"
"#,
        )
        .unwrap();
        let err = resolve_config(Some(overlay)).unwrap_err();
        assert!(err.to_string().contains("Acme"));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_array_replaces() {
        let base: toml::Value = toml::from_str("list = [1, 2, 3]\n").unwrap();
        let overlay: toml::Value = toml::from_str("list = [9]\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["list"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn env_base_url_takes_precedence() {
        let config = SiteConfig::default();
        assert_eq!(
            effective_base_url(&config, Some("http://www.Example.com/".into())),
            "http://www.Example.com/"
        );
        assert_eq!(effective_base_url(&config, Some("  ".into())), "https://yuben.me");
        assert_eq!(effective_base_url(&config, None), "https://yuben.me");
    }

    #[test]
    fn site_url_env_preferred_over_vite_alias() {
        let both = |name: &str| match name {
            "SITE_URL" => Some("https://a.example".to_string()),
            "VITE_SITE_URL" => Some("https://b.example".to_string()),
            _ => None,
        };
        assert_eq!(base_url_from_env(both).as_deref(), Some("https://a.example"));

        let vite_only =
            |name: &str| (name == "VITE_SITE_URL").then(|| "https://b.example".to_string());
        assert_eq!(base_url_from_env(vite_only).as_deref(), Some("https://b.example"));

        let blank_primary = |name: &str| match name {
            "SITE_URL" => Some(" ".to_string()),
            "VITE_SITE_URL" => Some("https://b.example".to_string()),
            _ => None,
        };
        assert_eq!(base_url_from_env(blank_primary).as_deref(), Some("https://b.example"));
        assert_eq!(base_url_from_env(|_| None), None);
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let parsed: SiteConfig = value.try_into().unwrap();
        assert_eq!(parsed.site.name, SiteConfig::default().site.name);
        assert_eq!(parsed.template.mount_id, "root");
        assert_eq!(parsed.experience, default_roles());
    }

    #[test]
    fn stock_defaults_validate() {
        assert!(resolve_config(None).is_ok());
    }
}
