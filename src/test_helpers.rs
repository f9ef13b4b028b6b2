//! Shared test utilities for the folio test suite.
//!
//! Provides content fixtures on disk and in memory, a render context with a
//! fixed date and origin, and a client bundle template pre-seeded with the
//! default head tags composing must replace.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_content();
//! let catalog = Catalog::load(tmp.path()).unwrap();
//!
//! let ctx = sample_context();
//! let meta = metadata::resolve(&ctx, "/articles/event-driven-nestjs");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::{PersonConfig, Role, SiteConfig};
use crate::content::{Catalog, parse_article, parse_project};
use crate::context::SiteContext;
use chrono::NaiveDate;

// =========================================================================
// Content fixtures
// =========================================================================

pub const ARTICLE_NESTJS: &str = "\
---
title: \"Event-Driven NestJS\"
date: 2024-10-23
readingTime: 6 min read
thumbnail: /images/kafka.png
excerpt: Kafka and RabbitMQ in practice.
---

## Why events

Services talk through **brokers**.

| Broker | Use |
|--------|-----|
| Kafka | streams |
| RabbitMQ | queues |
";

pub const ARTICLE_OFFLINE: &str = "\
---
title: Offline-First React Native
date: 2024-03-01
readingTime: 4 min read
---

Field teams lose signal for hours at a time, so every write goes through a local sync queue before it reaches the API.
";

pub const ARTICLE_YEAR: &str = "\
---
title: A Year in Review
date: 2023-12-31
readingTime: 3 min read
---

Shipped two apps and one backend.
";

pub const ARTICLE_UNDATED: &str = "\
---
title: Undated Notes
date: N/A
---
";

pub const PROJECT_ERZENGEL: &str = "\
---
title: erzengel | E-commerce Platform
category: Next.js & NestJS
liveUrl: https://erzengel.id
stack:
  - Next.js
  - NestJS
images:
  - https://cdn.example.net/erzengel.png
  - /images/erzengel/2.png
---

## Overview

A storefront with a headless commerce backend.
";

pub const PROJECT_SIMONTANA: &str = "\
---
title: Simontana | Forest Monitoring
category: React Native
excerpt: Offline forest patrol reporting.
stack:
  - React Native
---

Patrol reports captured offline and synced later.
";

/// Write one content file under `<root>/<kind_dir>/`, creating the directory.
pub fn write_content(root: &Path, kind_dir: &str, filename: &str, text: &str) {
    let dir = root.join(kind_dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(filename), text).unwrap();
}

/// A content tree with three dated articles and two projects.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_content(tmp.path(), "articles", "event-driven-nestjs.md", ARTICLE_NESTJS);
    write_content(tmp.path(), "articles", "react-native-offline.md", ARTICLE_OFFLINE);
    write_content(tmp.path(), "articles", "year-in-review.md", ARTICLE_YEAR);
    write_content(tmp.path(), "projects", "erzengel-ecommerce.md", PROJECT_ERZENGEL);
    write_content(tmp.path(), "projects", "simontana-forest.md", PROJECT_SIMONTANA);
    tmp
}

/// An in-memory catalog: two dated articles, one undated article with an
/// empty body, and two projects.
pub fn sample_catalog() -> Catalog {
    let article = |slug: &str, text: &str| {
        parse_article(Path::new(&format!("content/articles/{slug}.md")), text)
    };
    let project = |slug: &str, text: &str| {
        parse_project(Path::new(&format!("content/projects/{slug}.md")), text)
    };
    Catalog::new(
        vec![
            article("event-driven-nestjs", ARTICLE_NESTJS),
            article("react-native-offline", ARTICLE_OFFLINE),
            article("undated-notes", ARTICLE_UNDATED),
        ],
        vec![
            project("erzengel-ecommerce", PROJECT_ERZENGEL),
            project("simontana-forest", PROJECT_SIMONTANA),
        ],
    )
    .unwrap()
}

// =========================================================================
// Render context
// =========================================================================

/// The fixed "today" used by every fixture context.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

/// Site config for a fictional person, with one ongoing and one finished role.
pub fn sample_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.site.name = "Test Person".into();
    config.site.tagline = "Software Engineer".into();
    config.site.description = "Portfolio of a test person.".into();
    config.person = PersonConfig {
        name: "Test Person".into(),
        job_title: "Software Engineer".into(),
        headline: "Builder of test fixtures.".into(),
        bio: vec!["I write tests.".into()],
        email: "test@example.com".into(),
        image: None,
        same_as: vec!["https://github.com/test".into()],
        technologies: vec!["Rust".into(), "TypeScript".into()],
    };
    config.experience = vec![
        Role {
            company: "Acme Corp".into(),
            title: "Backend Developer".into(),
            start: "2023-11-20".into(),
            end: None,
            current: true,
            responsibilities: vec!["Design REST APIs".into()],
        },
        Role {
            company: "Short Gig Ltd".into(),
            title: "Contractor".into(),
            start: "2022-01-10".into(),
            end: Some("2022-01-25".into()),
            current: false,
            responsibilities: vec![],
        },
    ];
    config
}

/// [`sample_config`] + [`sample_catalog`] served from `https://example.com`.
pub fn sample_context() -> SiteContext {
    SiteContext::new(
        sample_config(),
        "https://example.com",
        sample_catalog(),
        fixed_today(),
    )
}

// =========================================================================
// Client bundle template
// =========================================================================

/// A built `index.html` as the client bundler emits it: default SEO tags
/// in the head and an empty mount element.
pub fn sample_template() -> &'static str {
    r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Vite App</title>
    <meta name="description" content="placeholder" />
    <link rel="canonical" href="https://placeholder.test/" />
    <meta property="og:title" content="placeholder" />
    <meta property="og:type" content="website" />
    <meta name="twitter:card" content="summary" />
    <script type="application/ld+json">{"@type":"Thing"}</script>
    <script type="module" crossorigin src="/assets/index.js"></script>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#
}
