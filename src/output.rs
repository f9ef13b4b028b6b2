//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is information-centric, not file-centric. Every content item leads
//! with its positional index and title; source files and secondary fields
//! follow as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Articles
//! 001 Event-Driven NestJS
//!     Source: articles/event-driven-nestjs.md
//!     Date: 2024-10-23
//!     Excerpt: Kafka and RabbitMQ in practice.
//!
//! Projects
//! 001 erzengel | E-commerce Platform
//!     Source: projects/erzengel-ecommerce.md
//!     Category: Next.js & NestJS
//!     Stack: Next.js, NestJS
//!
//! Site
//!     Name: Yuben Bauty
//!     Origin: https://yuben.me
//!     Experience: 2 roles
//! ```
//!
//! ## Build
//!
//! ```text
//! / → index.html
//! /projects → projects/index.html
//! /articles/event-driven-nestjs → articles/event-driven-nestjs/index.html
//! sitemap.xml (10 URLs)
//! robots.txt
//! 404.html
//! Prerendered 10 routes (3 articles, 2 projects) for https://yuben.me
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::context::SiteContext;
use crate::generate::BuildReport;
use std::path::Path;

/// Characters of an excerpt shown before truncating.
const EXCERPT_PREVIEW: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Source path relative to the content root when possible.
fn source_line(source: &Path, content_root: &Path) -> String {
    let relative = source.strip_prefix(content_root).unwrap_or(source);
    format!("    Source: {}", relative.display())
}

/// Output file for a route, relative to the dist directory.
fn output_file(route: &str) -> String {
    match route.trim_matches('/') {
        "" => "index.html".to_string(),
        relative => format!("{relative}/index.html"),
    }
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of the loaded content and site settings.
pub fn format_check_output(ctx: &SiteContext, content_root: &Path) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    if ctx.catalog.articles().is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, article) in ctx.catalog.articles().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), article.title));
        lines.push(source_line(&article.source, content_root));
        if !article.date.is_empty() {
            lines.push(format!("    Date: {}", article.date));
        }
        if !article.excerpt.is_empty() {
            lines.push(format!(
                "    Excerpt: {}",
                truncate(&article.excerpt, EXCERPT_PREVIEW)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Projects".to_string());
    if ctx.catalog.projects().is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, project) in ctx.catalog.projects().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), project.title));
        lines.push(source_line(&project.source, content_root));
        if !project.category.is_empty() {
            lines.push(format!("    Category: {}", project.category));
        }
        if !project.stack.is_empty() {
            lines.push(format!("    Stack: {}", project.stack.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push("Site".to_string());
    lines.push(format!("    Name: {}", ctx.site_name()));
    lines.push(format!("    Origin: {}", ctx.origin));
    lines.push(format!(
        "    Experience: {}",
        plural(ctx.config.experience.len(), "role", "roles")
    ));
    lines
}

pub fn print_check_output(ctx: &SiteContext, content_root: &Path) {
    for line in format_check_output(ctx, content_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes
// ============================================================================

/// One route per line, for piping.
pub fn format_routes(routes: &[String]) -> Vec<String> {
    routes.to_vec()
}

pub fn print_routes(routes: &[String]) {
    for line in format_routes(routes) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Each route with the file it was written to, then the crawler files and
/// a summary line.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .routes
        .iter()
        .map(|route| format!("{} \u{2192} {}", route, output_file(route)))
        .collect();
    lines.push(format!(
        "sitemap.xml ({})",
        plural(report.routes.len(), "URL", "URLs")
    ));
    lines.push("robots.txt".to_string());
    lines.push("404.html".to_string());
    lines.push(format!(
        "Prerendered {} ({}, {}) for {}",
        plural(report.routes.len(), "route", "routes"),
        plural(report.articles, "article", "articles"),
        plural(report.projects, "project", "projects"),
        report.origin
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
