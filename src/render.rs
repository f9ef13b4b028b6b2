//! Page rendering.
//!
//! Produces the markup that goes inside the client bundle's mount element
//! for one route. The output matches what the client would render on first
//! paint, so crawlers and no-JS visitors see real content.
//!
//! ## Pages
//!
//! ```text
//! /                  headline, bio, technology chips
//! /projects          project cards
//! /projects/{slug}   case study: screenshots, stack, markdown body
//! /articles          article list with date, reading time, excerpt
//! /articles/{slug}   article: thumbnail, markdown body
//! /experience        role timeline with date ranges and durations
//! /contact           email button and profile links
//! ```
//!
//! Any other path renders the home page. A detail path whose slug is not in
//! the catalog renders a "not found" notice linking back to its listing.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/): all interpolated text is escaped.
//! Markdown bodies are converted with pulldown-cmark and inserted
//! pre-escaped, so raw HTML in content passes through.

use crate::config::Role;
use crate::context::SiteContext;
use crate::route::{RouteKind, StaticPage, article_route, canonicalize, project_route};
use crate::types::{Article, Project};
use chrono::{Datelike, NaiveDate};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

/// Header navigation, in display order.
const NAV: [StaticPage; 5] = [
    StaticPage::Home,
    StaticPage::Projects,
    StaticPage::Experience,
    StaticPage::Articles,
    StaticPage::Contact,
];

/// Render the mount-element markup for `path`.
pub fn render(ctx: &SiteContext, path: &str) -> String {
    let kind = RouteKind::classify(path);
    let active = active_section(&kind);
    let page = match &kind {
        RouteKind::ArticleDetail(slug) => match ctx.catalog.find_article(slug) {
            Some(article) => article_page(article),
            None => not_found("Article not found.", StaticPage::Articles),
        },
        RouteKind::ProjectDetail(slug) => match ctx.catalog.find_project(slug) {
            Some(project) => project_page(project),
            None => not_found("Project not found.", StaticPage::Projects),
        },
        RouteKind::StaticPage(StaticPage::Projects) => projects_page(ctx),
        RouteKind::StaticPage(StaticPage::Articles) => articles_page(ctx),
        RouteKind::StaticPage(StaticPage::Experience) => experience_page(ctx),
        RouteKind::StaticPage(StaticPage::Contact) => contact_page(ctx),
        RouteKind::StaticPage(StaticPage::Home) => home_page(ctx),
        RouteKind::Unknown => {
            tracing::debug!(route = %canonicalize(path), "rendering home for unknown route");
            home_page(ctx)
        }
    };
    layout(ctx, active, page).into_string()
}

/// The nav entry to highlight: detail pages light up their listing.
fn active_section(kind: &RouteKind) -> StaticPage {
    match kind {
        RouteKind::ArticleDetail(_) => StaticPage::Articles,
        RouteKind::ProjectDetail(_) => StaticPage::Projects,
        RouteKind::StaticPage(page) => *page,
        RouteKind::Unknown => StaticPage::Home,
    }
}

/// Convert a markdown body to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Layout
// ============================================================================

fn layout(ctx: &SiteContext, active: StaticPage, page: Markup) -> Markup {
    let (brand_first, brand_rest) = ctx
        .site_name()
        .split_once(' ')
        .unwrap_or((ctx.site_name(), ""));
    html! {
        div.app {
            header.site-header {
                a.brand href="/" {
                    span.brand-first { (brand_first) }
                    @if !brand_rest.is_empty() {
                        " "
                        span.brand-rest { (brand_rest) }
                    }
                }
                nav.site-nav {
                    ul {
                        @for item in NAV {
                            li class=[(item == active).then_some("current")] {
                                a href=(item.path())
                                    aria-current=[(item == active).then_some("page")] {
                                    (item.label())
                                }
                            }
                        }
                    }
                }
            }
            main.site-main {
                (page)
            }
            footer.site-footer {
                p { "© " (ctx.today.year()) " " (ctx.site_name()) }
            }
        }
    }
}

fn not_found(message: &str, listing: StaticPage) -> Markup {
    html! {
        section.not-found {
            p { (message) }
            a.back-link href=(listing.path()) { "Back to " (listing.label()) }
        }
    }
}

fn chips(items: &[String]) -> Markup {
    html! {
        ul.chips {
            @for item in items {
                li.chip { (item) }
            }
        }
    }
}

/// `"2024-10-23 • 6 min read"`, skipping whichever half is empty.
fn article_byline(article: &Article) -> String {
    [article.date.as_str(), article.reading_time.as_str()]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" • ")
}

// ============================================================================
// Page Renderers
// ============================================================================

fn home_page(ctx: &SiteContext) -> Markup {
    let person = &ctx.config.person;
    html! {
        section.hero {
            h1 { (person.headline) }
            @for paragraph in &person.bio {
                p.bio { (paragraph) }
            }
            div.cta {
                a.button.primary href=(StaticPage::Contact.path()) { "Contact Me" }
                a.button href=(StaticPage::Projects.path()) { "View My Work" }
            }
        }
        @if !person.technologies.is_empty() {
            section.technologies {
                h2 { "Core Technologies" }
                (chips(&person.technologies))
            }
        }
    }
}

fn projects_page(ctx: &SiteContext) -> Markup {
    html! {
        section.projects {
            h1 { "Freelance & Personal Projects" }
            p.subtitle {
                "A selection of my work, demonstrating my skills in building real-world applications."
            }
            div.project-grid {
                @for project in ctx.catalog.projects() {
                    article.project-card {
                        @if !project.category.is_empty() {
                            span.category { (project.category) }
                        }
                        h2 { (project.title) }
                        p { (project.description()) }
                        a href=(project_route(&project.slug)) { "View Case Study" }
                    }
                }
            }
        }
    }
}

fn project_page(project: &Project) -> Markup {
    html! {
        article.case-study {
            a.back-link href=(StaticPage::Projects.path()) { "← Back to Projects" }
            header {
                h1 { (project.title) }
                @if !project.live_url.is_empty() {
                    a.live-link href=(project.live_url) target="_blank" rel="noopener noreferrer" {
                        "Visit Live Site"
                    }
                }
                @if !project.category.is_empty() {
                    p.category { (project.category) }
                }
            }
            @if !project.images.is_empty() {
                div.screenshots {
                    @for (i, image) in project.images.iter().enumerate() {
                        img src=(image) alt={ (project.title) " screenshot " (i + 1) } loading="lazy";
                    }
                }
            }
            @if !project.stack.is_empty() {
                (chips(&project.stack))
            }
            div.prose {
                (PreEscaped(markdown_to_html(&project.body)))
            }
        }
    }
}

fn articles_page(ctx: &SiteContext) -> Markup {
    html! {
        section.articles {
            h1 { "Thoughts & Insights" }
            p.subtitle {
                "Exploring topics in software development, from backend architecture to frontend magic."
            }
            ul.article-list {
                @for article in ctx.catalog.articles() {
                    li.article-item {
                        a href=(article_route(&article.slug)) {
                            p.byline { (article_byline(article)) }
                            h2 { (article.title) }
                            @if let Some(thumb) = &article.thumbnail {
                                img src=(thumb) alt=(article.title) loading="lazy";
                            }
                            p.excerpt { (article.excerpt) }
                        }
                    }
                }
            }
        }
    }
}

fn article_page(article: &Article) -> Markup {
    html! {
        article.article {
            a.back-link href=(StaticPage::Articles.path()) { "← Back to Articles" }
            h1 { (article.title) }
            p.byline { (article_byline(article)) }
            @if let Some(thumb) = &article.thumbnail {
                img.thumbnail src=(thumb) alt=(article.title);
            }
            div.prose {
                @if article.body.trim().is_empty() {
                    p { "Content coming soon." }
                } @else {
                    (PreEscaped(markdown_to_html(&article.body)))
                }
            }
        }
    }
}

fn experience_page(ctx: &SiteContext) -> Markup {
    html! {
        section.experience {
            h1 { "Experience" }
            p.subtitle { "A quick look at my ongoing roles and contributions." }
            ol.timeline {
                @for role in &ctx.config.experience {
                    (role_entry(role, ctx.today))
                }
            }
        }
    }
}

fn role_entry(role: &Role, today: NaiveDate) -> Markup {
    let start = role.start_date();
    let end = if role.current { None } else { role.end_date() };
    html! {
        li.role {
            h2 { (role.title) }
            p.company { (role.company) }
            @if let Some(start) = start {
                p.period {
                    (format_date_range(start, end))
                    " · "
                    (format_duration(start, end.unwrap_or(today)))
                }
            }
            @if role.current {
                span.badge { "Currently working" }
            }
            @if !role.responsibilities.is_empty() {
                ul.responsibilities {
                    @for item in &role.responsibilities {
                        li { (item) }
                    }
                }
            }
        }
    }
}

fn contact_page(ctx: &SiteContext) -> Markup {
    let person = &ctx.config.person;
    html! {
        section.contact {
            h1 { "Let's Connect" }
            p {
                "Have a project in mind or just want to say hi? My inbox is always open."
            }
            @if !person.email.is_empty() {
                a.button.primary href={ "mailto:" (person.email) } { (person.email) }
            }
            @if !person.same_as.is_empty() {
                h2 { "Find me on other platforms" }
                ul.profiles {
                    @for url in &person.same_as {
                        li {
                            a href=(url) target="_blank" rel="noopener noreferrer" {
                                (profile_label(url))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Display name for a profile URL: a known platform, else the bare host.
fn profile_label(url: &str) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string());
    match host.as_str() {
        "linkedin.com" => "LinkedIn".to_string(),
        "github.com" => "GitHub".to_string(),
        "instagram.com" => "Instagram".to_string(),
        "x.com" | "twitter.com" => "X".to_string(),
        _ => host,
    }
}

// ============================================================================
// Experience formatting
// ============================================================================

/// `"Oct 2024 — Present"` for ongoing roles, `"Jul 2023 — Dec 2023"` otherwise.
pub fn format_date_range(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let end = match end {
        Some(end) => end.format("%b %Y").to_string(),
        None => "Present".to_string(),
    };
    format!("{} — {}", start.format("%b %Y"), end)
}

/// Whole months between two dates as `"N yr(s) M mo(s)"`; `"< 1 mo"` under
/// a month. A month only counts once its day-of-month has been reached.
pub fn format_duration(start: NaiveDate, end: NaiveDate) -> String {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    let months = months.max(0);
    let (years, rest) = (months / 12, months % 12);

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{years} {}", if years == 1 { "yr" } else { "yrs" }));
    }
    if rest > 0 {
        parts.push(format!("{rest} {}", if rest == 1 { "mo" } else { "mos" }));
    }
    if parts.is_empty() {
        "< 1 mo".to_string()
    } else {
        parts.join(" ")
    }
}
