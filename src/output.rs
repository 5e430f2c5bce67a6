//! CLI output formatting for the `check` and `search` commands.
//!
//! # Entity Display Contract
//!
//! Every entity is shown as a header line (positional index + name, with the
//! URL it is served at) followed by indented context lines. Filesystem paths
//! are context, not identity.
//!
//! ## Check
//!
//! ```text
//! Countries
//! 001 France → /tourist-visa/france/
//!     Source: landing/france.yaml
//!     Heading: Apply for your France Tourist Visa (1 section)
//! 002 Japan → /tourist-visa/japan/
//!     Source: landing/japan.yaml
//!     MISSING
//!
//! Testimonial
//!     Success Stories (2 reviews)
//!     6 story images from 5 countries
//!
//! Pages
//! 001 About VortexEase → /about
//!     Source: pages/about.md
//!
//! Blog
//! 001 Student Visa Guide → /blog/student-visa-guide
//!     Source: blog/student-visa-guide.md
//!
//! Checked 2 countries, 1 page, 1 blog post: 1 problem
//! ```
//!
//! ## Search
//!
//! ```text
//! 001 France Tourist Visa → /tourist-visa/france/
//!     Get your France tourist visa. Art, food and the Riviera
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::catalog::INFO_PAGES;
use crate::content::{BLOG_DIR, CheckReport, LANDING_DIR, LandingStatus, PAGES_DIR};
use crate::search::SearchHit;
use crate::types::{Page, StoryImage};
use std::collections::BTreeSet;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Entity header: positional index, name and the URL it is served at.
fn entity_header(index: usize, name: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("{} {} → {}", format_index(index), name, url),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// `1 page`, `2 pages`; `many` overrides the default `-s` plural.
fn count(n: usize, one: &str, many: Option<&str>) -> String {
    match (n, many) {
        (1, _) => format!("{n} {one}"),
        (_, Some(many)) => format!("{n} {many}"),
        (_, None) => format!("{n} {one}s"),
    }
}

fn story_summary(stories: &[StoryImage]) -> String {
    let codes: BTreeSet<&str> = stories.iter().map(|s| s.country_code.as_str()).collect();
    format!(
        "{} from {}",
        count(stories.len(), "story image", None),
        count(codes.len(), "country", Some("countries"))
    )
}

fn info_page_url(slug: &str) -> Option<&'static str> {
    INFO_PAGES
        .iter()
        .find(|(_, name)| *name == slug)
        .map(|(route, _)| *route)
}

fn page_lines(
    lines: &mut Vec<String>,
    pages: &[Page],
    dir: &str,
    url: impl Fn(&Page) -> Option<String>,
) {
    for (i, page) in pages.iter().enumerate() {
        let url = url(page);
        lines.push(entity_header(i + 1, &page.title, url.as_deref()));
        lines.push(format!("{}Source: {}/{}.md", indent(1), dir, page.slug));
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec!["Countries".to_string()];

    for (i, country) in report.countries.iter().enumerate() {
        let url = format!("/tourist-visa/{}/", country.slug);
        lines.push(entity_header(i + 1, &country.name, Some(&url)));
        lines.push(format!(
            "{}Source: {}/{}.yaml",
            indent(1),
            LANDING_DIR,
            country.slug.replace('-', "_")
        ));
        let status = match &country.landing {
            LandingStatus::Ok { heading, sections } => format!(
                "Heading: {} ({})",
                truncate_desc(heading, 60),
                count(*sections, "section", None)
            ),
            LandingStatus::Missing => "MISSING".to_string(),
            LandingStatus::Invalid(message) => format!("INVALID: {message}"),
        };
        lines.push(format!("{}{}", indent(1), status));
    }

    lines.push(String::new());
    lines.push("Testimonial".to_string());
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        report.testimonial_title,
        count(report.reviews, "review", None)
    ));
    lines.push(format!("{}{}", indent(1), story_summary(&report.stories)));

    if !report.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        page_lines(&mut lines, &report.pages, PAGES_DIR, |page| {
            info_page_url(&page.slug).map(str::to_string)
        });
    }

    if !report.blog_posts.is_empty() {
        lines.push(String::new());
        lines.push("Blog".to_string());
        page_lines(&mut lines, &report.blog_posts, BLOG_DIR, |page| {
            Some(format!("/blog/{}", page.slug))
        });
    }

    lines.push(String::new());
    let problems = report.problems();
    let summary = format!(
        "Checked {}, {}, {}",
        count(report.countries.len(), "country", Some("countries")),
        count(report.pages.len(), "page", None),
        count(report.blog_posts.len(), "blog post", None),
    );
    if problems == 0 {
        lines.push(summary);
    } else {
        lines.push(format!("{summary}: {}", count(problems, "problem", None)));
    }

    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{line}");
    }
}

// ============================================================================
// Search
// ============================================================================

pub fn format_search_output(query: &str, hits: &[SearchHit]) -> Vec<String> {
    if hits.is_empty() {
        return vec![format!("No results for \"{}\"", query.trim())];
    }

    let mut lines = Vec::with_capacity(hits.len() * 2);
    for (i, hit) in hits.iter().enumerate() {
        lines.push(entity_header(i + 1, &hit.title, Some(&hit.url)));
        lines.push(format!("{}{}", indent(1), truncate_desc(&hit.description, 80)));
    }
    lines
}

pub fn print_search_output(query: &str, hits: &[SearchHit]) {
    for line in format_search_output(query, hits) {
        println!("{line}");
    }
}
