//! Filesystem scanning for images and markdown pages.
//!
//! ## Success-Story Images
//!
//! The story directory is a flat folder of images whose file names encode a
//! country (see [`crate::naming`]):
//!
//! ```text
//! static/img/testimonials/
//! ├── eu_ge_01.png      # country code eu_ge
//! ├── eu_ge_02.jpg      # country code eu_ge
//! ├── us_01.webp        # country code us_01
//! └── notes.txt         # ignored, not an image
//! ```
//!
//! Only the top level is read. Hidden files and non-image files are skipped.
//! A missing or unreadable directory yields no candidates rather than an
//! error; the home page then falls back to the configured reviews.
//!
//! ## Markdown Pages
//!
//! Informational pages and blog posts are `<slug>.md` files. The title is
//! taken from the first `# heading`, falling back to the slug with dashes
//! turned into spaces.

use crate::naming::country_code;
use crate::types::{Page, StoryImage};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Collect every success-story image in `static_root/rel_dir`.
///
/// Returned paths are relative to the static root (`rel_dir/<file>`) so they
/// can be served under `/static/`. Entries are sorted by file name.
pub fn scan_story_images(static_root: &Path, rel_dir: &str) -> Vec<StoryImage> {
    let dir = static_root.join(rel_dir);
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "story image directory not found");
        return Vec::new();
    }

    let prefix = rel_dir.trim_matches('/');
    WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(dir = %dir.display(), "skipping unreadable story entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_image(entry.path()))
        .filter_map(|entry| {
            let filename = entry.file_name().to_str()?.to_string();
            if filename.starts_with('.') {
                return None;
            }
            let image = if prefix.is_empty() {
                filename.clone()
            } else {
                format!("{prefix}/{filename}")
            };
            Some(StoryImage {
                image,
                country_code: country_code(&filename),
            })
        })
        .collect()
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Parse all markdown files directly inside `dir` into pages, sorted by
/// file name.
///
/// A missing directory yields no pages.
pub fn scan_pages(dir: &Path) -> std::io::Result<Vec<Page>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }
        let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let content = fs::read_to_string(path)?;
        pages.push(parse_page(&slug, content));
    }
    Ok(pages)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Build a [`Page`] from its slug and markdown source.
pub fn parse_page(slug: &str, body: String) -> Page {
    let title = body
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .unwrap_or_else(|| slug.replace('-', " "));

    Page {
        title,
        slug: slug.to_string(),
        body,
    }
}
