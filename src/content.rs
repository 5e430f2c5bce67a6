//! Content loading from the site's content directory.
//!
//! ## Directory Layout
//!
//! ```text
//! content/
//! ├── visa_service_countries.yaml   # Country directory (singleton)
//! ├── testimonial.yaml              # Testimonial block (singleton)
//! ├── landing/
//! │   ├── japan.yaml                # /tourist-visa/japan/
//! │   └── new_zealand.yaml          # /tourist-visa/new-zealand/
//! ├── pages/
//! │   ├── about.md
//! │   └── faq.md
//! └── blog/
//!     └── tourist-visa-tips.md
//! ```
//!
//! ## Lifecycle
//!
//! The two singletons are loaded once into [`SiteContent`] before the server
//! starts and are shared read-only afterwards; a failure there is fatal.
//! Landing configs and markdown pages are read on every request through
//! [`ContentStore`], so edits show up without a restart.
//!
//! ## Errors
//!
//! A missing file is [`ContentError::NotFound`]. A file that exists but does
//! not match its schema is [`ContentError::Validation`], naming the offending
//! field. No partially filled or defaulted record is ever returned.

use crate::scan::{parse_page, scan_pages, scan_story_images};
use crate::types::{
    LandingConfig, Page, StoryImage, Testimonial, Validate, VisaServiceCountries,
    is_url_safe_slug,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const COUNTRIES_FILE: &str = "visa_service_countries.yaml";
pub const TESTIMONIAL_FILE: &str = "testimonial.yaml";
pub const LANDING_DIR: &str = "landing";
pub const PAGES_DIR: &str = "pages";
pub const BLOG_DIR: &str = "blog";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
    #[error("Invalid content in {}: `{field}`: {message}", path.display())]
    Validation {
        path: PathBuf,
        field: String,
        message: String,
    },
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether this error means "no such content" rather than broken content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_) | ContentError::InvalidSlug(_))
    }
}

/// Where markdown pages live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Info,
    Blog,
}

impl PageKind {
    fn dir(self) -> &'static str {
        match self {
            PageKind::Info => PAGES_DIR,
            PageKind::Blog => BLOG_DIR,
        }
    }
}

/// Reads and validates content files under one content directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a country slug. Dashes map to underscores
    /// (`new-zealand` → `landing/new_zealand.yaml`).
    pub fn landing_path(&self, slug: &str) -> Result<PathBuf, ContentError> {
        if !is_url_safe_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        Ok(self
            .root
            .join(LANDING_DIR)
            .join(format!("{}.yaml", slug.replace('-', "_"))))
    }

    pub fn load_landing(&self, slug: &str) -> Result<LandingConfig, ContentError> {
        load_yaml(&self.landing_path(slug)?)
    }

    pub fn load_testimonial(&self) -> Result<Testimonial, ContentError> {
        load_yaml(&self.root.join(TESTIMONIAL_FILE))
    }

    pub fn load_countries(&self) -> Result<VisaServiceCountries, ContentError> {
        load_yaml(&self.root.join(COUNTRIES_FILE))
    }

    /// Load `pages/<slug>.md` or `blog/<slug>.md`.
    pub fn load_page(&self, kind: PageKind, slug: &str) -> Result<Page, ContentError> {
        if !is_url_safe_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        let path = self.root.join(kind.dir()).join(format!("{slug}.md"));
        let body = read(&path)?;
        Ok(parse_page(slug, body))
    }

    /// Every markdown page of the given kind, sorted by file name.
    pub fn list_pages(&self, kind: PageKind) -> Result<Vec<Page>, ContentError> {
        let dir = self.root.join(kind.dir());
        scan_pages(&dir).map_err(|source| ContentError::Io { path: dir, source })
    }
}

fn read(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ContentError::NotFound(path.to_path_buf()),
        _ => ContentError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Read, parse and validate one YAML record.
fn load_yaml<T: DeserializeOwned + Validate>(path: &Path) -> Result<T, ContentError> {
    debug!(path = %path.display(), "loading content");
    let text = read(path)?;
    let record: T = serde_yaml::from_str(&text).map_err(|err| ContentError::Validation {
        path: path.to_path_buf(),
        field: offending_field(&err.to_string()),
        message: err.to_string(),
    })?;
    record.validate().map_err(|err| ContentError::Validation {
        path: path.to_path_buf(),
        field: err.field,
        message: err.message,
    })?;
    Ok(record)
}

/// Best-effort field name from a serde_yaml error message.
///
/// serde_yaml prefixes nested errors with the dotted path of the value being
/// deserialized (`main_banner: missing field `image``); a missing field adds
/// its own name. Errors that cannot be tied to a field report `document`.
fn offending_field(message: &str) -> String {
    let (path, detail) = match message.split_once(": ") {
        Some((prefix, rest)) if is_field_path(prefix) => (Some(prefix), rest),
        _ => (None, message),
    };

    let missing = detail
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());

    match (path, missing) {
        (Some(path), Some(field)) => format!("{path}.{field}"),
        (None, Some(field)) => field.to_string(),
        (Some(path), None) => path.to_string(),
        (None, None) => "document".to_string(),
    }
}

fn is_field_path(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}

// ============================================================================
// Singletons
// ============================================================================

/// Records loaded once at startup and shared read-only for the process
/// lifetime, plus the store for per-request loads.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub store: ContentStore,
    pub testimonial: Testimonial,
    pub countries: VisaServiceCountries,
}

impl SiteContent {
    pub fn load(store: ContentStore) -> Result<Self, ContentError> {
        let testimonial = store.load_testimonial()?;
        let countries = store.load_countries()?;
        debug!(
            countries = countries.countries.len(),
            reviews = testimonial.reviews.len(),
            "site content loaded"
        );
        Ok(Self {
            store,
            testimonial,
            countries,
        })
    }
}

// ============================================================================
// Content audit
// ============================================================================

/// Outcome of loading one country's landing config.
#[derive(Debug, Clone, PartialEq)]
pub enum LandingStatus {
    Ok { heading: String, sections: usize },
    Missing,
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct CountryReport {
    pub name: String,
    pub slug: String,
    pub landing: LandingStatus,
}

/// Inventory produced by the `check` command.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub countries: Vec<CountryReport>,
    pub testimonial_title: String,
    pub reviews: usize,
    pub stories: Vec<StoryImage>,
    pub pages: Vec<Page>,
    pub blog_posts: Vec<Page>,
}

impl CheckReport {
    /// Countries whose landing config is missing or invalid.
    pub fn problems(&self) -> usize {
        self.countries
            .iter()
            .filter(|c| !matches!(c.landing, LandingStatus::Ok { .. }))
            .count()
    }
}

/// Try every landing config named by the country directory and inventory
/// the story images in `static_root/stories_dir` and the markdown pages.
pub fn check(
    content: &SiteContent,
    static_root: &Path,
    stories_dir: &str,
) -> Result<CheckReport, ContentError> {
    let countries = content
        .countries
        .countries
        .iter()
        .map(|country| {
            let landing = match content.store.load_landing(&country.slug) {
                Ok(config) => LandingStatus::Ok {
                    heading: config.heading,
                    sections: config.sections.len(),
                },
                Err(err) if err.is_not_found() => LandingStatus::Missing,
                Err(err) => LandingStatus::Invalid(err.to_string()),
            };
            CountryReport {
                name: country.name.clone(),
                slug: country.slug.clone(),
                landing,
            }
        })
        .collect();

    Ok(CheckReport {
        countries,
        testimonial_title: content.testimonial.title.clone(),
        reviews: content.testimonial.reviews.len(),
        stories: scan_story_images(static_root, stories_dir),
        pages: content.store.list_pages(PageKind::Info)?,
        blog_posts: content.store.list_pages(PageKind::Blog)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    const JAPAN: &str = r#"
main_banner:
  title: Japan Tourist Visa
  image: https://cdn.example.com/japan/banner.jpg
heading: Apply for your Japan Tourist Visa
description: Cherry blossoms and bullet trains.
images:
  - img/japan/1.jpg
sections:
  - title: Who needs a visa
    description: Most travellers.
    description_benefits:
      - Single entry
checklist_cta:
  cta_title: Download checklist
  cta_link: https://example.com/japan-checklist.pdf
expenses_sections:
  title: Expenses
  expenses:
    - Visa fee
"#;

    fn store_with_landing(file: &str, yaml: &str) -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(LANDING_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), yaml).unwrap();
        let store = ContentStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn loads_landing_heading_verbatim() {
        let (_tmp, store) = store_with_landing("japan.yaml", JAPAN);
        let config = store.load_landing("japan").unwrap();
        assert_eq!(config.heading, "Apply for your Japan Tourist Visa");
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].description_image, None);
        assert_eq!(
            config.sections[0].description_benefits.as_deref(),
            Some(&["Single entry".to_string()][..])
        );
    }

    #[test]
    fn dashes_map_to_underscores() {
        let (_tmp, store) = store_with_landing("new_zealand.yaml", JAPAN);
        assert!(store.load_landing("new-zealand").is_ok());
    }

    #[test]
    fn missing_slug_is_not_found() {
        let (_tmp, store) = store_with_landing("japan.yaml", JAPAN);
        let err = store.load_landing("atlantis").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn traversal_slug_rejected() {
        let (_tmp, store) = store_with_landing("japan.yaml", JAPAN);
        let err = store.load_landing("../japan").unwrap_err();
        assert!(matches!(err, ContentError::InvalidSlug(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_heading_names_field() {
        let yaml = JAPAN.replace("heading: Apply for your Japan Tourist Visa\n", "");
        let (_tmp, store) = store_with_landing("japan.yaml", &yaml);
        match store.load_landing("japan").unwrap_err() {
            ContentError::Validation { field, .. } => assert_eq!(field, "heading"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_nested_field_names_path() {
        let yaml = JAPAN.replace("  cta_title: Download checklist\n", "");
        let (_tmp, store) = store_with_landing("japan.yaml", &yaml);
        match store.load_landing("japan").unwrap_err() {
            ContentError::Validation { field, .. } => {
                assert!(field.ends_with("cta_title"), "field was {field}")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_url_names_field() {
        let yaml = JAPAN.replace(
            "https://cdn.example.com/japan/banner.jpg",
            "not a url",
        );
        let (_tmp, store) = store_with_landing("japan.yaml", &yaml);
        match store.load_landing("japan").unwrap_err() {
            ContentError::Validation { field, .. } => assert_eq!(field, "main_banner.image"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_validation_error() {
        let yaml = JAPAN.replace("images:\n  - img/japan/1.jpg", "images: 42");
        let (_tmp, store) = store_with_landing("japan.yaml", &yaml);
        assert!(matches!(
            store.load_landing("japan"),
            Err(ContentError::Validation { .. })
        ));
    }

    #[test]
    fn offending_field_parsing() {
        assert_eq!(offending_field("missing field `heading`"), "heading");
        assert_eq!(
            offending_field("missing field `heading` at line 2 column 1"),
            "heading"
        );
        assert_eq!(
            offending_field("main_banner: missing field `image` at line 3 column 3"),
            "main_banner.image"
        );
        assert_eq!(
            offending_field("images: invalid type: integer `42`, expected a sequence"),
            "images"
        );
        assert_eq!(
            offending_field("did not find expected key at line 4 column 1"),
            "document"
        );
    }

    #[test]
    fn singletons_load_from_fixtures() {
        let site = setup_fixtures();
        let content = load_fixture_content(site.path());
        assert_eq!(content.testimonial.title, "Success Stories");
        assert!(!content.countries.countries.is_empty());
        find_country(&content, "france");
    }

    #[test]
    fn missing_singleton_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = SiteContent::load(ContentStore::new(tmp.path())).unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn load_page_reads_markdown() {
        let site = setup_fixtures();
        let content = load_fixture_content(site.path());
        let page = content.store.load_page(PageKind::Info, "about").unwrap();
        assert_eq!(page.title, "About VortexEase");

        let err = content.store.load_page(PageKind::Blog, "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn check_reports_each_country() {
        let site = setup_fixtures();
        let content = load_fixture_content(site.path());
        fs::remove_file(content.store.root().join("landing/france.yaml")).unwrap();

        let report = check(&content, &site.path().join("static"), "img/testimonials").unwrap();
        let japan = report.countries.iter().find(|c| c.slug == "japan").unwrap();
        assert!(matches!(japan.landing, LandingStatus::Ok { .. }));
        let france = report.countries.iter().find(|c| c.slug == "france").unwrap();
        assert_eq!(france.landing, LandingStatus::Missing);
        assert_eq!(report.problems(), 1);
        assert!(report.pages.iter().any(|p| p.slug == "faq"));
        assert_eq!(report.blog_posts.len(), 3);
        assert_eq!(report.stories.len(), 6);
    }
}
