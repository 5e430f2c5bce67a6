//! Content records shared by the loader, the renderer and the search.
//!
//! Every record is deserialized from a YAML file under the content directory
//! and is immutable once loaded. Serde enforces presence and types of the
//! required fields; [`Validate`] adds the checks serde cannot express (URL
//! shape, URL-safe slugs).

use serde::{Deserialize, Serialize};
use url::Url;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `main_banner.image`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Post-deserialization checks for content records.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldError>;
}

// ============================================================================
// Landing pages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    /// Absolute http(s) URL of the hero image.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_benefits: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistCta {
    pub cta_title: String,
    /// Absolute http(s) URL of the document checklist.
    pub cta_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensesSection {
    pub title: String,
    pub expenses: Vec<String>,
}

/// Content of one per-country visa detail page (`landing/<slug>.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingConfig {
    pub main_banner: Banner,
    pub heading: String,
    pub description: String,
    pub images: Vec<String>,
    pub sections: Vec<Section>,
    pub checklist_cta: ChecklistCta,
    pub expenses_sections: ExpensesSection,
}

impl Validate for LandingConfig {
    fn validate(&self) -> Result<(), FieldError> {
        check_http_url("main_banner.image", &self.main_banner.image)?;
        check_http_url("checklist_cta.cta_link", &self.checklist_cta.cta_link)
    }
}

// ============================================================================
// Testimonials
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    pub name: String,
    pub country_flag: String,
    pub country_name: String,
    pub image: String,
}

/// The testimonial block shown on the home page (`testimonial.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub title: String,
    pub heading: String,
    pub reviews: Vec<Review>,
}

impl Testimonial {
    /// Derive a copy whose reviews are the given success-story images.
    ///
    /// Each image becomes an image-only review. An empty selection keeps the
    /// configured reviews. `self` is never modified.
    pub fn with_story_images(&self, stories: &[StoryImage]) -> Testimonial {
        if stories.is_empty() {
            return self.clone();
        }
        Testimonial {
            title: self.title.clone(),
            heading: self.heading.clone(),
            reviews: stories
                .iter()
                .map(|story| Review {
                    text: String::new(),
                    name: String::new(),
                    country_flag: String::new(),
                    country_name: String::new(),
                    image: story.image.clone(),
                })
                .collect(),
        }
    }
}

impl Validate for Testimonial {
    fn validate(&self) -> Result<(), FieldError> {
        Ok(())
    }
}

// ============================================================================
// Country directory
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub image: String,
    pub slug: String,
    pub title: String,
}

/// Every destination with a visa detail page (`visa_service_countries.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaServiceCountries {
    pub countries: Vec<Country>,
}

impl VisaServiceCountries {
    pub fn find(&self, slug: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.slug == slug)
    }
}

impl Validate for VisaServiceCountries {
    fn validate(&self) -> Result<(), FieldError> {
        for (idx, country) in self.countries.iter().enumerate() {
            if !is_url_safe_slug(&country.slug) {
                return Err(FieldError::new(
                    format!("countries[{idx}].slug"),
                    format!("{:?} is not a URL-safe slug", country.slug),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Derived and markdown-backed records
// ============================================================================

/// A success-story image picked from the testimonial image directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryImage {
    /// Path relative to the static root, e.g. `img/testimonials/us_01.png`.
    pub image: String,
    /// Grouping token from [`crate::naming::country_code`].
    pub country_code: String,
}

/// An informational page or blog post rendered from markdown.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Title from the first `# heading`, or the slug with dashes → spaces.
    pub title: String,
    pub slug: String,
    /// Raw markdown content.
    pub body: String,
}

/// Slugs are lowercase ASCII letters, digits, dashes and underscores.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

fn check_http_url(field: &str, value: &str) -> Result<(), FieldError> {
    let url = Url::parse(value).map_err(|e| FieldError::new(field, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
        return Err(FieldError::new(field, "expected an http(s) URL"));
    }
    Ok(())
}
