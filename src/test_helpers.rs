//! Shared test utilities for the vortex-ease test suite.
//!
//! Provides fixture setup and lookup helpers over loaded site content.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = setup_fixtures();
//! let content = load_fixture_content(site.path());
//!
//! let japan = find_country(&content, "japan");
//! assert_eq!(japan.name, "Japan");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::content::{ContentStore, SiteContent};
use crate::search::SearchHit;
use crate::types::Country;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load the singletons from a fixture copy using the default content dir.
pub fn load_fixture_content(root: &Path) -> SiteContent {
    let store = ContentStore::new(SiteConfig::default().content_path(root));
    SiteContent::load(store).unwrap_or_else(|e| panic!("fixture content failed to load: {e}"))
}

// =========================================================================
// Lookups, panics with a clear message on miss
// =========================================================================

/// Find a country by slug. Panics if not found.
pub fn find_country<'a>(content: &'a SiteContent, slug: &str) -> &'a Country {
    content.countries.find(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = content
            .countries
            .countries
            .iter()
            .map(|c| c.slug.as_str())
            .collect();
        panic!("country '{slug}' not found. Available: {slugs:?}")
    })
}

/// All hit URLs in result order.
pub fn hit_urls(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.url.as_str()).collect()
}
