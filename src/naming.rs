//! Country-code extraction from success-story image filenames.
//!
//! Testimonial images are named after the visa they celebrate, and the home
//! page uses that name to keep neighbouring images from the same country
//! apart. The grouping token is called a *country code* here, although it
//! has nothing to do with ISO codes:
//!
//! - `eu_ge_01.png` → `eu_ge` (region + country + sequence number)
//! - `us_01.png` → `us_01` (region + sequence number, no country segment)
//! - `a_b_c_01.png` → `a_b` (unrecognized shape: first two segments)
//! - `XYZ.png` → `XYZ` (no underscore: the whole stem)
//!
//! ## Matching Rules
//!
//! The recognized shapes are an ordered list of matchers, tried first to
//! last. Each returns the code when the whole stem fits its shape:
//!
//! | Shape | Example stem | Code |
//! |-------|--------------|------|
//! | two lowercase letters `_` two lowercase letters `_` digits | `eu_ge_01` | `eu_ge` |
//! | two lowercase letters `_` digits | `au_01` | `au_01` |
//!
//! When no matcher accepts the stem, the fallback joins the first two
//! underscore-delimited segments, or returns the stem untouched when it has
//! no underscore. Extraction never fails.

use std::path::Path;

/// A recognized filename shape. Returns the country code when the stem
/// matches the shape exactly.
type Matcher = fn(&str) -> Option<&str>;

/// Recognized shapes, in priority order.
const MATCHERS: [Matcher; 2] = [region_country_numbered, region_numbered];

/// Extract the country code from an image filename.
///
/// The extension is stripped first (`eu_ge_01.png` → `eu_ge_01`), then the
/// stem is run through [`MATCHERS`] and finally the split-on-underscore
/// fallback.
pub fn country_code(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    if let Some(code) = MATCHERS.iter().find_map(|matcher| matcher(&stem)) {
        return code.to_string();
    }

    let mut segments = stem.split('_');
    match (segments.next(), segments.next()) {
        (Some(first), Some(second)) => format!("{first}_{second}"),
        _ => stem,
    }
}

/// `xx_yy_NN` → `xx_yy`
fn region_country_numbered(stem: &str) -> Option<&str> {
    let rest = after_two_letters(stem)?.strip_prefix('_')?;
    let digits = after_two_letters(rest)?.strip_prefix('_')?;
    all_digits(digits).then(|| &stem[..stem.len() - digits.len() - 1])
}

/// `xx_NN` → `xx_NN`
fn region_numbered(stem: &str) -> Option<&str> {
    let digits = after_two_letters(stem)?.strip_prefix('_')?;
    all_digits(digits).then_some(stem)
}

/// The remainder after a leading pair of lowercase ASCII letters.
fn after_two_letters(s: &str) -> Option<&str> {
    let pair = s.get(..2)?;
    pair.bytes()
        .all(|b| b.is_ascii_lowercase())
        .then(|| &s[2..])
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
