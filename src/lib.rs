//! # VortexEase
//!
//! Marketing website for a visa-services business. Content lives in plain
//! files: YAML records describe destinations and testimonials, markdown files
//! hold informational pages and blog posts, and success-story images are
//! picked up from a directory where each file name encodes a country.
//!
//! # Request Flow
//!
//! ```text
//! request → server (route) → content (load + validate) → render (maud) → HTML
//! ```
//!
//! The country directory and the testimonial block are loaded once at
//! startup and shared read-only. Everything else is read per request.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Loads and validates YAML records; shared singletons; content audit |
//! | [`types`] | Record types and their validation rules |
//! | [`naming`] | Country code extraction from success-story file names |
//! | [`scan`] | Directory listing for story images and markdown pages |
//! | [`stories`] | Random, country-diverse success-story sampling |
//! | [`catalog`] | Fixed service, page and blog catalogs |
//! | [`search`] | Substring search over countries and catalogs |
//! | [`render`] | Page views using Maud |
//! | [`server`] | Axum routes, shared state, graceful shutdown |
//! | [`config`] | `site.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for `check` and `search` |
//!
//! # Design Decisions
//!
//! ## Validate at Load, Never Default
//!
//! A record that fails its schema is an error naming the offending field.
//! Handlers never see a half-filled record, and a broken landing page renders
//! a 500 instead of an empty template.
//!
//! ## Per-Request Sampling Without Shared Mutation
//!
//! The home page derives a fresh testimonial from the shared one on every
//! view. The shared record is never written, so concurrent requests cannot
//! observe each other's sample.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Interpolation is
//! escaped by default and malformed markup is a build error.

pub mod catalog;
pub mod config;
pub mod content;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod search;
pub mod server;
pub mod stories;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
