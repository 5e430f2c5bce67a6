//! Site search over destinations, services and informational pages.
//!
//! Search is a case-insensitive substring match. It runs over three
//! catalogs and concatenates their hits in a fixed order:
//!
//! 1. Countries from the visa directory, matched on name or slug
//! 2. [`SERVICES`], matched on name or description
//! 3. [`PAGES`], matched on name or description
//!
//! Within a catalog, hits keep declaration order. There is no ranking,
//! fuzzy matching or de-duplication, and a blank query returns nothing.

use crate::catalog::{CatalogEntry, PAGES, SERVICES};
use crate::types::Country;
use serde::Serialize;

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Lowercased, trimmed form of a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Search all catalogs for `raw_query`.
pub fn search(raw_query: &str, countries: &[Country]) -> Vec<SearchHit> {
    let query = normalize_query(raw_query);
    if query.is_empty() {
        return Vec::new();
    }

    let country_hits = countries
        .iter()
        .filter(|c| contains(&c.name, &query) || contains(&c.slug, &query))
        .map(country_hit);

    let entry_hits = SERVICES
        .iter()
        .chain(PAGES)
        .filter(|e| contains(e.name, &query) || contains(e.description, &query))
        .map(entry_hit);

    country_hits.chain(entry_hits).collect()
}

fn contains(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

fn country_hit(country: &Country) -> SearchHit {
    SearchHit {
        title: format!("{} Tourist Visa", country.name),
        description: format!(
            "Get your {} tourist visa. {}",
            country.name, country.title
        ),
        url: format!("/tourist-visa/{}/", country.slug),
    }
}

fn entry_hit(entry: &CatalogEntry) -> SearchHit {
    SearchHit {
        title: entry.name.to_string(),
        description: entry.description.to_string(),
        url: entry.url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::hit_urls;

    fn country(name: &str, slug: &str) -> Country {
        Country {
            name: name.to_string(),
            image: format!("img/flags/{slug}.png"),
            slug: slug.to_string(),
            title: format!("Discover {name}"),
        }
    }

    fn countries() -> Vec<Country> {
        vec![
            country("France", "france"),
            country("Japan", "japan"),
            country("New Zealand", "new-zealand"),
        ]
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(search("", &countries()).is_empty());
        assert!(search("   \t", &countries()).is_empty());
    }

    #[test]
    fn country_hit_shape() {
        let hits = search("france", &countries());
        assert_eq!(
            hits,
            vec![SearchHit {
                title: "France Tourist Visa".to_string(),
                description: "Get your France tourist visa. Discover France".to_string(),
                url: "/tourist-visa/france/".to_string(),
            }]
        );
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(search("FRANCE", &countries()), search("france", &countries()));
        assert_eq!(search("  France ", &countries()), search("france", &countries()));
    }

    #[test]
    fn matches_country_slug() {
        let hits = search("new-zea", &countries());
        assert_eq!(hit_urls(&hits), vec!["/tourist-visa/new-zealand/"]);
    }

    #[test]
    fn countries_before_services_before_pages() {
        // "tourist" matches no country name here, so seed one that does
        let mut list = countries();
        list.push(country("Touristan", "touristan"));

        let hits = search("tourist", &list);
        assert_eq!(
            hit_urls(&hits),
            vec![
                "/tourist-visa/touristan/",
                "/service-details/tourist-visa",
                "/blog/tourist-visa-tips",
            ]
        );
    }

    #[test]
    fn services_keep_declaration_order() {
        let hits = search("visa services", &countries());
        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Tourist Visa", "Business Visa", "Family Visa", "Migrate Visa"]
        );
    }

    #[test]
    fn matches_description() {
        let hits = search("frequently asked", &countries());
        assert_eq!(hit_urls(&hits), vec!["/faq"]);
    }

    #[test]
    fn duplicates_are_not_removed() {
        // Student Visa service and Student Visa Guide page both match
        let hits = search("student", &countries());
        assert_eq!(hit_urls(&hits), vec!["/services", "/blog/student-visa-guide"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("antarctica", &countries()).is_empty());
    }
}
