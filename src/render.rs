//! HTML views.
//!
//! Every page is a pure function from loaded records to [`Markup`]. The HTTP
//! layer decides which records to load; nothing here touches the filesystem.
//!
//! ## Pages
//!
//! - **Home** (`/`): hero, service cards, success-story images, destinations
//! - **Visa detail** (`/tourist-visa/{slug}/`): one [`LandingConfig`]
//! - **Services** (`/services`) and **Contact** (`/contact`)
//! - **Markdown pages**: about, FAQ, team, terms, service details, blog posts
//! - **Blogs** (`/blogs`) and **Search** (`/search?s=`)
//! - **404** and **500** pages
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated content is escaped; only rendered markdown and the
//! stylesheet are inserted raw.

use crate::catalog::{BlogPost, SERVICES};
use crate::config::{self, SiteConfig, SiteInfo};
use crate::search::SearchHit;
use crate::types::{Country, LandingConfig, Page, Testimonial};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Full stylesheet: color variables from config followed by the base styles.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Shared page chrome: identity, stylesheet and the destinations menu.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub site: &'a SiteInfo,
    pub css: &'a str,
    pub countries: &'a [Country],
}

/// URL for an asset path from content: absolute URLs and rooted paths pass
/// through, anything else is served from `/static/`.
pub fn static_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/static/{path}")
    }
}

pub fn country_url(country: &Country) -> String {
    format!("/tourist-visa/{}/", country.slug)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(chrome: &Chrome, title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    let full_title = if title.is_empty() {
        chrome.site.name.clone()
    } else {
        format!("{} | {}", title, chrome.site.name)
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(chrome.site.tagline);
                title { (full_title) }
                style { (PreEscaped(chrome.css)) }
            }
            body class=[body_class] {
                (site_header(chrome))
                (content)
                (site_footer(chrome))
            }
        }
    }
}

/// Renders the site header with main navigation, destinations and search
fn site_header(chrome: &Chrome) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" { (chrome.site.name) }
            nav.site-nav {
                ul {
                    li { a href="/" { "Home" } }
                    li.nav-group {
                        span { "Tourist Visa" }
                        (render_country_nav(chrome.countries))
                    }
                    li { a href="/services" { "Services" } }
                    li { a href="/blogs" { "Blogs" } }
                    li { a href="/about" { "About" } }
                    li { a href="/faq" { "FAQ" } }
                    li { a href="/contact" { "Contact" } }
                }
            }
            form.site-search action="/search" method="get" {
                input type="search" name="s" placeholder="Search visas, countries, guides";
                button type="submit" { "Search" }
            }
        }
    }
}

/// Renders the destinations list used in the header menu
pub fn render_country_nav(countries: &[Country]) -> Markup {
    html! {
        ul.country-nav {
            @for country in countries {
                li {
                    a href=(country_url(country)) { (country.name) }
                }
            }
        }
    }
}

fn site_footer(chrome: &Chrome) -> Markup {
    html! {
        footer.site-footer {
            p { (chrome.site.name) " · " (chrome.site.tagline) }
            p {
                a href={ "mailto:" (chrome.site.email) } { (chrome.site.email) }
                " · "
                (chrome.site.phone)
            }
            p.legal { a href="/terms-and-conditions" { "Terms & Conditions" } }
        }
    }
}

fn service_cards() -> Markup {
    html! {
        div.card-grid {
            @for service in SERVICES {
                a.card href=(service.url) {
                    h3 { (service.name) }
                    p { (service.description) }
                }
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page with services, success stories and destinations
pub fn render_home(chrome: &Chrome, testimonial: &Testimonial) -> Markup {
    let content = html! {
        main.home-page {
            section.hero {
                h1 { (chrome.site.name) }
                p.tagline { (chrome.site.tagline) }
            }
            section.services {
                h2 { "Our Services" }
                (service_cards())
            }
            section.testimonials {
                p.eyebrow { (testimonial.title) }
                h2 { (testimonial.heading) }
                div.review-grid {
                    @for review in &testimonial.reviews {
                        figure.review {
                            img src=(static_url(&review.image)) alt=(review_alt(&review.name)) loading="lazy";
                            @if !review.text.is_empty() {
                                blockquote { (review.text) }
                            }
                            @if !review.name.is_empty() {
                                figcaption {
                                    (review.name)
                                    @if !review.country_name.is_empty() {
                                        " · "
                                        @if !review.country_flag.is_empty() {
                                            img.flag src=(static_url(&review.country_flag)) alt="";
                                        }
                                        (review.country_name)
                                    }
                                }
                            }
                        }
                    }
                }
            }
            section.destinations {
                h2 { "Destinations" }
                div.card-grid {
                    @for country in chrome.countries {
                        a.card.country-card href=(country_url(country)) {
                            img src=(static_url(&country.image)) alt=(country.name) loading="lazy";
                            h3 { (country.name) }
                            p { (country.title) }
                        }
                    }
                }
            }
        }
    };

    base_document(chrome, "", Some("home"), content)
}

fn review_alt(name: &str) -> String {
    if name.is_empty() {
        "Success story".to_string()
    } else {
        format!("Success story from {name}")
    }
}

/// Renders a per-country visa detail page
pub fn render_visa_detail(chrome: &Chrome, slug: &str, config: &LandingConfig) -> Markup {
    let content = html! {
        main.visa-detail data-slug=(slug) {
            section.banner style={ "background-image: url('" (config.main_banner.image) "')" } {
                h1 { (config.main_banner.title) }
            }
            header.visa-intro {
                h2 { (config.heading) }
                p { (config.description) }
            }
            @if !config.images.is_empty() {
                div.gallery {
                    @for image in &config.images {
                        img src=(static_url(image)) alt=(config.heading) loading="lazy";
                    }
                }
            }
            @for section in &config.sections {
                section.visa-section {
                    h3 { (section.title) }
                    p { (section.description) }
                    @if let Some(image) = &section.description_image {
                        img src=(static_url(image)) alt=(section.title) loading="lazy";
                    }
                    @if let Some(benefits) = &section.description_benefits {
                        ul.benefits {
                            @for benefit in benefits {
                                li { (benefit) }
                            }
                        }
                    }
                }
            }
            aside.checklist-cta {
                a.button href=(config.checklist_cta.cta_link) target="_blank" rel="noopener" {
                    (config.checklist_cta.cta_title)
                }
            }
            section.expenses {
                h3 { (config.expenses_sections.title) }
                ul {
                    @for expense in &config.expenses_sections.expenses {
                        li { (expense) }
                    }
                }
            }
        }
    };

    base_document(chrome, &config.main_banner.title, None, content)
}

/// Renders the services overview
pub fn render_services(chrome: &Chrome) -> Markup {
    let content = html! {
        main.services-page {
            h1 { "Our Services" }
            (service_cards())
        }
    };
    base_document(chrome, "Services", None, content)
}

/// Renders the contact page from site identity
pub fn render_contact(chrome: &Chrome) -> Markup {
    let site = chrome.site;
    let content = html! {
        main.contact-page {
            h1 { "Contact Us" }
            p { "Get in touch with our team for visa assistance." }
            dl.contact-details {
                dt { "Email" }
                dd { a href={ "mailto:" (site.email) } { (site.email) } }
                dt { "Phone" }
                dd { a href={ "tel:" (site.phone) } { (site.phone) } }
                @if !site.address.is_empty() {
                    dt { "Office" }
                    dd { (site.address) }
                }
            }
        }
    };
    base_document(chrome, "Contact", None, content)
}

/// Renders a markdown page (informational page or blog post)
pub fn render_page(chrome: &Chrome, page: &Page) -> Markup {
    let content = html! {
        main.content-page {
            article.page-content {
                (PreEscaped(markdown_to_html(&page.body)))
            }
        }
    };
    base_document(chrome, &page.title, None, content)
}

/// Renders the blog listing
pub fn render_blogs(chrome: &Chrome, posts: &[BlogPost]) -> Markup {
    let content = html! {
        main.blogs-page {
            h1 { "Blogs" }
            div.card-grid {
                @for post in posts {
                    a.card.blog-card href=(post.url) {
                        img src=(post.image) alt=(post.title) loading="lazy";
                        h3 { (post.title) }
                        p { (post.description) }
                    }
                }
            }
        }
    };
    base_document(chrome, "Blogs", None, content)
}

/// Renders search results for a query
pub fn render_search(chrome: &Chrome, query: &str, hits: &[SearchHit]) -> Markup {
    let content = html! {
        main.search-page {
            h1 {
                @if query.is_empty() {
                    "Search"
                } @else {
                    "Results for “" (query) "”"
                }
            }
            form.site-search action="/search" method="get" {
                input type="search" name="s" value=(query);
                button type="submit" { "Search" }
            }
            @if hits.is_empty() {
                @if !query.is_empty() {
                    p.no-results { "No results found." }
                }
            } @else {
                ol.search-results {
                    @for hit in hits {
                        li {
                            a href=(hit.url) { (hit.title) }
                            p { (hit.description) }
                        }
                    }
                }
            }
        }
    };
    base_document(chrome, "Search", None, content)
}

/// Renders the 404 page
pub fn render_not_found(chrome: &Chrome) -> Markup {
    let content = html! {
        main.error-page {
            h1 { "Page not found" }
            p { "The page you are looking for does not exist." }
            a href="/" { "Back to home" }
        }
    };
    base_document(chrome, "Not found", Some("error"), content)
}

/// Renders the 500 page
pub fn render_server_error(chrome: &Chrome) -> Markup {
    let content = html! {
        main.error-page {
            h1 { "Something went wrong" }
            p { "We could not load this page. Please try again later." }
            a href="/" { "Back to home" }
        }
    };
    base_document(chrome, "Error", Some("error"), content)
}

// ============================================================================
// Tests
// ============================================================================
