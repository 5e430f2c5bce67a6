//! Fixed catalogs of services, informational pages and blog posts.
//!
//! These lists change with the site's code, not its content files, so they
//! live here as static data. Order matters: search results and listing pages
//! follow declaration order.

/// A searchable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

/// A blog post shown on the `/blogs` listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlogPost {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub image: &'static str,
}

pub const SERVICES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Tourist Visa",
        description: "Explore the world with our tourist visa services",
        url: "/service-details/tourist-visa",
    },
    CatalogEntry {
        name: "Student Visa",
        description: "Pursue your education abroad with our student visa assistance",
        url: "/services",
    },
    CatalogEntry {
        name: "Business Visa",
        description: "Expand your business globally with our business visa services",
        url: "/services",
    },
    CatalogEntry {
        name: "Family Visa",
        description: "Reunite with your loved ones through our family visa services",
        url: "/services",
    },
    CatalogEntry {
        name: "Job Seeker Visa",
        description: "Find employment opportunities abroad with our job seeker visa assistance",
        url: "/services",
    },
    CatalogEntry {
        name: "Migrate Visa",
        description: "Start a new life abroad with our immigration visa services",
        url: "/services",
    },
];

pub const PAGES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "About Us",
        description: "Learn more about VortexEase and our services",
        url: "/about",
    },
    CatalogEntry {
        name: "FAQ",
        description: "Frequently asked questions about visas and immigration",
        url: "/faq",
    },
    CatalogEntry {
        name: "Contact",
        description: "Get in touch with our team for visa assistance",
        url: "/contact",
    },
    CatalogEntry {
        name: "Tourist Visa Tips",
        description: "Essential tips and guide for tourist visa applications",
        url: "/blog/tourist-visa-tips",
    },
    CatalogEntry {
        name: "Student Visa Guide",
        description: "Complete guide to student visa applications and requirements",
        url: "/blog/student-visa-guide",
    },
    CatalogEntry {
        name: "Work Visa Requirements",
        description: "Work visa requirements and application process explained",
        url: "/blog/work-visa-requirements",
    },
];

pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        title: "Tourist Visa Tips: Essential Advice for Your Journey",
        description: "Comprehensive tips for a smooth tourist visa application process.",
        url: "/blog/tourist-visa-tips",
        image: "/static/img/blog/blog-01.jpg",
    },
    BlogPost {
        title: "Student Visa Guide: Your Path to International Education",
        description: "A complete guide for obtaining a student visa for your studies abroad.",
        url: "/blog/student-visa-guide",
        image: "/static/img/blog/blog-02.jpg",
    },
    BlogPost {
        title: "Work Visa Requirements: Navigating Global Employment",
        description: "Understand the requirements for securing a work visa in various countries.",
        url: "/blog/work-visa-requirements",
        image: "/static/img/blog/blog-03.jpg",
    },
];

/// Informational pages served from `pages/<name>.md`, by route.
pub const INFO_PAGES: &[(&str, &str)] = &[
    ("/about", "about"),
    ("/faq", "faq"),
    ("/team", "team"),
    ("/terms-and-conditions", "terms-and-conditions"),
    ("/service-details/tourist-visa", "tourist-visa-details"),
];

/// Slug of a blog post URL (`/blog/<slug>`).
pub fn blog_slug(post: &BlogPost) -> &'static str {
    post.url.trim_start_matches("/blog/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_slugs() {
        let slugs: Vec<&str> = BLOG_POSTS.iter().map(blog_slug).collect();
        assert_eq!(
            slugs,
            vec![
                "tourist-visa-tips",
                "student-visa-guide",
                "work-visa-requirements"
            ]
        );
    }

    #[test]
    fn every_blog_post_is_searchable() {
        for post in BLOG_POSTS {
            assert!(
                PAGES.iter().any(|p| p.url == post.url),
                "{} missing from PAGES",
                post.url
            );
        }
    }
}
