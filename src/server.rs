//! HTTP server.
//!
//! Routes every page to a handler that loads what it needs and hands it to
//! [`crate::render`]. Shared state is built once by [`AppState::load`] and
//! never mutated afterwards; per-request randomness lives in the handler.
//!
//! | Route | Source |
//! |-------|--------|
//! | `/` | testimonial + sampled success stories |
//! | `/tourist-visa/{slug}/` | `landing/<slug>.yaml` |
//! | `/services`, `/contact`, `/blogs` | static catalogs and site config |
//! | `/about`, `/faq`, `/team`, ... | `pages/<name>.md` |
//! | `/blog/{slug}` | `blog/<slug>.md` |
//! | `/search?s=` | [`crate::search`] |
//! | `/static/*` | files under `static_dir` |

use crate::catalog::{BLOG_POSTS, INFO_PAGES};
use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore, PageKind, SiteContent};
use crate::render::{self, Chrome};
use crate::search::{normalize_query, search};
use crate::stories::random_success_stories;
use crate::types::{Testimonial, is_url_safe_slug};
use axum::{
    Router,
    extract::{Path as UrlPath, Query, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Process-wide state shared by all handlers.
pub struct AppState {
    pub config: SiteConfig,
    pub static_dir: PathBuf,
    pub content: SiteContent,
    pub css: String,
}

impl AppState {
    /// Load the content singletons for the site at `root`.
    ///
    /// Fails if either singleton is missing or invalid; the server must not
    /// start with broken shared content.
    pub fn load(root: &Path, config: SiteConfig) -> Result<Arc<Self>, ContentError> {
        let content = SiteContent::load(ContentStore::new(config.content_path(root)))?;
        let static_dir = config.static_path(root);
        let css = render::site_css(&config);
        Ok(Arc::new(Self {
            config,
            static_dir,
            content,
            css,
        }))
    }

    pub fn chrome(&self) -> Chrome<'_> {
        Chrome {
            site: &self.config.site,
            css: &self.css,
            countries: &self.content.countries.countries,
        }
    }

    /// Testimonial for one home page view: the shared record with its
    /// reviews replaced by a fresh success-story sample.
    fn home_testimonial(&self) -> Testimonial {
        let stories = random_success_stories(
            &self.static_dir,
            &self.config.stories.dir,
            self.config.stories.max_items,
            &mut rand::rng(),
        );
        self.content.testimonial.with_story_images(&stories)
    }

    fn not_found(&self) -> AppError {
        AppError::NotFound {
            page: render::render_not_found(&self.chrome()).into_string(),
        }
    }

    fn fail(&self, err: ContentError) -> AppError {
        if err.is_not_found() {
            return self.not_found();
        }
        AppError::Content {
            source: err,
            page: render::render_server_error(&self.chrome()).into_string(),
        }
    }
}

type SharedState = Arc<AppState>;

// ============================================================================
// Errors
// ============================================================================

/// Handler failure, carrying the rendered error page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Page not found")]
    NotFound { page: String },

    #[error("Content error: {source}")]
    Content {
        #[source]
        source: ContentError,
        page: String,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { page } => (StatusCode::NOT_FOUND, Html(page)).into_response(),
            AppError::Content { source, page } => {
                error!("{source}");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
            }
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60));

    let mut app = Router::new()
        .route("/", get(home_handler))
        .route("/tourist-visa/{slug}", get(visa_redirect_handler))
        .route("/tourist-visa/{slug}/", get(visa_detail_handler))
        .route("/services", get(services_handler))
        .route("/contact", get(contact_handler))
        .route("/blogs", get(blogs_handler))
        .route("/blog/{slug}", get(blog_post_handler))
        .route("/search", get(search_handler));

    for &(route, name) in INFO_PAGES {
        app = app.route(
            route,
            get(move |State(state): State<SharedState>| async move {
                markdown_page(&state, PageKind::Info, name)
            }),
        );
    }

    let static_files = ServeDir::new(&state.static_dir);

    app.nest_service("/static", static_files)
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn home_handler(State(state): State<SharedState>) -> Html<String> {
    let testimonial = state.home_testimonial();
    Html(render::render_home(&state.chrome(), &testimonial).into_string())
}

async fn visa_redirect_handler(
    State(state): State<SharedState>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Redirect, AppError> {
    if !is_url_safe_slug(&slug) {
        return Err(state.not_found());
    }
    Ok(Redirect::permanent(&format!("/tourist-visa/{slug}/")))
}

async fn visa_detail_handler(
    State(state): State<SharedState>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Html<String>, AppError> {
    let config = state
        .content
        .store
        .load_landing(&slug)
        .map_err(|err| state.fail(err))?;
    Ok(Html(
        render::render_visa_detail(&state.chrome(), &slug, &config).into_string(),
    ))
}

async fn services_handler(State(state): State<SharedState>) -> Html<String> {
    Html(render::render_services(&state.chrome()).into_string())
}

async fn contact_handler(State(state): State<SharedState>) -> Html<String> {
    Html(render::render_contact(&state.chrome()).into_string())
}

async fn blogs_handler(State(state): State<SharedState>) -> Html<String> {
    Html(render::render_blogs(&state.chrome(), BLOG_POSTS).into_string())
}

async fn blog_post_handler(
    State(state): State<SharedState>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Html<String>, AppError> {
    markdown_page(&state, PageKind::Blog, &slug)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    s: String,
}

async fn search_handler(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let query = normalize_query(&params.s);
    let hits = search(&query, &state.content.countries.countries);
    Html(render::render_search(&state.chrome(), &query, &hits).into_string())
}

async fn fallback_handler(State(state): State<SharedState>) -> AppError {
    state.not_found()
}

fn markdown_page(state: &AppState, kind: PageKind, slug: &str) -> Result<Html<String>, AppError> {
    let page = state
        .content
        .store
        .load_page(kind, slug)
        .map_err(|err| state.fail(err))?;
    Ok(Html(render::render_page(&state.chrome(), &page).into_string()))
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Bind `address` and serve until Ctrl+C or SIGTERM.
pub async fn serve(state: SharedState, address: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Server running on http://{address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                warn!("Failed to install Ctrl+C handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn load_fails_without_singletons() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = AppState::load(tmp.path(), SiteConfig::default()).err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn home_testimonial_uses_story_images() {
        let site = setup_fixtures();
        let state = AppState::load(site.path(), SiteConfig::default()).unwrap();
        let testimonial = state.home_testimonial();

        assert_eq!(testimonial.title, state.content.testimonial.title);
        assert!(!testimonial.reviews.is_empty());
        assert!(testimonial.reviews.len() <= state.config.stories.max_items);
        assert!(
            testimonial
                .reviews
                .iter()
                .all(|r| r.image.starts_with("img/testimonials/") && r.text.is_empty())
        );
        // Shared record keeps its configured reviews
        assert_eq!(state.content.testimonial.reviews[0].name, "Amelia Hart");
    }

    #[test]
    fn home_testimonial_falls_back_without_images() {
        let site = setup_fixtures();
        std::fs::remove_dir_all(site.path().join("static/img/testimonials")).unwrap();
        let state = AppState::load(site.path(), SiteConfig::default()).unwrap();
        assert_eq!(state.home_testimonial(), state.content.testimonial);
    }

    #[test]
    fn invalid_slug_maps_to_not_found() {
        let site = setup_fixtures();
        let state = AppState::load(site.path(), SiteConfig::default()).unwrap();
        let err = state.fail(ContentError::InvalidSlug("..".into()));
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
