//! hcal-re library - Recommendation Engine module
//!
//! Serves the healing audio catalog and context-driven recommendations over
//! HTTP. The catalog and lookup tables are loaded once at startup and shared
//! read-only; every request computes independently, so no locking is needed.

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hcal_common::HealingLibrary;

pub mod api;
pub mod error;
pub mod recommender;

pub use error::{ApiError, ApiResult};
pub use recommender::{Recommender, ScoredEntry, MAX_RECOMMENDATIONS};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable catalog and mapping tables
    pub library: Arc<HealingLibrary>,
}

impl AppState {
    pub fn new(library: HealingLibrary) -> Self {
        Self {
            library: Arc::new(library),
        }
    }

    pub fn recommender(&self) -> Recommender<'_> {
        Recommender::new(&self.library)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let routes = Router::new()
        .route("/api/audio", get(api::list_audio))
        .route("/api/audio/random", get(api::random_audio))
        .route("/api/audio/:id", get(api::get_audio))
        .route(
            "/api/recommendations",
            get(api::recommendations_from_query).post(api::recommendations_from_body),
        )
        .route("/api/build-info", get(api::get_build_info));

    Router::new()
        .merge(routes)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Calendar front end is served from a different origin
        .layer(CorsLayer::permissive())
}
