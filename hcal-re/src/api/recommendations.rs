//! Recommendation endpoints
//!
//! Context fields arrive as camelCase query parameters (GET) or a JSON body
//! (POST). An empty ranking is a normal answer; callers may ask for a random
//! `fallback` sample instead.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use hcal_common::{AudioEntry, Chakra, Experience, RecommendationContext, TimeOfDay};

use crate::AppState;

/// Recommendation request: context fields plus an optional fallback size
///
/// Spelled out rather than flattening [`RecommendationContext`] because
/// query-string numbers do not survive `#[serde(flatten)]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub meditation_type: Option<String>,
    pub chakra_focus: Option<Chakra>,
    pub emotional_state: Option<String>,
    pub time_of_day: Option<TimeOfDay>,
    pub experience: Option<Experience>,
    pub duration: Option<String>,
    pub intention: Option<String>,

    /// Random sample size to return when nothing matches
    pub fallback: Option<usize>,
}

impl RecommendationRequest {
    pub fn into_parts(self) -> (RecommendationContext, Option<usize>) {
        let context = RecommendationContext {
            meditation_type: self.meditation_type,
            chakra_focus: self.chakra_focus,
            emotional_state: self.emotional_state,
            time_of_day: self.time_of_day,
            experience: self.experience,
            duration: self.duration,
            intention: self.intention,
        };
        (context, self.fallback)
    }
}

fn respond(state: &AppState, request: RecommendationRequest) -> Json<Vec<AudioEntry>> {
    let (context, fallback) = request.into_parts();
    let recommendations = state.recommender().recommend(&context);

    let entries: Vec<AudioEntry> = match fallback {
        Some(count) if recommendations.is_empty() && count > 0 => {
            info!(count, "No recommendations matched; returning random fallback");
            state
                .library
                .catalog()
                .random_sample(count)
                .into_iter()
                .cloned()
                .collect()
        }
        _ => recommendations.into_iter().cloned().collect(),
    };

    debug!(?context, returned = entries.len(), "Recommendation request served");
    Json(entries)
}

/// GET /api/recommendations?chakraFocus=heart&timeOfDay=night
pub async fn recommendations_from_query(
    State(state): State<AppState>,
    Query(request): Query<RecommendationRequest>,
) -> Json<Vec<AudioEntry>> {
    respond(&state, request)
}

/// POST /api/recommendations with a JSON context body
pub async fn recommendations_from_body(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Vec<AudioEntry>> {
    respond(&state, request)
}
