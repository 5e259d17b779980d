//! Interest route handlers.

use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::middleware::RequireUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::{AggregatedInterests, UserInterest};

/// A shopper's view counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestsView {
    pub interests: Vec<UserInterest>,
    pub aggregated: AggregatedInterests,
}

/// Raw per-product counters and the per-category aggregation.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResponse<InterestsView> {
    ApiResponse::ok(InterestsView {
        interests: state.interests().get_user_interests(&user).await,
        aggregated: state.interests().get_aggregated_interests(&user).await,
    })
}

/// Forget the shopper's views; the header falls back to the static menu.
#[instrument(skip(state, user))]
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResponse<()> {
    state.interests().clear_user_interests(&user).await;
    ApiResponse::message("Interests cleared")
}
