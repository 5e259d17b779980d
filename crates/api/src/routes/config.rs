//! Dashboard configuration for the shell.

use axum::extract::State;
use tracing::instrument;

use crate::middleware::OptionalUser;
use crate::navigation::{DashboardConfig, build_header};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Serve the dashboard menus.
///
/// Identified shoppers get a header personalized from their product views;
/// everyone else gets the static header.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> ApiResponse<DashboardConfig> {
    let delay = state.config().config_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let header = match user {
        Some(user) => {
            let aggregated = state.interests().get_aggregated_interests(&user).await;
            build_header(Some(&aggregated))
        }
        None => build_header(None),
    };

    tracing::debug!(entries = header.len(), "Built header navigation");
    ApiResponse::ok(DashboardConfig::with_header(header))
}
