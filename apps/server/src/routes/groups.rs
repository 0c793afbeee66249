//! Region and list endpoints

use axum::{extract::State, Json};

use crate::models::{GroupSummary, GroupsResponse};
use crate::AppState;

/// GET /api/groups
pub async fn list(State(state): State<AppState>) -> Json<GroupsResponse> {
    Json(GroupsResponse {
        regions: state.catalog.regions().iter().map(GroupSummary::from).collect(),
        lists: state.catalog.lists().iter().map(GroupSummary::from).collect(),
    })
}
