use axum::{Extension, Json, http::StatusCode};
use std::sync::Arc;

use super::protocol::{CountResponse, IncrementRequest};
use super::service::ReplicatedCounter;

pub async fn handle_increment(
    Extension(counter): Extension<Arc<ReplicatedCounter>>,
    Json(req): Json<IncrementRequest>,
) -> StatusCode {
    if req.node_id.as_str().trim().is_empty() {
        tracing::warn!("Rejected /increment with empty node_id");
        return StatusCode::BAD_REQUEST;
    }

    counter.handle_increment_request(req.node_id).await;
    StatusCode::OK
}

pub async fn handle_get_count(
    Extension(counter): Extension<Arc<ReplicatedCounter>>,
) -> (StatusCode, Json<CountResponse>) {
    let count = counter.get_count().await;
    tracing::debug!("Returning count: {}", count);
    (StatusCode::OK, Json(CountResponse { count }))
}
