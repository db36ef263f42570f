use axum::{Extension, Json, http::StatusCode};
use std::sync::Arc;

use super::protocol::{JoinRequest, PeerList};
use super::service::MembershipService;

pub async fn handle_join(
    Extension(membership): Extension<Arc<MembershipService>>,
    Json(req): Json<JoinRequest>,
) -> (StatusCode, Json<PeerList>) {
    tracing::debug!("Received /join request for {}", req.id);

    if req.id.as_str().trim().is_empty() {
        tracing::warn!("Rejected /join with empty id");
        return (StatusCode::BAD_REQUEST, Json(Vec::new()));
    }

    let peers = membership.join(req.id);
    (StatusCode::OK, Json(peers))
}

pub async fn handle_ping() -> StatusCode {
    StatusCode::OK
}

pub async fn handle_peers(
    Extension(membership): Extension<Arc<MembershipService>>,
) -> (StatusCode, Json<PeerList>) {
    let peers = membership.get_peers();
    tracing::debug!("Returning peer list: {:?}", peers);
    (StatusCode::OK, Json(peers))
}
