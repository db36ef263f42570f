//! Node Assembly
//!
//! Wires one membership service and one replicated counter into an HTTP
//! router and runs them together with the background loops.

use anyhow::Result;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::bootstrap::Bootstrap;
use crate::client::PeerClient;
use crate::config::NodeConfig;
use crate::counter::handlers::{handle_get_count, handle_increment};
use crate::counter::protocol::{ENDPOINT_COUNT, ENDPOINT_INCREMENT};
use crate::counter::service::ReplicatedCounter;
use crate::membership::handlers::{handle_join, handle_peers, handle_ping};
use crate::membership::protocol::{ENDPOINT_JOIN, ENDPOINT_PEERS, ENDPOINT_PING};
use crate::membership::service::MembershipService;

pub struct Node {
    pub membership: Arc<MembershipService>,
    pub counter: Arc<ReplicatedCounter>,
    client: PeerClient,
    config: NodeConfig,
}

impl Node {
    pub fn new(config: NodeConfig) -> Self {
        let client = PeerClient::new(config.request_timeout);

        let membership = MembershipService::new(
            config.node_id.clone(),
            config.seeds.clone(),
            config.membership.clone(),
            config.propagation_retry.clone(),
            client.clone(),
        );
        let counter = ReplicatedCounter::new(
            membership.clone(),
            config.propagation_retry.clone(),
            client.clone(),
        );

        Self {
            membership,
            counter,
            client,
            config,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(ENDPOINT_JOIN, post(handle_join))
            .route(ENDPOINT_PING, get(handle_ping))
            .route(ENDPOINT_PEERS, get(handle_peers))
            .route(ENDPOINT_INCREMENT, post(handle_increment))
            .route(ENDPOINT_COUNT, get(handle_get_count))
            .layer(Extension(self.membership.clone()))
            .layer(Extension(self.counter.clone()))
    }

    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(
            self.membership.clone(),
            self.counter.clone(),
            self.client.clone(),
            self.config.seeds.clone(),
            self.config.join_retry.clone(),
        )
    }

    /// Serves on `listener` until `shutdown` resolves.
    ///
    /// The heartbeat loop and the bootstrap sequence start in the background
    /// before the first request is accepted.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        let heartbeat = {
            let membership = self.membership.clone();
            tokio::spawn(async move {
                membership.heartbeat_loop().await;
            })
        };

        let bootstrap = self.bootstrap();
        tokio::spawn(async move {
            bootstrap.run().await;
        });

        tracing::info!(
            "Node {} is running on {}",
            self.config.node_id,
            listener.local_addr()?
        );

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        heartbeat.abort();
        served?;
        tracing::info!("Node {} stopped", self.config.node_id);
        Ok(())
    }
}
