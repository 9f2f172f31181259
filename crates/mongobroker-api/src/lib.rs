//! mongobroker-api — REST surface for the provisioning broker.
//!
//! Translates HTTP requests into provisioning-engine calls and
//! serializes the results. Failure bodies are always a JSON object
//! carrying a short human-readable message.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/ping` | Liveness, plain `pong` |
//! | GET | `/octhc` | Cluster health probe |
//! | GET | `/v1/mongodb/plans` | Plan listing (name → size) |
//! | POST | `/v1/mongodb/instance` | Provision a tenant database |
//! | GET | `/v1/mongodb/instance/{name}` | Tenant record + URL |
//! | DELETE | `/v1/mongodb/instance/{name}` | Deprovision |
//! | GET | `/v1/mongodb/url/{name}` | Connection URL only |
//! | GET | `/v1/mongodb` | List all tenants |
//! | GET | `/v1/mongodb/{name}` | Tenant record + URL (alias) |
//! | * | `/v1/mongodb/{name}/backups…`, `/logs…` | 501, not offered |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use mongobroker_cluster::ClusterContext;
use mongobroker_engine::ProvisioningEngine;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub ctx: ClusterContext,
    pub engine: Arc<ProvisioningEngine>,
}

/// Build the complete broker router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::not_supported))
        .route("/ping", get(handlers::ping))
        .route("/octhc", get(handlers::octhc))
        .route("/v1/mongodb", get(handlers::list_tenants))
        .route("/v1/mongodb/plans", get(handlers::list_plans))
        .route("/v1/mongodb/instance", post(handlers::provision))
        .route(
            "/v1/mongodb/instance/{name}",
            get(handlers::tenant_info).delete(handlers::deprovision),
        )
        .route("/v1/mongodb/url/{name}", get(handlers::tenant_url))
        .route(
            "/v1/mongodb/{name}",
            get(handlers::tenant_info).put(handlers::not_supported),
        )
        .route(
            "/v1/mongodb/{name}/backups",
            get(handlers::not_supported).put(handlers::not_supported),
        )
        .route("/v1/mongodb/{name}/backups/{backup}", get(handlers::not_supported))
        .route("/v1/mongodb/{name}/logs", get(handlers::not_supported))
        .route(
            "/v1/mongodb/{name}/logs/{dir}/{file}",
            get(handlers::not_supported),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
