//! mongobrokerd — the provisioning broker daemon.
//!
//! Single binary that assembles the broker subsystems in dependency
//! order: cluster connection, plan catalog, provisioning engine, REST
//! API.
//!
//! # Usage
//!
//! ```text
//! mongobrokerd --secret-file /etc/broker/mongodb.json --port 4848
//! ```
//!
//! Every flag can also come from the environment (`MONGODB_SECRET`,
//! `NAME_PREFIX`, `PORT`, `MONGODB_API_RUNTIME`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::info;

use mongobroker_api::{ApiState, build_router};
use mongobroker_catalog::{PlanCatalog, TenantCatalog};
use mongobroker_cluster::{ClusterConfig, ClusterContext};
use mongobroker_engine::ProvisioningEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Runtime {
    Development,
    Production,
}

#[derive(Parser)]
#[command(name = "mongobrokerd", about = "MongoDB provisioning broker daemon")]
struct Cli {
    /// Path to the cluster secret bundle (JSON).
    #[arg(long, env = "MONGODB_SECRET")]
    secret_file: PathBuf,

    /// Prefix for generated tenant database names.
    #[arg(long, env = "NAME_PREFIX", default_value = "def")]
    name_prefix: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value = "4848")]
    port: u16,

    /// Runtime mode; development enables verbose logging.
    #[arg(long, env = "MONGODB_API_RUNTIME", value_enum, default_value = "development")]
    runtime: Runtime,
}

fn init_tracing(runtime: Runtime) {
    match runtime {
        Runtime::Development => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        "info,mongobrokerd=debug,mongobroker_engine=debug,\
                         mongobroker_catalog=debug,mongobroker_cluster=debug"
                            .parse()
                            .unwrap()
                    }),
                )
                .init();
        }
        Runtime::Production => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "info".parse().unwrap()),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.runtime);

    info!(runtime = ?cli.runtime, "broker daemon starting");

    let config = ClusterConfig::from_secret_file(&cli.secret_file, &cli.name_prefix)?;
    info!(hosts = ?config.hosts, auth_db = %config.auth_db, prefix = %config.name_prefix, "configuration loaded");

    // An unreachable cluster is fatal; do not serve traffic without a
    // working administrative connection.
    let ctx = ClusterContext::connect(config).await?;

    let version = ctx.probe().await?;
    info!(version = %version.version, "cluster reachable");

    let tenants = TenantCatalog::new(&ctx);
    let mut session = ctx.session().await?;
    let provisioned = tenants.count(&mut session).await?;
    drop(session);
    info!(provisioned, "tenant catalog opened");

    let plans = PlanCatalog::load_or_seed(&ctx).await?;
    info!(plans = plans.all().len(), "plan catalog loaded");

    let engine = Arc::new(ProvisioningEngine::new(ctx.clone(), plans));
    let router = build_router(ApiState { ctx, engine });

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    info!(%addr, "API server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("broker daemon stopped");
    Ok(())
}
