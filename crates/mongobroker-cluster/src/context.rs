//! ClusterContext — the shared administrative connection handle.

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential, ServerAddress, Tls, TlsOptions};
use mongodb::{Client, ClientSession, Database};
use tracing::{debug, info};

use crate::config::ClusterConfig;
use crate::error::{ClusterError, ClusterResult};

/// Name of the administrative catalog database.
pub const CATALOG_DB: &str = "broker";

/// Timeout for dialing the cluster at startup. An unreachable or
/// misconfigured cluster is a fatal startup condition, not a
/// transient one, so there is no retry.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cluster version as reported by `buildInfo`.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: String,
}

/// Shared administrative connection to the MongoDB cluster.
///
/// Cheap to clone (the driver client is a handle over a pool) and safe
/// for concurrent use: units of work borrow their own [`ClientSession`]
/// via [`ClusterContext::session`] instead of sharing cursor state, and
/// the session is released when it drops, on every exit path.
#[derive(Clone)]
pub struct ClusterContext {
    client: Client,
    config: Arc<ClusterConfig>,
}

impl ClusterContext {
    /// Construct the driver handle without contacting the cluster.
    ///
    /// The driver connects lazily, so this never performs I/O. Used by
    /// [`ClusterContext::connect`] and by tests that stop short of any
    /// cluster round trip.
    pub fn build(config: ClusterConfig) -> ClusterResult<Self> {
        let port: u16 = config
            .port
            .parse()
            .map_err(|e| ClusterError::Config(format!("bad port {:?}: {e}", config.port)))?;
        let hosts: Vec<ServerAddress> = config
            .hosts
            .iter()
            .map(|h| ServerAddress::Tcp {
                host: h.clone(),
                port: Some(port),
            })
            .collect();

        let credential = Credential::builder()
            .username(config.admin_user.clone())
            .password(config.admin_pass.clone())
            .source(config.auth_db.clone())
            .build();

        let options = ClientOptions::builder()
            .hosts(hosts)
            .credential(credential)
            .direct_connection(true)
            .tls(Tls::Enabled(TlsOptions::default()))
            .connect_timeout(CONNECT_TIMEOUT)
            .server_selection_timeout(CONNECT_TIMEOUT)
            .app_name("mongobrokerd".to_string())
            .build();

        let client =
            Client::with_options(options).map_err(|e| ClusterError::Connect(e.to_string()))?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Dial the cluster and verify it is reachable.
    pub async fn connect(config: ClusterConfig) -> ClusterResult<Self> {
        let ctx = Self::build(config)?;
        // Ping now so a dead cluster fails startup instead of the
        // first request.
        ctx.client
            .database(&ctx.config.auth_db)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ClusterError::Connect(e.to_string()))?;
        info!(hosts = ?ctx.config.hosts, "connected to cluster");
        Ok(ctx)
    }

    /// The immutable connection parameters this context was built from.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Liveness probe; returns the cluster's reported version string.
    ///
    /// Read-only and safe to call concurrently with any other
    /// operation.
    pub async fn probe(&self) -> ClusterResult<VersionInfo> {
        let reply = self
            .client
            .database(&self.config.auth_db)
            .run_command(doc! { "buildInfo": 1 })
            .await
            .map_err(|e| ClusterError::Command(e.to_string()))?;
        let version = reply.get_str("version").unwrap_or_default().to_string();
        debug!(%version, "cluster probe ok");
        Ok(VersionInfo { version })
    }

    /// Borrow an independent session for one logical operation.
    pub async fn session(&self) -> ClusterResult<ClientSession> {
        self.client
            .start_session()
            .await
            .map_err(|e| ClusterError::Session(e.to_string()))
    }

    /// The administrative catalog database.
    pub fn catalog_db(&self) -> Database {
        self.client.database(CATALOG_DB)
    }

    /// A tenant database handle, addressed by name.
    pub fn tenant_db(&self, name: &str) -> Database {
        self.client.database(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ClusterConfig {
        ClusterConfig {
            hosts: vec!["db0.example.com".into(), "db1.example.com".into()],
            port: "27017".into(),
            admin_user: "admin".into(),
            admin_pass: "s3cret".into(),
            auth_db: "admin".into(),
            name_prefix: "def".into(),
        }
    }

    #[test]
    fn build_is_offline() {
        let ctx = ClusterContext::build(test_config()).unwrap();
        assert_eq!(ctx.config().primary_host(), "db0.example.com");
        assert_eq!(ctx.catalog_db().name(), CATALOG_DB);
        assert_eq!(ctx.tenant_db("defabc123").name(), "defabc123");
    }

    #[test]
    fn build_rejects_bad_port() {
        let mut config = test_config();
        config.port = "notaport".into();
        assert!(matches!(
            ClusterContext::build(config),
            Err(ClusterError::Config(_))
        ));
    }
}
