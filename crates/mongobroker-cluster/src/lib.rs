//! mongobroker-cluster — administrative connection to the MongoDB cluster.
//!
//! Owns the long-lived driver client shared by the whole broker
//! process: dialing with admin credentials over TLS, the liveness
//! probe, per-operation session borrowing, and a thin wrapper over
//! MongoDB's native user administration commands.
//!
//! Every other component receives a [`ClusterContext`] handle at
//! construction time; there is no ambient global connection.

pub mod config;
pub mod context;
pub mod error;
pub mod users;

pub use config::ClusterConfig;
pub use context::{CATALOG_DB, ClusterContext, VersionInfo};
pub use error::{ClusterError, ClusterResult};
