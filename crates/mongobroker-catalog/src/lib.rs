//! mongobroker-catalog — metadata catalog for the provisioning broker.
//!
//! Two collections inside the administrative `broker` database:
//! `plans` (read-mostly reference data, cached in memory after load)
//! and `provision` (one document per provisioned tenant database).
//! All cluster I/O runs under a session borrowed from the shared
//! [`ClusterContext`](mongobroker_cluster::ClusterContext).

pub mod error;
pub mod plans;
pub mod tenants;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use plans::PlanCatalog;
pub use tenants::TenantCatalog;
pub use types::{PlanRecord, TenantRecord};
