//! Error types for provisioning operations.

use thiserror::Error;

use mongobroker_catalog::CatalogError;
use mongobroker_cluster::ClusterError;

/// Provision failures. The validation variants cause no state change;
/// `Persist` means the metadata write failed before any login was
/// created, so nothing needs rolling back.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Plan not set")]
    PlanNotSet,

    #[error("Invalid Plan")]
    InvalidPlan,

    #[error("BillingCode not set")]
    BillingCodeNotSet,

    #[error("failed to persist tenant record: {0}")]
    Persist(#[from] CatalogError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

/// Lookup failures.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no tenant named {0}")]
    NotFound(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

/// Deprovision failures.
#[derive(Debug, Error)]
pub enum DeprovisionError {
    #[error("no tenant named {0}")]
    NotFound(String),

    /// The tenant is fully intact; a retry is expected to succeed.
    #[error("failed to drop tenant database {0}")]
    DropDatabase(String),

    /// The database is gone but its catalog record remains; needs
    /// out-of-band reconciliation.
    #[error("tenant database {0} dropped but its catalog record remains")]
    RecordDelete(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}
