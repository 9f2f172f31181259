//! mongobroker-engine — the state-changing core of the broker.
//!
//! Orchestrates tenant provisioning: identity and credential
//! generation, persistence of the metadata record, creation of the
//! scoped login, and the reverse sequence on deprovisioning.

pub mod engine;
pub mod error;
pub mod ident;

pub use engine::{ProvisionRequest, ProvisioningEngine};
pub use error::{DeprovisionError, LookupError, ProvisionError};
pub use ident::TenantIdentity;
