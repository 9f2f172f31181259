//! Provisioning engine — provision, inspect, list, deprovision.

use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};

use mongobroker_catalog::{PlanCatalog, TenantCatalog, TenantRecord};
use mongobroker_cluster::ClusterContext;

use crate::error::{DeprovisionError, LookupError, ProvisionError};
use crate::ident::TenantIdentity;

/// Provision request body.
///
/// Field aliases accept the capitalized spellings some upstream
/// brokers send (`Plan`, `BillingCode`, `Misc`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvisionRequest {
    #[serde(default, alias = "Plan")]
    pub plan: String,
    #[serde(default, rename = "billingcode", alias = "BillingCode")]
    pub billing_code: String,
    #[serde(default, alias = "Misc")]
    pub misc: String,
}

/// Orchestrates tenant provisioning and teardown.
///
/// Holds the shared cluster handle, the plan cache, and the tenant
/// catalog. Constructed once at startup, after the cluster connection
/// and plan load, and shared behind `Arc`. Calls for distinct tenants
/// may interleave freely; the steps within one call are strictly
/// sequential.
pub struct ProvisioningEngine {
    ctx: ClusterContext,
    plans: PlanCatalog,
    tenants: TenantCatalog,
}

impl ProvisioningEngine {
    pub fn new(ctx: ClusterContext, plans: PlanCatalog) -> Self {
        let tenants = TenantCatalog::new(&ctx);
        Self {
            ctx,
            plans,
            tenants,
        }
    }

    /// The plan cache this engine validates against.
    pub fn plans(&self) -> &PlanCatalog {
        &self.plans
    }

    /// Short-circuit validation; first failure wins.
    fn validate(&self, req: &ProvisionRequest) -> Result<(), ProvisionError> {
        if req.plan.is_empty() {
            Err(ProvisionError::PlanNotSet)
        } else if !self.plans.exists(&req.plan) {
            Err(ProvisionError::InvalidPlan)
        } else if req.billing_code.is_empty() {
            Err(ProvisionError::BillingCodeNotSet)
        } else {
            Ok(())
        }
    }

    /// Provision a new tenant database.
    ///
    /// The metadata record is persisted before the login is created so
    /// a crash between the two steps leaves a discoverable record
    /// rather than an untracked login. A login-creation failure after
    /// the record is persisted is logged and the record still
    /// returned; that window is reconciled out-of-band.
    pub async fn provision(&self, req: &ProvisionRequest) -> Result<TenantRecord, ProvisionError> {
        self.validate(req)?;

        let config = self.ctx.config();
        let identity = TenantIdentity::generate(&config.name_prefix);
        let record = TenantRecord {
            name: identity.name,
            username: identity.username,
            password: identity.password,
            created: Utc::now(),
            host: config.primary_host().to_string(),
            port: config.port.clone(),
            plan: req.plan.clone(),
            billing_code: req.billing_code.clone(),
            misc: req.misc.clone(),
        };

        let mut session = self.ctx.session().await?;
        self.tenants.insert(&mut session, &record).await?;
        info!(name = %record.name, plan = %record.plan, "tenant record persisted");

        match self
            .ctx
            .create_scoped_user(
                &mut session,
                &record.name,
                &record.username,
                &record.password,
                &record.billing_code,
            )
            .await
        {
            Ok(()) => info!(name = %record.name, user = %record.username, "scoped login created"),
            // Record kept deliberately: the catalog entry is the
            // discoverable side of this inconsistency window.
            Err(e) => {
                error!(name = %record.name, error = %e, "scoped login creation failed; record kept")
            }
        }

        Ok(record)
    }

    /// Pure lookup, no side effects.
    pub async fn get_info(&self, name: &str) -> Result<TenantRecord, LookupError> {
        let mut session = self.ctx.session().await?;
        self.tenants
            .find_by_name(&mut session, name)
            .await?
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    /// Every provisioned tenant.
    pub async fn list(&self) -> Result<Vec<TenantRecord>, LookupError> {
        let mut session = self.ctx.session().await?;
        Ok(self.tenants.list_all(&mut session).await?)
    }

    /// Tear down a tenant: login, then database, then catalog record.
    pub async fn deprovision(&self, name: &str) -> Result<(), DeprovisionError> {
        let mut session = self.ctx.session().await?;
        let record = self
            .tenants
            .find_by_name(&mut session, name)
            .await?
            .ok_or_else(|| DeprovisionError::NotFound(name.to_string()))?;

        // A dangling login on a database about to be destroyed is
        // harmless; keep going if this fails.
        if let Err(e) = self.ctx.drop_user(&mut session, name, &record.username).await {
            warn!(name, user = %record.username, error = %e, "failed to drop scoped login");
        }

        // Destroying the data is the irreversible, authoritative step.
        // Abort before touching the catalog record so a retry can
        // still find the tenant.
        if let Err(e) = self.ctx.drop_database(&mut session, name).await {
            error!(name, error = %e, "failed to drop tenant database");
            return Err(DeprovisionError::DropDatabase(name.to_string()));
        }

        match self.tenants.delete_by_name(&mut session, name).await {
            Ok(true) => {}
            Ok(false) => warn!(name, "record vanished between lookup and delete"),
            Err(e) => {
                error!(name, error = %e, "database dropped but record deletion failed");
                return Err(DeprovisionError::RecordDelete(name.to_string()));
            }
        }

        info!(name, "tenant deprovisioned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongobroker_catalog::PlanRecord;
    use mongobroker_cluster::ClusterConfig;

    fn test_engine() -> ProvisioningEngine {
        let config = ClusterConfig {
            hosts: vec!["db0.example.com".into()],
            port: "27017".into(),
            admin_user: "admin".into(),
            admin_pass: "s3cret".into(),
            auth_db: "admin".into(),
            name_prefix: "def".into(),
        };
        // build() never dials, so validation paths are testable
        // without a cluster.
        let ctx = ClusterContext::build(config).unwrap();
        let plans = PlanCatalog::from_records(vec![
            PlanRecord {
                name: "shared".into(),
                size: "Unlimited".into(),
                description: "Shared Server".into(),
            },
            PlanRecord {
                name: "ha".into(),
                size: "100gb".into(),
                description: "High Availability".into(),
            },
        ]);
        ProvisioningEngine::new(ctx, plans)
    }

    fn request(plan: &str, billing_code: &str) -> ProvisionRequest {
        ProvisionRequest {
            plan: plan.into(),
            billing_code: billing_code.into(),
            misc: String::new(),
        }
    }

    #[tokio::test]
    async fn validate_rejects_empty_plan_first() {
        let engine = test_engine();
        // Plan wins over billing code when both are missing.
        assert!(matches!(
            engine.validate(&request("", "")),
            Err(ProvisionError::PlanNotSet)
        ));
    }

    #[tokio::test]
    async fn validate_rejects_unknown_plan() {
        let engine = test_engine();
        assert!(matches!(
            engine.validate(&request("dedicated", "acct-1")),
            Err(ProvisionError::InvalidPlan)
        ));
    }

    #[tokio::test]
    async fn validate_rejects_missing_billing_code() {
        let engine = test_engine();
        assert!(matches!(
            engine.validate(&request("shared", "")),
            Err(ProvisionError::BillingCodeNotSet)
        ));
    }

    #[tokio::test]
    async fn validate_accepts_known_plans() {
        let engine = test_engine();
        assert!(engine.validate(&request("shared", "acct-1")).is_ok());
        assert!(engine.validate(&request("ha", "acct-1")).is_ok());
    }

    #[test]
    fn request_accepts_capitalized_aliases() {
        let req: ProvisionRequest =
            serde_json::from_str(r#"{"Plan":"ha","BillingCode":"acct-2","Misc":"note"}"#).unwrap();
        assert_eq!(req.plan, "ha");
        assert_eq!(req.billing_code, "acct-2");
        assert_eq!(req.misc, "note");
    }

    #[test]
    fn request_accepts_lowercase_fields() {
        let req: ProvisionRequest =
            serde_json::from_str(r#"{"plan":"shared","billingcode":"acct-1"}"#).unwrap();
        assert_eq!(req.plan, "shared");
        assert_eq!(req.billing_code, "acct-1");
        assert!(req.misc.is_empty());
    }

    #[test]
    fn request_missing_fields_default_empty() {
        let req: ProvisionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.plan.is_empty());
        assert!(req.billing_code.is_empty());
    }
}
