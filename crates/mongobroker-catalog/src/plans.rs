//! Plan catalog — read-through cache over the `plans` collection.

use std::collections::BTreeMap;

use mongodb::Collection;
use mongodb::bson::doc;
use tracing::info;

use mongobroker_cluster::ClusterContext;

use crate::error::{CatalogError, CatalogResult};
use crate::types::PlanRecord;

/// Collection holding plan reference data.
pub const PLANS_COLLECTION: &str = "plans";

/// Plans seeded on first run, when the collection is empty.
pub(crate) fn default_plans() -> Vec<PlanRecord> {
    vec![
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
    ]
}

/// In-memory plan cache, built once at startup.
///
/// A value type: rebuild and swap to invalidate. Plans never change
/// under the broker at runtime, so there is no refresh path.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    records: Vec<PlanRecord>,
}

impl PlanCatalog {
    /// Read all plans; seed the default set if the collection is empty.
    ///
    /// Seeding is not guarded against concurrent first-run
    /// initialization; exactly one process instance performs first-run
    /// setup in a deployment.
    pub async fn load_or_seed(ctx: &ClusterContext) -> CatalogResult<Self> {
        let coll: Collection<PlanRecord> = ctx.catalog_db().collection(PLANS_COLLECTION);
        let mut session = ctx
            .session()
            .await
            .map_err(|e| CatalogError::Session(e.to_string()))?;

        let mut records = Vec::new();
        let mut cursor = coll
            .find(doc! {})
            .session(&mut session)
            .await
            .map_err(|e| CatalogError::Read(e.to_string()))?;
        while let Some(plan) = cursor.next(&mut session).await {
            records.push(plan.map_err(|e| CatalogError::Read(e.to_string()))?);
        }

        if records.is_empty() {
            records = default_plans();
            info!(count = records.len(), "seeding plan catalog");
            coll.insert_many(&records)
                .session(&mut session)
                .await
                .map_err(|e| CatalogError::Write(e.to_string()))?;
        }

        Ok(Self::from_records(records))
    }

    /// Build a cache directly from records.
    pub fn from_records(records: Vec<PlanRecord>) -> Self {
        Self { records }
    }

    /// All cached plan records.
    pub fn all(&self) -> &[PlanRecord] {
        &self.records
    }

    /// Plan name → size, the shape served by the plans listing.
    pub fn sizes(&self) -> BTreeMap<String, String> {
        self.records
            .iter()
            .map(|p| (p.name.clone(), p.size.clone()))
            .collect()
    }

    /// Membership test used to validate provision requests.
    pub fn exists(&self, name: &str) -> bool {
        self.records.iter().any(|p| p.name == name)
    }
}
