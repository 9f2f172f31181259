//! Tenant catalog — typed CRUD over the `provision` collection.

use mongodb::bson::doc;
use mongodb::{ClientSession, Collection};
use tracing::debug;

use mongobroker_cluster::ClusterContext;

use crate::error::{CatalogError, CatalogResult};
use crate::types::TenantRecord;

/// Collection recording one document per provisioned tenant database.
pub const PROVISION_COLLECTION: &str = "provision";

/// Handle to the provisioning metadata collection.
///
/// Cheap to clone. Every operation runs under a caller-borrowed
/// session so the caller controls cursor isolation and release; the
/// catalog itself never retries a failed operation.
#[derive(Clone)]
pub struct TenantCatalog {
    collection: Collection<TenantRecord>,
}

impl TenantCatalog {
    pub fn new(ctx: &ClusterContext) -> Self {
        Self {
            collection: ctx.catalog_db().collection(PROVISION_COLLECTION),
        }
    }

    /// Persist a new tenant record. The caller guarantees `name`
    /// uniqueness by construction; no index enforces it here.
    pub async fn insert(
        &self,
        session: &mut ClientSession,
        record: &TenantRecord,
    ) -> CatalogResult<()> {
        self.collection
            .insert_one(record)
            .session(&mut *session)
            .await
            .map_err(|e| CatalogError::Write(e.to_string()))?;
        debug!(name = %record.name, "tenant record stored");
        Ok(())
    }

    /// Exact-match lookup on the tenant name.
    pub async fn find_by_name(
        &self,
        session: &mut ClientSession,
        name: &str,
    ) -> CatalogResult<Option<TenantRecord>> {
        self.collection
            .find_one(doc! { "name": name })
            .session(&mut *session)
            .await
            .map_err(|e| CatalogError::Read(e.to_string()))
    }

    /// Every tenant record; insertion order not guaranteed.
    pub async fn list_all(&self, session: &mut ClientSession) -> CatalogResult<Vec<TenantRecord>> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .session(&mut *session)
            .await
            .map_err(|e| CatalogError::Read(e.to_string()))?;
        let mut records = Vec::new();
        while let Some(record) = cursor.next(session).await {
            records.push(record.map_err(|e| CatalogError::Read(e.to_string()))?);
        }
        Ok(records)
    }

    /// Remove exactly the record matching `name`. Returns whether a
    /// record existed.
    pub async fn delete_by_name(
        &self,
        session: &mut ClientSession,
        name: &str,
    ) -> CatalogResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "name": name })
            .session(&mut *session)
            .await
            .map_err(|e| CatalogError::Delete(e.to_string()))?;
        debug!(name, deleted = result.deleted_count, "tenant record delete");
        Ok(result.deleted_count > 0)
    }

    /// Number of provisioned tenants.
    pub async fn count(&self, session: &mut ClientSession) -> CatalogResult<u64> {
        self.collection
            .count_documents(doc! {})
            .session(&mut *session)
            .await
            .map_err(|e| CatalogError::Read(e.to_string()))
    }
}
