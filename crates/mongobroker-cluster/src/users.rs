//! Thin wrapper over MongoDB's native user administration commands.
//!
//! All commands run against the tenant's own database so the created
//! login is valid only there. No transaction spans these commands and
//! the catalog writes that surround them; callers own the ordering.

use mongodb::ClientSession;
use mongodb::bson::doc;
use tracing::debug;

use crate::context::ClusterContext;
use crate::error::{ClusterError, ClusterResult};

impl ClusterContext {
    /// Create a login valid only against `db_name`, with read-write
    /// and database-admin privileges scoped to that database. The
    /// tenant name and billing code ride along as custom data so the
    /// login is attributable from the cluster side alone.
    pub async fn create_scoped_user(
        &self,
        session: &mut ClientSession,
        db_name: &str,
        username: &str,
        password: &str,
        billing_code: &str,
    ) -> ClusterResult<()> {
        let cmd = doc! {
            "createUser": username,
            "pwd": password,
            "roles": [
                { "role": "readWrite", "db": db_name },
                { "role": "dbAdmin", "db": db_name },
            ],
            "customData": { "database": db_name, "billingcode": billing_code },
        };
        self.tenant_db(db_name)
            .run_command(cmd)
            .session(&mut *session)
            .await
            .map_err(|e| ClusterError::Command(e.to_string()))?;
        debug!(user = username, db = db_name, "scoped user created");
        Ok(())
    }

    /// Drop a login from the named database.
    pub async fn drop_user(
        &self,
        session: &mut ClientSession,
        db_name: &str,
        username: &str,
    ) -> ClusterResult<()> {
        self.tenant_db(db_name)
            .run_command(doc! { "dropUser": username })
            .session(&mut *session)
            .await
            .map_err(|e| ClusterError::Command(e.to_string()))?;
        debug!(user = username, db = db_name, "user dropped");
        Ok(())
    }

    /// Destroy the named database and all data in it.
    pub async fn drop_database(
        &self,
        session: &mut ClientSession,
        db_name: &str,
    ) -> ClusterResult<()> {
        self.tenant_db(db_name)
            .run_command(doc! { "dropDatabase": 1 })
            .session(&mut *session)
            .await
            .map_err(|e| ClusterError::Command(e.to_string()))?;
        debug!(db = db_name, "database dropped");
        Ok(())
    }
}
