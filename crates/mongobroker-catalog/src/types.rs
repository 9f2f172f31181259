//! Domain types persisted in the broker catalog.
//!
//! Wire field names (`hostname`, `billingcode`) are part of the
//! broker's public JSON contract and match what is stored in the
//! catalog collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named service tier offered at provisioning time.
///
/// Created only by first-run seeding; never updated or deleted by the
/// broker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRecord {
    pub name: String,
    pub size: String,
    pub description: String,
}

/// One provisioned tenant database and its dedicated login.
///
/// `name` doubles as the name of the provisioned database and is
/// unique within the catalog by construction. Records are inserted
/// and deleted whole, never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenantRecord {
    pub name: String,
    pub username: String,
    pub password: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "hostname")]
    pub host: String,
    pub port: String,
    pub plan: String,
    #[serde(rename = "billingcode")]
    pub billing_code: String,
    #[serde(default)]
    pub misc: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_record() -> TenantRecord {
        TenantRecord {
            name: "defabc123def456".into(),
            username: "u1122334455aa".into(),
            password: "p99887766bbcc".into(),
            created: Utc::now(),
            host: "db0.example.com".into(),
            port: "27017".into(),
            plan: "shared".into(),
            billing_code: "acct-1".into(),
            misc: "first tenant".into(),
        }
    }

    #[test]
    fn tenant_wire_field_names() {
        let value = serde_json::to_value(test_record()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "name",
            "username",
            "password",
            "created",
            "hostname",
            "port",
            "plan",
            "billingcode",
            "misc",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
        assert_eq!(obj.len(), 9);
    }

    #[test]
    fn tenant_roundtrip() {
        let record = test_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: TenantRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn tenant_tolerates_storage_id_field() {
        // Documents read back from the catalog carry an _id.
        let json = r#"{
            "_id": {"$oid": "66b1c2d3e4f5a6b7c8d9e0f1"},
            "name": "defabc", "username": "u1", "password": "p1",
            "created": "2026-08-31T12:00:00Z", "hostname": "db0",
            "port": "27017", "plan": "ha", "billingcode": "acct-2",
            "misc": ""
        }"#;
        let record: TenantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.plan, "ha");
    }

    #[test]
    fn tenant_misc_defaults_empty() {
        let json = r#"{
            "name": "defabc", "username": "u1", "password": "p1",
            "created": "2026-08-31T12:00:00Z", "hostname": "db0",
            "port": "27017", "plan": "shared", "billingcode": "acct-1"
        }"#;
        let record: TenantRecord = serde_json::from_str(json).unwrap();
        assert!(record.misc.is_empty());
    }

    #[test]
    fn plan_roundtrip() {
        let plan = PlanRecord {
            name: "shared".into(),
            size: "Unlimited".into(),
            description: "Shared Server".into(),
        };
        let json = serde_json::to_string(&plan).unwrap();
        let back: PlanRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
