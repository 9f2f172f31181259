//! Tenant identity and credential generation.
//!
//! Each generated value is an independent draw from the OS CSPRNG,
//! hex-encoded and prefixed. Collisions are negligible at this entropy
//! and no value is guessable from another.

use rand::RngCore;
use rand::rngs::OsRng;

/// Random bytes per generated suffix (12 hex characters).
const SUFFIX_BYTES: usize = 6;

fn random_suffix() -> String {
    let mut buf = [0u8; SUFFIX_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Generated identity for one tenant: database name and credentials.
#[derive(Debug, Clone)]
pub struct TenantIdentity {
    /// Database name, `{prefix}{suffix}`. Doubles as the catalog key.
    pub name: String,
    /// Login username, `u{suffix}`.
    pub username: String,
    /// Login password, `p{suffix}`.
    pub password: String,
}

impl TenantIdentity {
    pub fn generate(name_prefix: &str) -> Self {
        Self {
            name: format!("{name_prefix}{}", random_suffix()),
            username: format!("u{}", random_suffix()),
            password: format!("p{}", random_suffix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_well_formed() {
        let id = TenantIdentity::generate("def");
        assert!(id.name.starts_with("def"));
        assert_eq!(id.name.len(), 3 + SUFFIX_BYTES * 2);
        assert!(id.username.starts_with('u'));
        assert_eq!(id.username.len(), 1 + SUFFIX_BYTES * 2);
        assert!(id.password.starts_with('p'));
        assert_eq!(id.password.len(), 1 + SUFFIX_BYTES * 2);
    }

    #[test]
    fn suffixes_are_lowercase_hex() {
        let id = TenantIdentity::generate("def");
        let suffix = &id.name[3..];
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fields_are_independent_draws() {
        let id = TenantIdentity::generate("u");
        // Same prefix length for name and username here; the suffixes
        // must still differ.
        assert_ne!(id.name, id.username);
        assert_ne!(&id.username[1..], &id.password[1..]);
    }

    #[test]
    fn repeated_generation_is_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = TenantIdentity::generate("def");
            assert!(seen.insert(id.name), "generated name collided");
        }
    }
}
