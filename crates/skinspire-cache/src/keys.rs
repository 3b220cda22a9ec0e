//! Cache key builders for SkinSpire cache entries.
//!
//! Centralising key construction prevents typos and makes it easy to
//! find every key the application uses. List keys embed a stable hash of
//! the full query parameters; invalidation removes a whole
//! entity-within-tenant prefix at once.

use std::hash::{DefaultHasher, Hash, Hasher};

use uuid::Uuid;

/// Prefix applied to all SkinSpire cache keys.
const PREFIX: &str = "skinspire";

/// Cache key for one list-query result.
pub fn entity_list(entity_type: &str, hospital_id: Uuid, params_fingerprint: u64) -> String {
    format!("{PREFIX}:list:{entity_type}:{hospital_id}:{params_fingerprint:016x}")
}

/// Prefix covering every cached list result for an entity within a tenant.
pub fn entity_list_prefix(entity_type: &str, hospital_id: Uuid) -> String {
    format!("{PREFIX}:list:{entity_type}:{hospital_id}:")
}

/// Cache key for one entity detail lookup.
pub fn entity_detail(entity_type: &str, hospital_id: Uuid, item_id: Uuid) -> String {
    format!("{PREFIX}:detail:{entity_type}:{hospital_id}:{item_id}")
}

/// Prefix covering every cached detail for an entity within a tenant.
pub fn entity_detail_prefix(entity_type: &str, hospital_id: Uuid) -> String {
    format!("{PREFIX}:detail:{entity_type}:{hospital_id}:")
}

/// Stable fingerprint of query parameters for list-key construction.
///
/// The canonical string must be built deterministically by the caller
/// (sorted filter keys) so that identical queries hash identically.
pub fn fingerprint(canonical: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_is_prefixed_by_invalidation_prefix() {
        let hospital = Uuid::nil();
        let key = entity_list("suppliers", hospital, fingerprint("page=1"));
        assert!(key.starts_with(&entity_list_prefix("suppliers", hospital)));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint("a=1&b=2"), fingerprint("a=1&b=2"));
        assert_ne!(fingerprint("a=1&b=2"), fingerprint("a=1&b=3"));
    }
}
