// 🔑 Key Namespace - one literal prefix per entity kind
//
// Every record lives in a single shared key space. The prefix keeps kinds
// apart: "claim-1", "cust-1" and "vehins-1" never collide even though all
// three were created with natural id "1".

use std::fmt;

// ============================================================================
// ENTITY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Claim,
    Customer,
    VehInsurance,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Claim,
        EntityKind::Customer,
        EntityKind::VehInsurance,
    ];

    /// Literal key prefix. Prefixes must stay disjoint.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Claim => "claim-",
            EntityKind::Customer => "cust-",
            EntityKind::VehInsurance => "vehins-",
        }
    }

    /// Human name used in error messages ("Claim claim-1 does not exist")
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Claim => "Claim",
            EntityKind::Customer => "Customer",
            EntityKind::VehInsurance => "Insurance",
        }
    }

    pub fn not_found_code(&self) -> &'static str {
        match self {
            EntityKind::Claim => "CLAIM_NOT_FOUND",
            EntityKind::Customer => "CUSTOMER_NOT_FOUND",
            EntityKind::VehInsurance => "INSURANCE_NOT_FOUND",
        }
    }

    pub fn already_exists_code(&self) -> &'static str {
        match self {
            EntityKind::Claim => "CLAIM_ALREADY_EXISTS",
            EntityKind::Customer => "CUSTOMER_ALREADY_EXISTS",
            EntityKind::VehInsurance => "INSURANCE_ALREADY_EXISTS",
        }
    }

    /// Ledger key for a natural identifier: plain concatenation, no normalization.
    pub fn namespace(&self, natural_id: &str) -> String {
        format!("{}{}", self.prefix(), natural_id)
    }

    /// Whether `key` lies inside this kind's namespace
    pub fn owns(&self, key: &str) -> bool {
        key.starts_with(self.prefix())
    }

    /// Natural identifier of a namespaced key, if the key belongs to this kind
    pub fn natural_id<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.prefix())
    }

    /// Kind and natural identifier of any namespaced key
    pub fn split_key(key: &str) -> Option<(EntityKind, &str)> {
        EntityKind::ALL
            .iter()
            .find_map(|kind| kind.natural_id(key).map(|id| (*kind, id)))
    }

    /// Half-open `[start, end)` range covering exactly this kind's keys.
    ///
    /// `end` is the prefix with its last byte incremented, so every key that
    /// starts with the prefix sorts below it and nothing else in between does.
    pub fn scan_range(&self) -> (String, String) {
        let prefix = self.prefix();
        (prefix.to_string(), prefix_successor(prefix))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Smallest string greater than every string starting with `prefix`.
///
/// Only defined for ASCII prefixes whose last byte is below 0x7f, which holds
/// for every prefix above.
fn prefix_successor(prefix: &str) -> String {
    let mut bytes = prefix.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        debug_assert!(*last < 0x7f, "prefix must end in a printable ASCII byte");
        *last += 1;
    }
    String::from_utf8(bytes).unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_concatenates_prefix() {
        assert_eq!(EntityKind::Claim.namespace("1"), "claim-1");
        assert_eq!(EntityKind::Customer.namespace("1"), "cust-1");
        assert_eq!(EntityKind::VehInsurance.namespace("1"), "vehins-1");

        // No normalization: an already-prefixed id gets prefixed again
        assert_eq!(EntityKind::Claim.namespace("claim-1"), "claim-claim-1");
        assert_eq!(EntityKind::Customer.namespace(""), "cust-");
    }

    #[test]
    fn test_prefixes_are_disjoint() {
        for a in EntityKind::ALL {
            for b in EntityKind::ALL {
                if a != b {
                    assert!(
                        !a.prefix().starts_with(b.prefix()),
                        "{} prefix overlaps {}",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_owns_and_natural_id() {
        assert!(EntityKind::Claim.owns("claim-42"));
        assert!(!EntityKind::Claim.owns("cust-42"));
        assert_eq!(EntityKind::Customer.natural_id("cust-42"), Some("42"));
        assert_eq!(EntityKind::Customer.natural_id("vehins-42"), None);
    }

    #[test]
    fn test_split_key() {
        assert_eq!(
            EntityKind::split_key("vehins-2"),
            Some((EntityKind::VehInsurance, "2"))
        );
        assert_eq!(EntityKind::split_key("claim-"), Some((EntityKind::Claim, "")));
        assert_eq!(EntityKind::split_key("customer-1"), None);
    }

    #[test]
    fn test_scan_range_bounds_only_own_kind() {
        let (start, end) = EntityKind::Claim.scan_range();
        assert_eq!(start, "claim-");
        assert_eq!(end, "claim.");

        let inside = ["claim-", "claim-1", "claim-zzz", "claim-\u{10FFFF}"];
        for key in inside {
            assert!(key >= start.as_str() && key < end.as_str(), "{key}");
        }

        let outside = ["claim", "claim,", "claim.", "claims", "cust-1", "vehins-1"];
        for key in outside {
            assert!(!(key >= start.as_str() && key < end.as_str()), "{key}");
        }
    }

    #[test]
    fn test_error_codes_per_kind() {
        assert_eq!(EntityKind::Claim.not_found_code(), "CLAIM_NOT_FOUND");
        assert_eq!(
            EntityKind::Customer.already_exists_code(),
            "CUSTOMER_ALREADY_EXISTS"
        );
        assert_eq!(
            EntityKind::VehInsurance.not_found_code(),
            "INSURANCE_NOT_FOUND"
        );
    }
}
