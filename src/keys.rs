//! Key Builder Module
//!
//! Namespace-prefixed cache key construction. All collaborators are expected
//! to build keys through this helper so keys stay collision-free across
//! namespaces.

/// Delimiter between the namespace and each key part.
pub const KEY_DELIMITER: &str = ":";

/// Joins a namespace and key parts with `:`.
///
/// ```
/// use cachehub::keys::build_key;
///
/// assert_eq!(build_key("members", &["member", "42"]), "members:member:42");
/// ```
pub fn build_key(namespace: &str, parts: &[&str]) -> String {
    let mut key = String::with_capacity(
        namespace.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>(),
    );
    key.push_str(namespace);
    for part in parts {
        key.push_str(KEY_DELIMITER);
        key.push_str(part);
    }
    key
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key_joins_with_delimiter() {
        assert_eq!(build_key("members", &["member", "42"]), "members:member:42");
    }

    #[test]
    fn test_build_key_no_parts() {
        assert_eq!(build_key("dashboard", &[]), "dashboard");
    }

    #[test]
    fn test_build_key_single_part() {
        assert_eq!(build_key("contracts", &["latest"]), "contracts:latest");
    }

    #[test]
    fn test_build_key_is_namespace_prefixed() {
        let key = build_key("finance", &["ledger", "2026", "08"]);
        assert!(key.starts_with("finance:"));
        assert_eq!(key, "finance:ledger:2026:08");
    }
}
