//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry: the stored value plus timing metadata.
///
/// Entries always carry an expiry; the TTL is resolved at insertion time from
/// a per-call override or the owning instance's default.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, owned exclusively by the entry
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Expiration timestamp (Unix milliseconds): inserted_at + ttl
    pub expires_at: u64,
    /// Timestamp of the last successful read (Unix milliseconds)
    pub last_accessed_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now.
    ///
    /// Oversized TTLs saturate to `u64::MAX` ("never expires") rather than
    /// wrapping.
    pub fn new(value: V, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            inserted_at: now,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
            last_accessed_at: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired.
    ///
    /// Boundary condition: expired when the current time is greater than or
    /// equal to `expires_at`, so an entry inserted with `ttl = 0` is expired
    /// immediately.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Touch ==
    /// Records a successful read by refreshing `last_accessed_at`.
    pub fn touch(&mut self) {
        self.last_accessed_at = current_timestamp_ms();
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds; 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("payload".to_string(), 60);

        assert_eq!(entry.value, "payload");
        assert_eq!(entry.expires_at, entry.inserted_at + 60_000);
        assert_eq!(entry.last_accessed_at, entry.inserted_at);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_zero_ttl_is_immediately_expired() {
        let entry = CacheEntry::new(1u32, 0);
        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining_ms(), 0);
    }

    #[test]
    fn test_entry_expiration_after_wait() {
        let entry = CacheEntry::new(1u32, 1);

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(1100));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new(1u32, 10);

        let remaining = entry.ttl_remaining_ms();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_touch_refreshes_last_accessed() {
        let mut entry = CacheEntry::new(1u32, 60);
        let before = entry.last_accessed_at;

        sleep(Duration::from_millis(10));
        entry.touch();

        assert!(entry.last_accessed_at > before);
        // Insertion time is not affected by reads
        assert!(entry.inserted_at <= entry.last_accessed_at);
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_wrapping() {
        let entry = CacheEntry::new(1u32, u64::MAX);

        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining_ms() > 0);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: "x".to_string(),
            inserted_at: now,
            expires_at: now,
            last_accessed_at: now,
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
