//! Storage Node Tests
//!
//! Validates the local store in isolation: versioning rules, snapshot
//! installs and the dump format. The HTTP surface is exercised end-to-end by
//! the router tests.

#[cfg(test)]
mod tests {
    use crate::node::protocol::SnapshotEntry;
    use crate::node::store::LocalStore;

    // ============================================================
    // PUT / GET TESTS
    // ============================================================

    #[test]
    fn test_put_adopts_router_version() {
        let store = LocalStore::new();
        let stored = store.put("x", "a", Some(17));
        assert_eq!(stored, 17);

        let entry = store.get("x").expect("key should exist");
        assert_eq!(entry.value, "a");
        assert_eq!(entry.version, 17);
    }

    #[test]
    fn test_versionless_put_counts_locally() {
        let store = LocalStore::new();
        assert_eq!(store.put("x", "a", None), 1);
        assert_eq!(store.put("x", "b", None), 2);
        assert_eq!(store.put("y", "c", None), 1);

        let entry = store.get("x").unwrap();
        assert_eq!(entry.value, "b");
        assert_eq!(entry.version, 2);
    }

    #[test]
    fn test_get_missing_key() {
        let store = LocalStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_coordinated_put_overwrites_local_count() {
        let store = LocalStore::new();
        store.put("x", "a", None);
        store.put("x", "b", Some(42));

        let entry = store.get("x").unwrap();
        assert_eq!(entry.value, "b");
        assert_eq!(entry.version, 42);
    }

    // ============================================================
    // SNAPSHOT TESTS
    // ============================================================

    #[test]
    fn test_install_replaces_everything() {
        let store = LocalStore::new();
        store.put("old", "gone", Some(1));

        let entries = vec![
            SnapshotEntry {
                key: "a".to_string(),
                value: "1".to_string(),
                version: 3,
            },
            SnapshotEntry {
                key: "b".to_string(),
                value: "2".to_string(),
                version: 5,
            },
        ];
        store.install(entries, 5);

        assert_eq!(store.len(), 2);
        assert!(store.get("old").is_none());
        assert_eq!(store.get("a").unwrap().version, 3);
        assert_eq!(store.get("b").unwrap().version, 5);
        assert_eq!(store.snapshot_version(), 5);
    }

    #[test]
    fn test_install_empty_snapshot() {
        let store = LocalStore::new();
        store.put("x", "a", Some(1));

        store.install(vec![], 0);
        assert!(store.is_empty());
    }

    // ============================================================
    // WIRE FORMAT TESTS
    // ============================================================

    #[test]
    fn test_put_request_serialization() {
        use crate::node::protocol::PutEntryRequest;

        let req = PutEntryRequest {
            key: "x".to_string(),
            value: "a".to_string(),
            version: Some(3),
        };

        let json = serde_json::to_string(&req).expect("serialization failed");
        let restored: PutEntryRequest = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(restored.key, req.key);
        assert_eq!(restored.value, req.value);
        assert_eq!(restored.version, Some(3));

        // A standalone client may omit the version field entirely.
        let bare: PutEntryRequest =
            serde_json::from_str(r#"{"key":"x","value":"a","version":null}"#).unwrap();
        assert_eq!(bare.version, None);
    }

    #[test]
    fn test_snapshot_request_serialization() {
        use crate::node::protocol::SnapshotRequest;

        let snapshot = SnapshotRequest {
            entries: vec![SnapshotEntry {
                key: "a".to_string(),
                value: "1".to_string(),
                version: 4,
            }],
            version: 4,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SnapshotRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.entries.len(), 1);
        assert_eq!(restored.entries[0].version, 4);
        assert_eq!(restored.version, 4);
    }

    // ============================================================
    // DUMP / SHUTDOWN TESTS
    // ============================================================

    #[test]
    fn test_dump_is_sorted_key_value_lines() {
        let store = LocalStore::new();
        store.put("b", "2", Some(2));
        store.put("a", "1", Some(1));
        store.put("c", "3", Some(3));

        assert_eq!(store.dump(), "a:1\nb:2\nc:3");
    }

    #[test]
    fn test_dump_empty_store() {
        let store = LocalStore::new();
        assert_eq!(store.dump(), "");
    }

    #[test]
    fn test_clear_drops_all_state() {
        let store = LocalStore::new();
        store.put("x", "a", Some(1));
        store.install(vec![], 9);
        store.put("y", "b", Some(10));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.snapshot_version(), 0);
    }
}
