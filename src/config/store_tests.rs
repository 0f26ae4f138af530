//! Tests for configuration stores.

use std::sync::Arc;

use super::store::{ConfigStore, Layered, MemoryStore, join_path};
use super::ConfigError;

mod memory_store {
    use super::*;

    #[test]
    fn missing_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_value("erp/general/days_count"), None);
    }

    #[test]
    fn with_value_stores_value() {
        let store = MemoryStore::new().with_value("erp/erp_a/api_url", "https://a.example.com");

        assert_eq!(
            store.get_value("erp/erp_a/api_url").as_deref(),
            Some("https://a.example.com")
        );
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new().with_value("erp/erp_a/active", "0");
        store.set("erp/erp_a/active", "1");

        assert_eq!(store.get_value("erp/erp_a/active").as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sections_lists_children_once() {
        let store = MemoryStore::new()
            .with_value("erp/general/connection_timeout", "5")
            .with_value("erp/erp_a/api_url", "https://a.example.com")
            .with_value("erp/erp_a/active", "1")
            .with_value("erp/erp_b/active", "0")
            .with_value("other/erp_c/active", "1");

        assert_eq!(store.sections("erp"), vec!["erp_a", "erp_b", "general"]);
    }

    #[test]
    fn sections_accepts_trailing_separator() {
        let store = MemoryStore::new().with_value("erp/erp_a/active", "1");
        assert_eq!(store.sections("erp/"), vec!["erp_a"]);
    }

    #[test]
    fn sections_ignores_leaf_keys() {
        let store = MemoryStore::new().with_value("erp/flag", "1");
        assert!(store.sections("erp").is_empty());
    }

    #[test]
    fn is_empty_reflects_contents() {
        assert!(MemoryStore::new().is_empty());
        assert!(!MemoryStore::new().with_value("a/b", "c").is_empty());
    }
}

mod overrides {
    use super::*;

    #[test]
    fn parses_key_value_pairs() {
        let store = MemoryStore::from_overrides([
            "erp/general/connection_timeout=5",
            "erp/erp_a/api_url=https://a.example.com/x?y=1",
        ])
        .unwrap();

        assert_eq!(
            store.get_value("erp/general/connection_timeout").as_deref(),
            Some("5")
        );
        // Only the first '=' separates key from value
        assert_eq!(
            store.get_value("erp/erp_a/api_url").as_deref(),
            Some("https://a.example.com/x?y=1")
        );
    }

    #[test]
    fn trims_whitespace() {
        let store = MemoryStore::from_overrides([" erp/erp_a/active = 1 "]).unwrap();
        assert_eq!(store.get_value("erp/erp_a/active").as_deref(), Some("1"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let store = MemoryStore::from_overrides(["erp/erp_a/active="]).unwrap();
        assert_eq!(store.get_value("erp/erp_a/active").as_deref(), Some(""));
    }

    #[test]
    fn missing_separator_is_rejected() {
        let result = MemoryStore::from_overrides(["erp/erp_a/active"]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { ref value }) if value == "erp/erp_a/active"
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        let result = MemoryStore::from_overrides(["=1"]);
        assert!(matches!(result, Err(ConfigError::InvalidOverride { .. })));
    }
}

mod layered {
    use super::*;

    #[test]
    fn primary_wins() {
        let primary = MemoryStore::new().with_value("erp/erp_a/active", "1");
        let fallback = MemoryStore::new().with_value("erp/erp_a/active", "0");
        let store = Layered::new(primary, fallback);

        assert_eq!(store.get_value("erp/erp_a/active").as_deref(), Some("1"));
    }

    #[test]
    fn falls_back_when_primary_is_missing() {
        let primary = MemoryStore::new();
        let fallback = MemoryStore::new().with_value("erp/erp_a/bearer", "token");
        let store = Layered::new(primary, fallback);

        assert_eq!(store.get_value("erp/erp_a/bearer").as_deref(), Some("token"));
    }

    #[test]
    fn sections_merges_both_layers() {
        let primary = MemoryStore::new().with_value("erp/erp_c/active", "1");
        let fallback = MemoryStore::new()
            .with_value("erp/erp_a/active", "1")
            .with_value("erp/erp_c/api_url", "https://c.example.com");
        let store = Layered::new(primary, fallback);

        assert_eq!(store.sections("erp"), vec!["erp_a", "erp_c"]);
    }
}

mod forwarding {
    use super::*;

    fn read<S: ConfigStore>(store: S, path: &str) -> Option<String> {
        store.get_value(path)
    }

    #[test]
    fn arc_and_reference_delegate() {
        let store = MemoryStore::new().with_value("erp/erp_a/active", "1");
        assert_eq!(read(&store, "erp/erp_a/active").as_deref(), Some("1"));

        let shared = Arc::new(store.clone());
        assert_eq!(shared.get_value("erp/erp_a/active").as_deref(), Some("1"));
        assert_eq!(read(&shared, "erp/erp_a/active").as_deref(), Some("1"));
        assert_eq!(shared.sections("erp"), vec!["erp_a"]);
    }

    #[test]
    fn boxed_trait_object_delegates() {
        let store: Box<dyn ConfigStore> =
            Box::new(MemoryStore::new().with_value("erp/erp_a/active", "1"));

        assert_eq!(store.get_value("erp/erp_a/active").as_deref(), Some("1"));
    }

    #[test]
    fn default_sections_is_empty() {
        struct Opaque;
        impl ConfigStore for Opaque {
            fn get_value(&self, _path: &str) -> Option<String> {
                Some("x".to_string())
            }
        }

        assert!(Opaque.sections("erp").is_empty());
    }
}

mod paths {
    use super::*;

    #[test]
    fn join_path_uses_separator() {
        assert_eq!(join_path(&["erp", "erp_a", "api_url"]), "erp/erp_a/api_url");
    }

    #[test]
    fn join_path_single_segment() {
        assert_eq!(join_path(&["erp"]), "erp");
    }

    #[test]
    fn join_path_empty() {
        assert_eq!(join_path(&[]), "");
    }
}
