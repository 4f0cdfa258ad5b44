use crate::domain::ports::ApiKeyStore;
use std::collections::HashMap;

/// In-memory user → FIO API key lookup, loaded from the `[api_keys]` table.
///
/// Usernames are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyStore {
    keys: HashMap<String, String>,
}

impl StaticKeyStore {
    pub fn new(keys: HashMap<String, String>) -> Self {
        let keys = keys
            .into_iter()
            .filter(|(_, key)| !key.trim().is_empty())
            .map(|(user, key)| (user.to_lowercase(), key.trim().to_string()))
            .collect();
        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl ApiKeyStore for StaticKeyStore {
    fn api_key_for(&self, user: &str) -> Option<String> {
        self.keys.get(&user.to_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_and_skips_blank_keys() {
        let store = StaticKeyStore::new(HashMap::from([
            ("Alice".to_string(), " key-a ".to_string()),
            ("bob".to_string(), "".to_string()),
        ]));

        assert_eq!(store.api_key_for("alice"), Some("key-a".to_string()));
        assert_eq!(store.api_key_for("ALICE"), Some("key-a".to_string()));
        assert_eq!(store.api_key_for("bob"), None);
        assert_eq!(store.len(), 1);
    }
}
