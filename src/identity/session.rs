use dashmap::DashMap;

/// Key/value store scoped to one browsing session
///
/// Entries live as long as the session and are never shared between
/// sessions.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    /// Return the value under `key`, creating it with `init` if missing
    ///
    /// The default is a plain read followed by a write, so concurrent
    /// first calls may each write (last write wins). Stores with an
    /// atomic entry API should override it.
    fn get_or_insert_with(&self, key: &str, init: &dyn Fn() -> String) -> String {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = init();
        self.set(key, value.clone());
        value
    }
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry, ending the session
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn get_or_insert_with(&self, key: &str, init: &dyn Fn() -> String) -> String {
        self.entries
            .entry(key.to_string())
            .or_insert_with(init)
            .value()
            .clone()
    }
}
