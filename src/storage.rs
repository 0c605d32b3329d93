// Durable session slot: string key-value storage surviving modal transitions

use dashmap::DashMap;

pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    // Returns true if a value was present
    fn remove(&self, key: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slots: DashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // Simulates the visitor or the browser wiping storage behind our back
    pub fn clear(&self) {
        self.slots.clear();
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.slots.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> bool {
        self.slots.remove(key).is_some()
    }
}
