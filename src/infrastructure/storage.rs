use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::domain::errors::{AppError, StorageResult};
use crate::domain::market_data::PreferenceRepository;

/// `window.localStorage` slots. Missing window or storage (private mode, quota, sandboxed
/// iframes) surface as [`AppError::Storage`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStoragePreferences;

impl LocalStoragePreferences {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> StorageResult<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| AppError::Storage("window not available".into()))?;
        window
            .local_storage()
            .map_err(|e| AppError::Storage(format!("localStorage access denied: {e:?}")))?
            .ok_or_else(|| AppError::Storage("localStorage not available".into()))
    }
}

impl PreferenceRepository for LocalStoragePreferences {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| AppError::Storage(format!("read '{key}' failed: {e:?}")))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("write '{key}' failed: {e:?}")))
    }
}

/// In-process slots, used natively and in tests. `fail_reads`/`fail_writes` simulate a broken
/// backend.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    slots: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefs = Self::new();
        prefs
            .slots
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        prefs
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl PreferenceRepository for MemoryPreferences {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(AppError::Storage(format!("read '{key}' failed")));
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(AppError::Storage(format!("write '{key}' failed")));
        }
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
