use std::rc::Rc;

use crate::domain::errors::StorageResult;

/// Durable string key/value slots for view preferences (browser localStorage in production).
pub trait PreferenceRepository {
    /// `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: PreferenceRepository + ?Sized> PreferenceRepository for Rc<T> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}
