//! LocalStorage-backed preference store

use web_sys::Storage;

use crate::preferences::PreferenceStore;

pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// `None` when storage is disabled (private mode, sandboxed frames)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("Failed to persist {}: {:?}", key, e);
        }
    }
}
