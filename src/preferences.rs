//! Accessibility preferences
//!
//! Two boolean flags persisted as "0"/"1" under fixed keys. The same names
//! double as the marker classes toggled on the document root.

use std::collections::HashMap;

/// A togglable accessibility preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    HighContrast,
    ReduceMotion,
}

impl Preference {
    pub const ALL: [Preference; 2] = [Preference::HighContrast, Preference::ReduceMotion];

    /// Key in the persistent store
    pub fn storage_key(&self) -> &'static str {
        match self {
            Preference::HighContrast => "high-contrast",
            Preference::ReduceMotion => "reduce-motion",
        }
    }

    /// Marker class on the root element
    pub fn marker_class(&self) -> &'static str {
        self.storage_key()
    }

    /// Id of the toggle button carrying `aria-pressed`
    pub fn control_id(&self) -> &'static str {
        match self {
            Preference::HighContrast => "toggle-contrast",
            Preference::ReduceMotion => "toggle-motion",
        }
    }
}

/// Key-value backing for preferences
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

/// In-memory store (tests, native builds)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

pub fn encode_flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

/// Only an exact "1" reads as on
pub fn decode_flag(value: Option<&str>) -> bool {
    value == Some("1")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub high_contrast: bool,
    pub reduce_motion: bool,
}

impl Preferences {
    pub fn load(store: &(impl PreferenceStore + ?Sized)) -> Self {
        let read = |p: Preference| decode_flag(store.read(p.storage_key()).as_deref());
        Self {
            high_contrast: read(Preference::HighContrast),
            reduce_motion: read(Preference::ReduceMotion),
        }
    }

    pub fn get(&self, pref: Preference) -> bool {
        match pref {
            Preference::HighContrast => self.high_contrast,
            Preference::ReduceMotion => self.reduce_motion,
        }
    }

    pub fn set(&mut self, pref: Preference, on: bool) {
        match pref {
            Preference::HighContrast => self.high_contrast = on,
            Preference::ReduceMotion => self.reduce_motion = on,
        }
    }

    /// Flip a flag, persist it, and return the new value
    pub fn toggle(&mut self, pref: Preference, store: &mut (impl PreferenceStore + ?Sized)) -> bool {
        let on = !self.get(pref);
        self.set(pref, on);
        store.write(pref.storage_key(), encode_flag(on));
        log::info!("{} {}", pref.storage_key(), if on { "on" } else { "off" });
        on
    }

    /// Reduced motion from the stored flag or the system media query
    pub fn effective_reduce_motion(&self, system_prefers_reduced: bool) -> bool {
        self.reduce_motion || system_prefers_reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_encoding() {
        assert_eq!(encode_flag(true), "1");
        assert_eq!(encode_flag(false), "0");
        assert!(decode_flag(Some("1")));
        assert!(!decode_flag(Some("0")));
        assert!(!decode_flag(Some("true")));
        assert!(!decode_flag(None));
    }

    #[test]
    fn test_load_missing_keys_is_default() {
        let store = MemoryStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_toggle_persists() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();

        assert!(prefs.toggle(Preference::HighContrast, &mut store));
        assert_eq!(store.read("high-contrast").as_deref(), Some("1"));
        assert!(!prefs.toggle(Preference::HighContrast, &mut store));
        assert_eq!(store.read("high-contrast").as_deref(), Some("0"));

        prefs.toggle(Preference::ReduceMotion, &mut store);
        let reloaded = Preferences::load(&store);
        assert!(reloaded.reduce_motion);
        assert!(!reloaded.high_contrast);
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs.toggle(Preference::ReduceMotion, &mut store);
        assert!(prefs.reduce_motion);
        assert!(!prefs.high_contrast);
        assert_eq!(store.read("high-contrast"), None);
    }

    #[test]
    fn test_effective_reduce_motion() {
        let prefs = Preferences::default();
        assert!(!prefs.effective_reduce_motion(false));
        assert!(prefs.effective_reduce_motion(true));
        let prefs = Preferences {
            reduce_motion: true,
            ..Default::default()
        };
        assert!(prefs.effective_reduce_motion(false));
    }

    #[test]
    fn test_names() {
        assert_eq!(Preference::HighContrast.marker_class(), "high-contrast");
        assert_eq!(Preference::ReduceMotion.control_id(), "toggle-motion");
        assert_eq!(Preference::ALL.len(), 2);
    }
}
