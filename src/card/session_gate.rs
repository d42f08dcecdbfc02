//! One-time entry animation gate, keyed on a session-scoped storage flag.

use std::cell::RefCell;
use std::collections::HashMap;

/// Session storage key marking that the entry animation already ran.
pub const ENTRY_FLAG_KEY: &str = "hasAnimated";
pub const ENTRY_FLAG_VALUE: &str = "true";
/// Default length of the entry animation window.
pub const ENTRY_ANIMATION_MS: u32 = 2_000;

/// Minimal string key/value store scoped to the browser session.
///
/// Implementations never fail loudly: an unreadable entry is reported as
/// absent and a failed write is dropped.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `window.sessionStorage`, or nothing when the browser refuses access.
pub struct BrowserSessionStore {
    storage: Option<web_sys::Storage>,
}

impl BrowserSessionStore {
    pub fn new(window: &web_sys::Window) -> Self {
        let storage = window.session_storage().ok().flatten();
        if storage.is_none() {
            log::warn!("session storage unavailable; entry animation plays on every mount");
        }
        Self { storage }
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("could not persist session flag '{}'", key);
            }
        }
    }
}

/// In-process store for embedders without a browser session, and for tests.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// Per-mount entry animation state. Starts playing only when the session
/// flag was absent; once finished it can never play again for this mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryGate {
    playing: bool,
}

impl EntryGate {
    /// Consult (and on first sight, set) the session flag.
    pub fn check(store: &dyn SessionStore) -> Self {
        if store.get(ENTRY_FLAG_KEY).is_some() {
            return Self { playing: false };
        }
        store.set(ENTRY_FLAG_KEY, ENTRY_FLAG_VALUE);
        Self { playing: true }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// End the animation window. Returns true if it was still playing.
    pub fn finish(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose reads and writes always fail, like a sandboxed iframe.
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) {}
    }

    #[test]
    fn test_first_check_plays_and_sets_flag() {
        let store = MemorySessionStore::new();
        let gate = EntryGate::check(&store);
        assert!(gate.is_playing());
        assert_eq!(store.get(ENTRY_FLAG_KEY).as_deref(), Some(ENTRY_FLAG_VALUE));
    }

    #[test]
    fn test_second_check_is_suppressed() {
        let store = MemorySessionStore::new();
        let _ = EntryGate::check(&store);
        assert!(!EntryGate::check(&store).is_playing());
        assert!(!EntryGate::check(&store).is_playing());
    }

    #[test]
    fn test_any_existing_value_suppresses() {
        let store = MemorySessionStore::new();
        store.set(ENTRY_FLAG_KEY, "1");
        assert!(!EntryGate::check(&store).is_playing());
    }

    #[test]
    fn test_broken_storage_degrades_to_play() {
        assert!(EntryGate::check(&BrokenStore).is_playing());
        assert!(EntryGate::check(&BrokenStore).is_playing());
    }

    #[test]
    fn test_finish_is_one_way() {
        let mut gate = EntryGate::check(&MemorySessionStore::new());
        assert!(gate.finish());
        assert!(!gate.is_playing());
        assert!(!gate.finish());
    }
}
