//! # Navigation Location
//!
//! The router reads its input from a [`Location`]: the current address and a
//! notification whenever its hash fragment changes. Hosts embedding the
//! framework in a real page bridge their window location to this trait;
//! [`MemoryLocation`] keeps the address in memory for headless use and tests.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback fired after the hash fragment changed
pub type LocationListener = Arc<dyn Fn() + Send + Sync>;

/// Source of the navigation hash
pub trait Location: Send + Sync {
    /// Full current address, including `#fragment` when one is set
    fn href(&self) -> String;

    /// Replace the hash fragment (given without the leading `#`)
    fn set_hash(&self, hash: &str);

    /// Register a listener for hash changes
    fn on_change(&self, listener: LocationListener);
}

/// Extract the routing key: everything after the first `#`, or empty
pub fn hash_of(href: &str) -> &str {
    href.split_once('#').map_or("", |(_, hash)| hash)
}

/// In-memory location
///
/// Listeners fire only when the hash actually changes, matching the
/// behaviour of a browser `hashchange` event.
pub struct MemoryLocation {
    base: String,
    hash: Mutex<String>,
    listeners: Mutex<Vec<LocationListener>>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::with_base("about:blank")
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            hash: Mutex::new(String::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Location that starts out on `hash`, without notifying anyone
    pub fn with_hash(hash: &str) -> Self {
        let location = Self::new();
        *location.lock_hash() = hash.trim_start_matches('#').to_string();
        location
    }

    pub fn hash(&self) -> String {
        self.lock_hash().clone()
    }

    fn lock_hash(&self) -> MutexGuard<'_, String> {
        self.hash.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<LocationListener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryLocation")
            .field("href", &self.href())
            .field("listeners", &self.lock_listeners().len())
            .finish()
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> String {
        let hash = self.lock_hash();
        if hash.is_empty() {
            self.base.clone()
        } else {
            format!("{}#{}", self.base, hash)
        }
    }

    fn set_hash(&self, hash: &str) {
        let hash = hash.trim_start_matches('#');
        {
            let mut current = self.lock_hash();
            if *current == hash {
                return;
            }
            *current = hash.to_string();
        }

        let listeners = self.lock_listeners().clone();
        for listener in listeners {
            listener();
        }
    }

    fn on_change(&self, listener: LocationListener) {
        self.lock_listeners().push(listener);
    }
}
