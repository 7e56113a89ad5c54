// SPDX-License-Identifier: Apache-2.0 OR MIT
// Listener contract and the registry the logger dispatches through

use crate::entry::SharedEntry;
use crate::error::LogError;
use std::sync::{Arc, Mutex};

/// Observer of log entries.
///
/// `on_log_entry` runs synchronously on the logging thread while the registry
/// lock is held. Implementations must not call back into the logging path,
/// directly or through code they invoke: that deadlocks on the registry lock.
/// The entry is read-only; to keep it past the callback, clone the
/// [`SharedEntry`] handle rather than copying pointers out of it.
pub trait LogListener: Send + Sync {
    fn on_log_entry(&self, entry: &SharedEntry);
}

/// Shared handle to a registered listener.
pub type ListenerHandle = Arc<dyn LogListener>;

/// Thread-safe set of registered listeners.
///
/// Registration changes and the whole notification loop serialize on one
/// internal lock, so a listener removed before a log call begins sees none of
/// that call's notifications, and removal never races an addition into an
/// inconsistent state.
pub struct ListenerRegistry {
    listeners: Mutex<Vec<ListenerHandle>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a listener. Duplicates are not rejected: a handle added twice
    /// is notified twice per entry.
    pub fn add(&self, listener: ListenerHandle) {
        self.listeners.lock().unwrap().push(listener);
    }

    /// Remove a listener by identity, dropping only the first matching
    /// registration. Returns `false` when the handle was never registered or
    /// was already removed.
    pub fn remove(&self, listener: &ListenerHandle) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        match listeners.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build an entry and hand it to every registered listener, all under the
    /// registry lock.
    ///
    /// `make_entry` runs only when at least one listener is registered; with
    /// an empty set this returns `Ok(0)` without formatting anything. Every
    /// listener receives a handle to the same entry. Returns the entry's
    /// length.
    pub(crate) fn dispatch<F>(&self, make_entry: F) -> Result<usize, LogError>
    where
        F: FnOnce() -> Result<SharedEntry, LogError>,
    {
        let listeners = self.listeners.lock().unwrap();
        if listeners.is_empty() {
            return Ok(0);
        }

        let entry = make_entry()?;
        for listener in listeners.iter() {
            listener.on_log_entry(&entry);
        }

        Ok(entry.len())
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity comparison for listener handles.
///
/// `Arc::ptr_eq` on trait objects also compares vtable pointers, which are
/// not unique across codegen units; compare the data pointers only.
fn same_listener(a: &ListenerHandle, b: &ListenerHandle) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
