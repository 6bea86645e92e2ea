use super::layer::LayerId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A complete cached value plus the hash of the inputs it was built from.
#[derive(Debug)]
pub(crate) struct Entry<T> {
    pub input_hash: u64,
    pub value: T,
}

/// Per-layer cache with read-copy-update rebuilds.
///
/// Readers take the read lock only long enough to clone the `Arc`; rebuilds
/// construct the complete new entry and swap it in under the write lock.
/// A reader therefore observes either the old entry or the new one, never a
/// partially built mix, and concurrent lookups after one invalidation
/// rebuild at most once (the write path re-checks before building).
#[derive(Debug, Default)]
pub(crate) struct LayerCache<T> {
    entries: RwLock<HashMap<LayerId, Arc<Entry<T>>>>,
}

impl<T> LayerCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached entry for `layer` if it was built from inputs
    /// hashing to `input_hash`; otherwise rebuilds and swaps it in.
    pub fn get_or_build(
        &self,
        layer: LayerId,
        input_hash: u64,
        build: impl FnOnce() -> T,
    ) -> Arc<Entry<T>> {
        if let Some(entry) = read_lock(&self.entries).get(&layer) {
            if entry.input_hash == input_hash {
                return Arc::clone(entry);
            }
        }

        let mut entries = write_lock(&self.entries);
        // Another writer may have rebuilt while this one waited.
        if let Some(entry) = entries.get(&layer) {
            if entry.input_hash == input_hash {
                return Arc::clone(entry);
            }
        }

        let entry = Arc::new(Entry {
            input_hash,
            value: build(),
        });
        entries.insert(layer, Arc::clone(&entry));
        entry
    }

    pub fn invalidate(&self, layer: LayerId) {
        write_lock(&self.entries).remove(&layer);
    }
}

// The maps only ever hold complete entries, so a panic mid-insert cannot
// leave them inconsistent; recover from poisoning instead of propagating it.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
