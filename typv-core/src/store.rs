//! Lock-guarded in-memory store of variable font data (made by FontLab https://www.fontlab.com/)

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::key::CacheKey;
use crate::model::VariableFontData;

/// Mapping from [`CacheKey`] to fully populated [`VariableFontData`].
///
/// Every method takes the lock once and releases it before returning, so no
/// caller can hold it across I/O. Values are shared behind `Arc` to keep
/// reads cheap.
#[derive(Debug, Default)]
pub struct VariableDataStore {
    entries: Mutex<HashMap<CacheKey, Arc<VariableFontData>>>,
}

impl VariableDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached entry.
    ///
    /// Must not race with in-flight lookups; the caller serialises that.
    pub fn reset(&self) {
        let dropped = {
            let mut entries = self.entries.lock();
            let dropped = entries.len();
            *entries = HashMap::new();
            dropped
        };
        log::info!("variable data cache reset ({dropped} entries dropped)");
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<VariableFontData>> {
        self.entries.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Insert or overwrite several entries in one critical section.
    pub fn put_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (CacheKey, VariableFontData)>,
    {
        let staged: Vec<(CacheKey, Arc<VariableFontData>)> = entries
            .into_iter()
            .map(|(key, data)| (key, Arc::new(data)))
            .collect();

        let mut map = self.entries.lock();
        for (key, data) in staged {
            log::trace!("caching variable data for {key}");
            map.insert(key, data);
        }
    }

    /// Positions of `keys` not yet cached, first occurrence only, in input order.
    pub(crate) fn missing_positions(&self, keys: &[CacheKey]) -> Vec<usize> {
        let mut seen = HashSet::with_capacity(keys.len());
        let map = self.entries.lock();
        keys.iter()
            .enumerate()
            .filter(|(_, key)| !map.contains_key(*key) && seen.insert(*key))
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the cached keys, sorted.
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self.entries.lock().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}
