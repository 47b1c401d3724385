//! Batched, deduplicating lookups on top of the store (made by FontLab https://www.fontlab.com/)
//!
//! The resolver is where cache misses turn into one round trip. A call to
//! [`VariableDataResolver::ensure`] works out which fonts are missing while
//! holding the store lock, lets go of it, asks the fetcher for all of them
//! at once, then commits the answers in a single bulk insert.
//!
//! Two threads missing the same font at the same moment may both fetch it;
//! the second commit overwrites the first with an equivalent record.

use std::sync::Arc;

use crate::error::VariableDataError;
use crate::fetch::VariableDataFetcher;
use crate::key::CacheKey;
use crate::model::{FontDescriptor, ListedFont, VariableFontData};
use crate::store::VariableDataStore;

pub struct VariableDataResolver<F> {
    store: Arc<VariableDataStore>,
    fetcher: F,
}

impl<F: VariableDataFetcher> VariableDataResolver<F> {
    /// Resolver with a fresh, empty store of its own.
    pub fn new(fetcher: F) -> Self {
        Self::with_store(Arc::new(VariableDataStore::new()), fetcher)
    }

    /// Resolver sharing an existing store, e.g. one held for the whole process.
    pub fn with_store(store: Arc<VariableDataStore>, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    pub fn store(&self) -> &Arc<VariableDataStore> {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn reset(&self) {
        self.store.reset();
    }

    /// Make sure every font in `fonts` has cached variable data.
    ///
    /// Fonts already cached are left out of the request entirely; if none are
    /// missing the fetcher is not called at all. Otherwise it is called exactly
    /// once. Nothing is cached unless the whole batch succeeds.
    pub fn ensure(&self, fonts: &[ListedFont]) -> Result<(), VariableDataError> {
        let keys = fonts
            .iter()
            .map(ListedFont::cache_key)
            .collect::<Result<Vec<_>, _>>()?;

        let missing = self.store.missing_positions(&keys);
        if missing.is_empty() {
            log::debug!("variable data cached for all {} requested fonts", fonts.len());
            return Ok(());
        }

        let (keys, descriptors): (Vec<CacheKey>, Vec<FontDescriptor>) = missing
            .into_iter()
            .map(|pos| (keys[pos].clone(), fonts[pos].descriptor.clone()))
            .unzip();

        log::debug!(
            "fetching variable data for {} of {} requested fonts",
            descriptors.len(),
            fonts.len()
        );

        let results = self
            .fetcher
            .fetch(&descriptors)
            .map_err(VariableDataError::FetchFailed)?;

        if results.len() != keys.len() {
            return Err(VariableDataError::ResultShapeMismatch {
                requested: keys.len(),
                returned: results.len(),
            });
        }

        self.store.put_all(keys.into_iter().zip(results));
        Ok(())
    }

    /// Cached data for `font`, fetching it first on a miss.
    pub fn try_lookup(&self, font: &ListedFont) -> Result<Arc<VariableFontData>, VariableDataError> {
        let key = font.cache_key()?;
        if let Some(data) = self.store.get(&key) {
            return Ok(data);
        }

        self.ensure(std::slice::from_ref(font))?;
        self.store
            .get(&key)
            .ok_or(VariableDataError::Vanished { key })
    }

    /// Cached data for `font`, fetching it first on a miss.
    ///
    /// # Panics
    ///
    /// Panics when the data cannot be produced: the font has no identity, the
    /// fetch fails, or the fetcher breaks its one-record-per-descriptor
    /// contract. Callers that can live without the data should use
    /// [`ensure`](Self::ensure) or [`try_lookup`](Self::try_lookup).
    pub fn lookup(&self, font: &ListedFont) -> Arc<VariableFontData> {
        match self.try_lookup(font) {
            Ok(data) => data,
            Err(err) => panic!("variable data for {:?} unavailable: {err}", font.full_name),
        }
    }

    /// Whether `font` is cached. Never fetches.
    ///
    /// # Panics
    ///
    /// Panics when the font has neither a PostScript name nor a path.
    pub fn has(&self, font: &ListedFont) -> bool {
        match font.cache_key() {
            Ok(key) => self.store.contains(&key),
            Err(err) => panic!("{err}"),
        }
    }
}
