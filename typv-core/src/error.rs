//! Errors raised while resolving variable font metadata.

use crate::key::CacheKey;

#[derive(Debug, thiserror::Error)]
pub enum VariableDataError {
    /// The font has neither a PostScript name nor a descriptor path.
    #[error("font {full_name:?} (family {family:?}) has no PostScript name and no path; cannot derive a cache key")]
    MissingIdentity {
        /// Family name of the offending font.
        family: String,
        /// Full name of the offending font.
        full_name: String,
    },

    /// The fetcher answered with a different number of records than requested.
    #[error("variable data fetch returned {returned} results for {requested} descriptors")]
    ResultShapeMismatch {
        /// Number of descriptors sent.
        requested: usize,
        /// Number of records received.
        returned: usize,
    },

    /// The fetcher itself failed; the underlying error is the source.
    #[error("fetching variable font data failed")]
    FetchFailed(#[source] anyhow::Error),

    /// An entry present after a successful fetch disappeared before it was
    /// read, which only happens when the store is reset mid-lookup.
    #[error("cache entry {key} vanished during lookup (store reset while in use?)")]
    Vanished {
        /// Key that was expected in the store.
        key: CacheKey,
    },
}

impl VariableDataError {
    /// Broken invariants, as opposed to a backend that merely failed this time.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FetchFailed(_))
    }
}
