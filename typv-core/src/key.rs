//! Cache key derivation (made by FontLab https://www.fontlab.com/)

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VariableDataError;
use crate::model::ListedFont;

/// Identity under which a font's variable data is cached.
///
/// Fonts with a PostScript name are keyed by it; the rest fall back to the
/// file path from their descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub const POSTSCRIPT_PREFIX: &'static str = "psname:";
    pub const PATH_PREFIX: &'static str = "path:";

    pub fn from_postscript_name(name: &str) -> Self {
        Self(format!("{}{name}", Self::POSTSCRIPT_PREFIX))
    }

    pub fn from_path(path: &Path) -> Self {
        Self(format!("{}{}", Self::PATH_PREFIX, path.to_string_lossy()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ListedFont {
    /// Derive the cache key for this font.
    ///
    /// Fails with [`VariableDataError::MissingIdentity`] when the font has no
    /// PostScript name and its descriptor carries no path.
    pub fn cache_key(&self) -> Result<CacheKey, VariableDataError> {
        if !self.postscript_name.is_empty() {
            return Ok(CacheKey::from_postscript_name(&self.postscript_name));
        }

        match self.descriptor.path() {
            Some(path) => Ok(CacheKey::from_path(path)),
            None => Err(VariableDataError::MissingIdentity {
                family: self.family.clone(),
                full_name: self.full_name.clone(),
            }),
        }
    }
}
