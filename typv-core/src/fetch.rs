//! The seam between the cache and whatever actually reads fonts (made by FontLab https://www.fontlab.com/)

use anyhow::Result;

use crate::model::{FontDescriptor, VariableFontData};

/// Resolves a batch of descriptors into variable font data.
///
/// Implementations must answer with exactly one record per descriptor, in
/// the same order. A call may block for as long as it needs; the cache never
/// holds its lock while waiting on it.
pub trait VariableDataFetcher: Send + Sync {
    fn fetch(&self, descriptors: &[FontDescriptor]) -> Result<Vec<VariableFontData>>;
}

impl<F> VariableDataFetcher for F
where
    F: Fn(&[FontDescriptor]) -> Result<Vec<VariableFontData>> + Send + Sync,
{
    fn fetch(&self, descriptors: &[FontDescriptor]) -> Result<Vec<VariableFontData>> {
        self(descriptors)
    }
}
