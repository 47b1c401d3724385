//! Streaming output helpers (made by FontLab https://www.fontlab.com/)

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{ListedFont, VariableFontData};

/// A listed font paired with its resolved variable data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontVariableReport {
    pub font: ListedFont,
    pub data: Arc<VariableFontData>,
}

/// Write items as a prettified JSON array.
pub fn write_json_pretty<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write items as newline-delimited JSON (NDJSON).
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    for item in items {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}
