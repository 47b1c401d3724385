//! Font identity and variable-font metadata records (made by FontLab https://www.fontlab.com/)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a font lives, as far as the metadata backend is concerned.
///
/// `path` and `index` are the entries this crate understands; anything else
/// the producer attached rides along in `extra` and is handed to the fetcher
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FontDescriptor {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    /// The font file path, treating an empty path as absent.
    pub fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Face index inside a TTC/OTC collection, `0` for single fonts.
    pub fn face_index(&self) -> u32 {
        self.index.unwrap_or(0)
    }
}

/// One font face as reported by a font listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListedFont {
    pub family: String,
    pub full_name: String,
    #[serde(default)]
    pub postscript_name: String,
    #[serde(default)]
    pub is_monospace: bool,
    #[serde(default)]
    pub is_variable: bool,
    #[serde(default)]
    pub descriptor: FontDescriptor,
}

impl ListedFont {
    /// Names worth matching against, skipping the empty ones.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [
            self.family.as_str(),
            self.full_name.as_str(),
            self.postscript_name.as_str(),
        ]
        .into_iter()
        .filter(|n| !n.is_empty())
    }
}

/// A single `fvar` axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariableAxis {
    pub minimum: f64,
    pub maximum: f64,
    pub default: f64,
    pub hidden: bool,
    pub tag: String,
    /// Human readable axis name.
    pub strid: String,
}

/// A named instance: a point in the design space with a name attached.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedStyle {
    pub axis_values: BTreeMap<String, f64>,
    pub name: String,
    #[serde(rename = "psname")]
    pub postscript_name: String,
}

/// A STAT axis value record of format 1, 2 or 3.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignAxis {
    pub format: u16,
    pub flags: u16,
    pub name: String,
    pub value: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub linked_value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValue {
    /// Index into the font's STAT design axes.
    pub design_index: u16,
    pub value: f64,
}

/// A STAT format 4 record: one style name spanning several axes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiAxisStyle {
    pub flags: u16,
    pub name: String,
    pub values: Vec<AxisValue>,
}

/// Everything the cache remembers about one variable font.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariableFontData {
    pub axes: Vec<VariableAxis>,
    pub named_styles: Vec<NamedStyle>,
    pub variations_postscript_name_prefix: String,
    pub elided_fallback_name: String,
    pub design_axes: Vec<DesignAxis>,
    pub multi_axis_styles: Vec<MultiAxisStyle>,
}

impl VariableFontData {
    pub fn has_axis(&self, tag: &str) -> bool {
        self.axes.iter().any(|axis| axis.tag == tag)
    }
}
