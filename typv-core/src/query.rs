//! Font selection filters (made by FontLab https://www.fontlab.com/)

use regex::Regex;

use crate::model::{ListedFont, VariableFontData};

/// Narrows a font listing before and after variable data is resolved.
///
/// Name, variability and monospace checks only need the listing
/// ([`matches_font`](Self::matches_font)); axis requirements need the
/// resolved data ([`matches_data`](Self::matches_data)).
#[derive(Debug, Clone, Default)]
pub struct Query {
    axes: Vec<String>,
    name_patterns: Vec<Regex>,
    variable_only: bool,
    monospace_only: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis tags every selected font must define, in padded four-character form.
    pub fn with_axes(mut self, axes: Vec<String>) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_name_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.name_patterns = patterns;
        self
    }

    pub fn require_variable(mut self, yes: bool) -> Self {
        self.variable_only = yes;
        self
    }

    pub fn require_monospace(mut self, yes: bool) -> Self {
        self.monospace_only = yes;
        self
    }

    pub fn needs_data(&self) -> bool {
        !self.axes.is_empty()
    }

    /// Check the filters that only need the listing record.
    pub fn matches_font(&self, font: &ListedFont) -> bool {
        if self.variable_only && !font.is_variable {
            return false;
        }

        if self.monospace_only && !font.is_monospace {
            return false;
        }

        if !self.name_patterns.is_empty() {
            let matched = font
                .names()
                .any(|name| self.name_patterns.iter().any(|re| re.is_match(name)));
            if !matched {
                return false;
            }
        }

        true
    }

    /// Check the filters that need resolved variable data.
    pub fn matches_data(&self, data: &VariableFontData) -> bool {
        self.axes.iter().all(|tag| data.has_axis(tag))
    }
}
