//! In-process fetcher that reads variable data straight from font files (made by FontLab https://www.fontlab.com/)
//!
//! Axes and named instances come from `fvar`, style naming from `STAT`
//! and the name table. Descriptors are resolved in parallel but the output
//! keeps their order.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use read_fonts::tables::stat::AxisValue as StatAxisValue;
use read_fonts::types::NameId;
use read_fonts::{FontRef, TableProvider};
use skrifa::MetadataProvider;

use crate::fetch::VariableDataFetcher;
use crate::model::{
    AxisValue, DesignAxis, FontDescriptor, MultiAxisStyle, NamedStyle, VariableAxis,
    VariableFontData,
};
use crate::names::localized_name;
use crate::tags::tag_to_string;

const VARIATIONS_POSTSCRIPT_NAME_PREFIX: NameId = NameId::new(25);

#[derive(Debug, Default)]
pub struct FontFileFetcher {
    pool: Option<ThreadPool>,
}

impl FontFileFetcher {
    /// Fetcher that runs on rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher with a dedicated pool of `jobs` threads.
    pub fn with_jobs(jobs: usize) -> Result<Self> {
        if jobs == 0 {
            return Err(anyhow!("jobs must be at least 1"));
        }
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(Self { pool: Some(pool) })
    }
}

impl VariableDataFetcher for FontFileFetcher {
    fn fetch(&self, descriptors: &[FontDescriptor]) -> Result<Vec<VariableFontData>> {
        let run = || -> Result<Vec<VariableFontData>> {
            descriptors.par_iter().map(read_descriptor).collect()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Read the variable data for the face a descriptor points at.
pub fn read_descriptor(descriptor: &FontDescriptor) -> Result<VariableFontData> {
    let path = descriptor
        .path()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("font descriptor has no path: {descriptor:?}"))?;
    let index = descriptor.face_index();

    let data = fs::read(&path).with_context(|| format!("reading font {}", path.display()))?;
    let font = FontRef::from_index(&data, index)
        .with_context(|| format!("parsing font {}#{index}", path.display()))?;

    Ok(variable_data(&font))
}

/// Collect everything the cache stores about `font`. A font without `fvar`
/// is static and yields an empty record, STAT and name ID 25 included.
pub fn variable_data(font: &FontRef) -> VariableFontData {
    if font.fvar().is_err() {
        return VariableFontData::default();
    }

    let axes = font.axes();
    let tags: Vec<String> = axes.iter().map(|axis| tag_to_string(axis.tag())).collect();

    let variable_axes = axes
        .iter()
        .map(|axis| VariableAxis {
            minimum: f64::from(axis.min_value()),
            maximum: f64::from(axis.max_value()),
            default: f64::from(axis.default_value()),
            hidden: axis.is_hidden(),
            tag: tag_to_string(axis.tag()),
            strid: localized_name(font, axis.name_id()).unwrap_or_default(),
        })
        .collect();

    let named_styles = font
        .named_instances()
        .iter()
        .map(|instance| NamedStyle {
            axis_values: tags
                .iter()
                .cloned()
                .zip(instance.user_coords().map(f64::from))
                .collect(),
            name: localized_name(font, instance.subfamily_name_id()).unwrap_or_default(),
            postscript_name: instance
                .postscript_name_id()
                .and_then(|id| localized_name(font, id))
                .unwrap_or_default(),
        })
        .collect();

    let mut data = VariableFontData {
        axes: variable_axes,
        named_styles,
        variations_postscript_name_prefix: localized_name(font, VARIATIONS_POSTSCRIPT_NAME_PREFIX)
            .unwrap_or_default(),
        ..VariableFontData::default()
    };
    collect_stat(font, &mut data);
    data
}

fn collect_stat(font: &FontRef, data: &mut VariableFontData) {
    let Ok(stat) = font.stat() else {
        data.elided_fallback_name =
            localized_name(font, NameId::SUBFAMILY_NAME).unwrap_or_default();
        return;
    };

    let elided_id = stat
        .elided_fallback_name_id()
        .unwrap_or(NameId::SUBFAMILY_NAME);
    data.elided_fallback_name = localized_name(font, elided_id).unwrap_or_default();

    let Some(Ok(array)) = stat.offset_to_axis_values() else {
        return;
    };

    for value in array.axis_values().iter() {
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                log::debug!("skipping malformed STAT axis value: {err}");
                continue;
            }
        };

        match value {
            StatAxisValue::Format1(v) => data.design_axes.push(DesignAxis {
                format: 1,
                flags: v.flags().bits(),
                name: localized_name(font, v.value_name_id()).unwrap_or_default(),
                value: v.value().to_f64(),
                ..DesignAxis::default()
            }),
            StatAxisValue::Format2(v) => data.design_axes.push(DesignAxis {
                format: 2,
                flags: v.flags().bits(),
                name: localized_name(font, v.value_name_id()).unwrap_or_default(),
                value: v.nominal_value().to_f64(),
                minimum: v.range_min_value().to_f64(),
                maximum: v.range_max_value().to_f64(),
                ..DesignAxis::default()
            }),
            StatAxisValue::Format3(v) => data.design_axes.push(DesignAxis {
                format: 3,
                flags: v.flags().bits(),
                name: localized_name(font, v.value_name_id()).unwrap_or_default(),
                value: v.value().to_f64(),
                linked_value: v.linked_value().to_f64(),
                ..DesignAxis::default()
            }),
            StatAxisValue::Format4(v) => data.multi_axis_styles.push(MultiAxisStyle {
                flags: v.flags().bits(),
                name: localized_name(font, v.value_name_id()).unwrap_or_default(),
                values: v
                    .axis_values()
                    .iter()
                    .map(|record| AxisValue {
                        design_index: record.axis_index(),
                        value: record.value().to_f64(),
                    })
                    .collect(),
            }),
        }
    }
}
