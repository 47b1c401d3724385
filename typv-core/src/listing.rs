//! Turning font files into `ListedFont` records (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use read_fonts::types::NameId;
use read_fonts::{FileRef, FontRef, TableProvider};

use crate::discovery::{FontDiscovery, PathDiscovery};
use crate::model::{FontDescriptor, ListedFont};
use crate::names::first_name;

#[derive(Debug, Default, Clone)]
pub struct ListOptions {
    pub follow_symlinks: bool,
    pub jobs: Option<usize>,
}

/// List every face found under `paths`, sorted by file and face index.
///
/// Files that look like fonts but fail to parse are skipped with a warning.
pub fn list_fonts(paths: &[PathBuf], opts: &ListOptions) -> Result<Vec<ListedFont>> {
    if matches!(opts.jobs, Some(0)) {
        return Err(anyhow!("jobs must be at least 1 when provided"));
    }

    let discovery = PathDiscovery::new(paths.iter().cloned()).follow_symlinks(opts.follow_symlinks);
    let candidates = discovery.discover()?;
    log::debug!("listing {} candidate font files", candidates.len());

    let run_listing = || -> Vec<ListedFont> {
        let mut fonts: Vec<ListedFont> = candidates
            .par_iter()
            .flat_map_iter(|loc| match list_faces(&loc.path) {
                Ok(faces) => faces,
                Err(err) => {
                    log::warn!("skipping {}: {err:#}", loc.path.display());
                    Vec::new()
                }
            })
            .collect();

        sort_fonts(&mut fonts);
        fonts
    };

    if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(run_listing))
    } else {
        Ok(run_listing())
    }
}

/// One `ListedFont` per face in the file; collections are expanded.
pub fn list_faces(path: &Path) -> Result<Vec<ListedFont>> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let file = FileRef::new(&data).with_context(|| format!("parsing font {}", path.display()))?;

    let faces: Vec<(Option<u32>, FontRef)> = match file {
        FileRef::Font(font) => vec![(None, font)],
        FileRef::Collection(collection) => (0..collection.len())
            .map(|idx| collection.get(idx).map(|font| (Some(idx), font)))
            .collect::<Result<_, _>>()
            .with_context(|| format!("reading collection {}", path.display()))?,
    };

    Ok(faces
        .iter()
        .map(|(index, font)| listed_face(font, path, *index))
        .collect())
}

fn listed_face(font: &FontRef, path: &Path, index: Option<u32>) -> ListedFont {
    let family = first_name(
        font,
        &[NameId::TYPOGRAPHIC_FAMILY_NAME, NameId::FAMILY_NAME],
    )
    .unwrap_or_else(|| fallback_name(path));
    let full_name = first_name(font, &[NameId::FULL_NAME]).unwrap_or_else(|| family.clone());
    let postscript_name = first_name(font, &[NameId::POSTSCRIPT_NAME]).unwrap_or_default();

    let is_monospace = font
        .post()
        .map(|post| post.is_fixed_pitch() != 0)
        .unwrap_or(false);
    let is_variable = font.fvar().is_ok();

    let mut descriptor = FontDescriptor::from_path(path);
    descriptor.index = index;

    ListedFont {
        family,
        full_name,
        postscript_name,
        is_monospace,
        is_variable,
        descriptor,
    }
}

fn fallback_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn sort_fonts(fonts: &mut [ListedFont]) {
    fonts.sort_by(|a, b| {
        a.descriptor
            .path
            .cmp(&b.descriptor.path)
            .then_with(|| a.descriptor.index.cmp(&b.descriptor.index))
    });
}
