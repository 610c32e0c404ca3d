//! Directory scanning that recovers test indices and versions from file names.
//!
//! Only image files are enumerated. Description companions are looked up by
//! convention later, and anything else in the directories (stylesheets,
//! notes, stray files) is ignored.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{ResultIndex, TestIndex, Version};
use crate::config::{IMAGE_EXTENSION, VERSION_SEPARATOR};
use crate::error::{GalleryResult, IoContext};

/// Build the index for a baseline and a most-recent directory.
///
/// Fails if either directory cannot be listed.
pub fn build_index(baseline_dir: &Path, recent_dir: &Path) -> GalleryResult<ResultIndex> {
    let mut results = ResultIndex::new();
    add_baseline(&mut results, baseline_dir)?;
    add_most_recent(&mut results, recent_dir)?;
    debug!(
        tests = results.len(),
        baseline = %baseline_dir.display(),
        recent = %recent_dir.display(),
        "built result index"
    );
    Ok(results)
}

/// Mark every `<index>.png` in `dir` as having a baseline
pub fn add_baseline(results: &mut ResultIndex, dir: &Path) -> GalleryResult<()> {
    for stem in image_stems(dir)? {
        match parse_baseline_stem(&stem) {
            Some(index) => results.entry(index).or_default().has_baseline = true,
            None => debug!(stem = %stem, dir = %dir.display(), "skipping unindexed baseline image"),
        }
    }
    Ok(())
}

/// Record the highest `<version>` of every `<index>-<version>.png` in `dir`
pub fn add_most_recent(results: &mut ResultIndex, dir: &Path) -> GalleryResult<()> {
    for stem in image_stems(dir)? {
        match parse_recent_stem(&stem) {
            Some((index, version)) => results.entry(index).or_default().observe_version(version),
            None => debug!(stem = %stem, dir = %dir.display(), "skipping unindexed recent image"),
        }
    }
    Ok(())
}

/// Parse a baseline stem such as `"12"`
pub fn parse_baseline_stem(stem: &str) -> Option<TestIndex> {
    stem.parse().ok()
}

/// Parse a most-recent stem such as `"12-3"` into `(12, 3)`
pub fn parse_recent_stem(stem: &str) -> Option<(TestIndex, Version)> {
    let (index, version) = stem.split_once(VERSION_SEPARATOR)?;
    Some((index.parse().ok()?, version.parse().ok()?))
}

/// Stems of the entries in `dir` carrying the image extension
fn image_stems(dir: &Path) -> GalleryResult<Vec<String>> {
    let mut stems = Vec::new();
    for entry in fs::read_dir(dir).at(dir)? {
        let path = entry.at(dir)?.path();

        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION));
        if !is_image {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }
    Ok(stems)
}
