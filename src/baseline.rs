//! Promotion of most-recent results to baseline.
//!
//! For each selected index with most-recent version `v`:
//! - `recent/<i>-<v>.png` is copied over `baseline/<i>.png`
//! - `recent/<i>-<v>.txt` is copied over `baseline/<i>.txt`
//!
//! When the recent description is missing, the image is still promoted and
//! any existing baseline description is removed, so the baseline ends up
//! mirroring the recent artefacts exactly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{Config, Layout};
use crate::error::{GalleryError, GalleryResult, IoContext};
use crate::index::{ResultIndex, TestIndex, Version, add_most_recent};
use crate::report::{self, GallerySummary};

/// Token selecting every index with a most-recent result
pub const ALL_TOKEN: &str = "all";

/// Which indices to promote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Indices(Vec<TestIndex>),
}

impl Selection {
    /// Parse command-line arguments; `None` when there is nothing to do.
    ///
    /// `all` as the first argument selects everything, otherwise every
    /// argument must be a test index.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> GalleryResult<Option<Self>> {
        let Some(first) = args.first() else {
            return Ok(None);
        };
        if first.as_ref() == ALL_TOKEN {
            return Ok(Some(Selection::All));
        }

        let indices = args
            .iter()
            .map(|arg| {
                let arg = arg.as_ref();
                arg.parse::<TestIndex>()
                    .map_err(|_| GalleryError::InvalidIndex(arg.to_string()))
            })
            .collect::<GalleryResult<Vec<_>>>()?;
        Ok(Some(Selection::Indices(indices)))
    }
}

/// A single file copied during promotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// What a promotion did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionReport {
    /// Files copied, in the order they were copied
    pub copied: Vec<CopiedFile>,

    /// Requested indices with no most-recent result
    pub not_found: Vec<TestIndex>,

    /// Promoted indices whose recent description was absent
    pub missing_descriptions: Vec<TestIndex>,
}

impl PromotionReport {
    /// Human-readable progress lines, unknown indices first
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .not_found
            .iter()
            .map(|index| format!("index {} not found", index))
            .collect();
        lines.extend(self.copied.iter().map(|c| {
            format!("copied {} -> {}", c.from.display(), c.to.display())
        }));
        lines.extend(
            self.missing_descriptions
                .iter()
                .map(|index| format!("index {} has no most recent description", index)),
        );
        lines
    }
}

/// `--json` output for a promotion; `gallery` is `None` when nothing ran
pub fn promotion_json(
    promotion: &PromotionReport,
    gallery: Option<&GallerySummary>,
) -> GalleryResult<String> {
    let output = serde_json::json!({
        "promotion": promotion,
        "gallery": gallery,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Index → most-recent version, for every index with a recent result
pub fn most_recent_versions(layout: &Layout) -> GalleryResult<ResultIndex> {
    let mut results = ResultIndex::new();
    add_most_recent(&mut results, &layout.recent_dir)?;
    Ok(results)
}

/// Resolve `selection` against `results`, reporting unknown indices
pub fn select(
    selection: &Selection,
    results: &ResultIndex,
    report: &mut PromotionReport,
) -> Vec<(TestIndex, Version)> {
    let latest = |index: &TestIndex| results.get(index).and_then(|r| r.most_recent);

    match selection {
        Selection::All => results
            .iter()
            .filter_map(|(&index, record)| record.most_recent.map(|v| (index, v)))
            .collect(),
        Selection::Indices(indices) => {
            let mut selected = Vec::new();
            for &index in indices {
                match latest(&index) {
                    Some(version) => selected.push((index, version)),
                    None => {
                        warn!(index, "index not found among most recent results");
                        report.not_found.push(index);
                    }
                }
            }
            selected
        }
    }
}

/// Copy the selected most-recent artefacts over the baseline
pub fn promote(layout: &Layout, selection: &Selection) -> GalleryResult<PromotionReport> {
    let results = most_recent_versions(layout)?;
    let mut report = PromotionReport::default();

    for (index, version) in select(selection, &results, &mut report) {
        copy_baseline(layout, index, version, &mut report)?;
    }

    Ok(report)
}

/// Promote, then regenerate the gallery against the new baseline
pub fn promote_and_render(
    config: &Config,
    selection: &Selection,
) -> GalleryResult<(PromotionReport, GallerySummary)> {
    let promotion = promote(&config.layout, selection)?;
    let summary = report::generate(config)?;
    Ok((promotion, summary))
}

fn copy_baseline(
    layout: &Layout,
    index: TestIndex,
    version: Version,
    report: &mut PromotionReport,
) -> GalleryResult<()> {
    let recent_image = layout.recent_image(index, version);
    let baseline_image = layout.baseline_image(index);
    let recent_description = layout.recent_description(index, version);
    let baseline_description = layout.baseline_description(index);

    // Both halves are attempted before either error is reported.
    let image = copy_file(recent_image, baseline_image, report);
    let description = match fs::copy(&recent_description, &baseline_description) {
        Ok(_) => {
            info!(from = %recent_description.display(), to = %baseline_description.display(), "copied");
            report.copied.push(CopiedFile {
                from: recent_description,
                to: baseline_description,
            });
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound && !recent_description.exists() => {
            warn!(index, version, "most recent description missing, clearing baseline description");
            report.missing_descriptions.push(index);
            remove_if_present(&baseline_description)
        }
        Err(e) => Err(GalleryError::io(recent_description, e)),
    };

    image.and(description)
}

fn copy_file(from: PathBuf, to: PathBuf, report: &mut PromotionReport) -> GalleryResult<()> {
    fs::copy(&from, &to).at(&from)?;
    info!(from = %from.display(), to = %to.display(), "copied");
    report.copied.push(CopiedFile { from, to });
    Ok(())
}

fn remove_if_present(path: &Path) -> GalleryResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GalleryError::io(path, e)),
    }
}
