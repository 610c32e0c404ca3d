//! Pass/fail decision for every indexed test.
//!
//! A test passes when its baseline and most-recent descriptions are equal
//! and both images decode to the same pixels. Absent files on both sides
//! count as equal, so a lone artefact on either side is a failure.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Layout;
use crate::index::{ResultIndex, ResultRecord, TestIndex};

/// Display class of a report entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
        }
    }

    fn from_failed(failed: bool) -> Self {
        if failed { Status::Failure } else { Status::Success }
    }
}

/// One row of the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReportEntry {
    pub index: TestIndex,

    pub failed: bool,

    /// Header class used by the pages
    pub status: Status,

    /// Baseline image, if the index has one
    pub baseline_image: Option<PathBuf>,

    pub baseline_description: Option<String>,

    /// Most-recent image, if the index has a recent run
    pub most_recent_image: Option<PathBuf>,

    pub most_recent_description: Option<String>,
}

/// Compare every index and return entries in ascending index order
pub fn compare_all(layout: &Layout, results: &ResultIndex) -> Vec<TestReportEntry> {
    results
        .iter()
        .map(|(&index, record)| compare_one(layout, index, record))
        .collect()
}

/// Build the entry for a single index
pub fn compare_one(layout: &Layout, index: TestIndex, record: &ResultRecord) -> TestReportEntry {
    let (baseline_image, baseline_description) = if record.has_baseline {
        (
            Some(layout.baseline_image(index)),
            try_read(&layout.baseline_description(index)),
        )
    } else {
        (None, None)
    };

    let (most_recent_image, most_recent_description) = match record.most_recent {
        Some(version) => (
            Some(layout.recent_image(index, version)),
            try_read(&layout.recent_description(index, version)),
        ),
        None => (None, None),
    };

    // Descriptions compare as raw bytes; text is only for display.
    let failed = baseline_description != most_recent_description
        || !same_pixels(baseline_image.as_deref(), most_recent_image.as_deref());

    if failed {
        debug!(index, "test failed");
    }

    TestReportEntry {
        index,
        failed,
        status: Status::from_failed(failed),
        baseline_image,
        baseline_description: baseline_description.as_deref().map(display_text),
        most_recent_image,
        most_recent_description: most_recent_description.as_deref().map(display_text),
    }
}

/// Read a description's bytes, treating any read failure as "no description"
pub fn try_read(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).ok()
}

fn display_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Decode an image, treating a missing or undecodable file as absent
pub fn image_data(path: &Path) -> Option<DynamicImage> {
    match image::open(path) {
        Ok(img) => Some(img),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "image unavailable");
            None
        }
    }
}

/// Decoded pixel equality; two absent images are equal
fn same_pixels(baseline: Option<&Path>, most_recent: Option<&Path>) -> bool {
    let baseline = baseline.and_then(image_data);
    let most_recent = most_recent.and_then(image_data);

    match (baseline, most_recent) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.dimensions() == b.dimensions()
                && a.color() == b.color()
                && a.as_bytes() == b.as_bytes()
        }
        _ => false,
    }
}
