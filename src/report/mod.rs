//! Gallery rendering: two HTML pages and a stylesheet.
//!
//! The pages are written to fixed names inside the configured output
//! directory, which must already exist:
//! - `all.html` lists every test
//! - `failed.html` lists failing tests only
//! - `gallery.css` is the embedded stylesheet, or a configured override

pub mod html;

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compare::{TestReportEntry, compare_all};
use crate::config::{ALL_PAGE, Config, FAILED_PAGE, STYLESHEET_NAME};
use crate::error::{GalleryResult, IoContext};
use crate::index::build_index;
use html::{PageContext, render_page};

/// Stylesheet shipped with the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../../assets/gallery.css");

/// Which page is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    All,
    Failed,
}

impl ReportKind {
    /// Type tag handed to the page
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::All => "all",
            ReportKind::Failed => "failed",
        }
    }

    /// Page title for a given prefix
    pub fn title(&self, prefix: &str) -> String {
        match self {
            ReportKind::All => format!("{}: All Tests", prefix),
            ReportKind::Failed => format!("{}: Failed Tests", prefix),
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::All => ALL_PAGE,
            ReportKind::Failed => FAILED_PAGE,
        }
    }
}

/// Outcome of a gallery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GallerySummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub all_page: PathBuf,
    pub failed_page: PathBuf,
    pub stylesheet: PathBuf,
    pub entries: Vec<TestReportEntry>,
}

impl GallerySummary {
    /// Pretty-printed JSON for `--json` output
    pub fn to_json(&self) -> GalleryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Index, compare and render using the directories in `config`
pub fn generate(config: &Config) -> GalleryResult<GallerySummary> {
    let layout = &config.layout;
    let results = build_index(&layout.baseline_dir, &layout.recent_dir)?;
    let entries = compare_all(layout, &results);
    render_gallery(config, entries, Local::now())
}

/// Write both pages and the stylesheet for already-compared entries
pub fn render_gallery(
    config: &Config,
    entries: Vec<TestReportEntry>,
    time: DateTime<Local>,
) -> GalleryResult<GallerySummary> {
    let output_dir = &config.layout.output_dir;

    let all: Vec<&TestReportEntry> = entries.iter().collect();
    let failed: Vec<&TestReportEntry> = entries.iter().filter(|e| e.failed).collect();

    let all_page = write_page(config, ReportKind::All, &all, all.len(), failed.len(), time)?;
    let failed_page = write_page(config, ReportKind::Failed, &failed, all.len(), failed.len(), time)?;
    let stylesheet = write_stylesheet(config)?;

    let total = all.len();
    let failed_count = failed.len();
    info!(total, failed = failed_count, dir = %output_dir.display(), "rendered gallery");

    Ok(GallerySummary {
        total,
        passed: total - failed_count,
        failed: failed_count,
        all_page,
        failed_page,
        stylesheet,
        entries,
    })
}

fn write_page(
    config: &Config,
    kind: ReportKind,
    entries: &[&TestReportEntry],
    total: usize,
    failed: usize,
    time: DateTime<Local>,
) -> GalleryResult<PathBuf> {
    let output_dir = &config.layout.output_dir;
    let title = kind.title(&config.title);
    let page = render_page(&PageContext {
        title: &title,
        kind,
        time,
        entries,
        total,
        failed,
        output_dir,
    });

    let path = output_dir.join(kind.file_name());
    fs::write(&path, page).at(&path)?;
    info!(path = %path.display(), entries = entries.len(), "wrote page");
    Ok(path)
}

fn write_stylesheet(config: &Config) -> GalleryResult<PathBuf> {
    let dest = config.layout.output_dir.join(STYLESHEET_NAME);
    match &config.stylesheet {
        Some(source) => {
            fs::copy(source, &dest).at(source)?;
        }
        None => {
            fs::write(&dest, DEFAULT_STYLESHEET).at(&dest)?;
        }
    }
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_tags() {
        assert_eq!(ReportKind::All.as_str(), "all");
        assert_eq!(ReportKind::Failed.as_str(), "failed");
        assert_eq!(ReportKind::All.title("OVT Gallery"), "OVT Gallery: All Tests");
        assert_eq!(ReportKind::Failed.title("OVT Gallery"), "OVT Gallery: Failed Tests");
        assert_eq!(ReportKind::Failed.file_name(), "failed.html");
    }

    #[test]
    fn test_default_stylesheet_has_status_classes() {
        assert!(DEFAULT_STYLESHEET.contains(".success"));
        assert!(DEFAULT_STYLESHEET.contains(".failure"));
    }
}
