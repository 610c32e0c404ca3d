//! Visual Gallery - visual regression reports for rendered test output.
//!
//! This crate provides:
//! - Result indexing over a `baseline/` and a `recent/` directory
//! - Pass/fail comparison of descriptions and decoded image pixels
//! - HTML gallery rendering (all tests and failed tests)
//! - Promotion of most-recent results to baseline
//!
//! # Example
//!
//! ```rust,no_run
//! use visual_gallery::{Config, report};
//!
//! let summary = report::generate(&Config::from_env()).unwrap();
//! println!("{} of {} tests failed", summary.failed, summary.total);
//! ```

pub mod baseline;
pub mod compare;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod report;

// Re-export configuration and errors
pub use config::{Config, Layout};
pub use error::{GalleryError, GalleryResult};

// Re-export index types
pub use index::{ResultIndex, ResultRecord, TestIndex, Version, build_index};

// Re-export comparison and rendering
pub use compare::{Status, TestReportEntry, compare_all};
pub use report::{GallerySummary, ReportKind, generate, render_gallery};

// Re-export promotion
pub use baseline::{PromotionReport, Selection, promote, promote_and_render};
