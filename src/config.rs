//! Configuration management with environment variable support.
//!
//! The gallery works on a fixed directory layout relative to the working
//! directory. Every directory can be moved with an environment variable, and
//! the binaries expose the same values as command-line flags.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GALLERY_BASELINE_DIR` | Directory holding `<index>.png` / `<index>.txt` | `baseline` |
//! | `GALLERY_RECENT_DIR` | Directory holding `<index>-<version>.png` / `.txt` | `recent` |
//! | `GALLERY_OUTPUT_DIR` | Directory the HTML pages are written to | `gallery` |
//! | `GALLERY_STYLESHEET` | Stylesheet copied next to the pages | embedded |
//! | `GALLERY_TITLE` | Title prefix for both pages | `OVT Gallery` |
//!
//! # Example
//!
//! ```bash
//! export GALLERY_RECENT_DIR="out/renders"
//! export GALLERY_TITLE="Nightly Gallery"
//! gallery render
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ============================================================================
// Default Values
// ============================================================================

/// Default baseline directory
pub const DEFAULT_BASELINE_DIR: &str = "baseline";

/// Default most-recent directory
pub const DEFAULT_RECENT_DIR: &str = "recent";

/// Default gallery output directory
pub const DEFAULT_OUTPUT_DIR: &str = "gallery";

/// Default page title prefix
pub const DEFAULT_TITLE: &str = "OVT Gallery";

// ============================================================================
// Layout Conventions
// ============================================================================

/// Extension of indexed image artefacts (compared case-insensitively)
pub const IMAGE_EXTENSION: &str = "png";

/// Extension of description companions
pub const DESCRIPTION_EXTENSION: &str = "txt";

/// Separator between index and version in most-recent file stems
pub const VERSION_SEPARATOR: char = '-';

/// Page listing every test
pub const ALL_PAGE: &str = "all.html";

/// Page listing failing tests only
pub const FAILED_PAGE: &str = "failed.html";

/// Stylesheet written next to the pages
pub const STYLESHEET_NAME: &str = "gallery.css";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the baseline directory
pub const ENV_BASELINE_DIR: &str = "GALLERY_BASELINE_DIR";

/// Environment variable for the most-recent directory
pub const ENV_RECENT_DIR: &str = "GALLERY_RECENT_DIR";

/// Environment variable for the output directory
pub const ENV_OUTPUT_DIR: &str = "GALLERY_OUTPUT_DIR";

/// Environment variable for a stylesheet override
pub const ENV_STYLESHEET: &str = "GALLERY_STYLESHEET";

/// Environment variable for the title prefix
pub const ENV_TITLE: &str = "GALLERY_TITLE";

// ============================================================================
// Configuration
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Directory layout the gallery reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Accepted reference artefacts
    pub baseline_dir: PathBuf,
    /// Generated artefacts, one version series per index
    pub recent_dir: PathBuf,
    /// Rendered pages (must already exist)
    pub output_dir: PathBuf,
}

impl Layout {
    /// Build a layout from explicit directories
    pub fn new(
        baseline_dir: impl Into<PathBuf>,
        recent_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            baseline_dir: baseline_dir.into(),
            recent_dir: recent_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Layout rooted at `root` using the default directory names
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(
            root.join(DEFAULT_BASELINE_DIR),
            root.join(DEFAULT_RECENT_DIR),
            root.join(DEFAULT_OUTPUT_DIR),
        )
    }

    /// `<baseline>/<index>.png`
    pub fn baseline_image(&self, index: u32) -> PathBuf {
        self.baseline_dir
            .join(format!("{}.{}", index, IMAGE_EXTENSION))
    }

    /// `<baseline>/<index>.txt`
    pub fn baseline_description(&self, index: u32) -> PathBuf {
        self.baseline_dir
            .join(format!("{}.{}", index, DESCRIPTION_EXTENSION))
    }

    /// `<recent>/<index>-<version>.png`
    pub fn recent_image(&self, index: u32, version: u32) -> PathBuf {
        self.recent_dir.join(format!(
            "{}{}{}.{}",
            index, VERSION_SEPARATOR, version, IMAGE_EXTENSION
        ))
    }

    /// `<recent>/<index>-<version>.txt`
    pub fn recent_description(&self, index: u32, version: u32) -> PathBuf {
        self.recent_dir.join(format!(
            "{}{}{}.{}",
            index, VERSION_SEPARATOR, version, DESCRIPTION_EXTENSION
        ))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_DIR, DEFAULT_RECENT_DIR, DEFAULT_OUTPUT_DIR)
    }
}

/// Centralized configuration for the gallery tools
#[derive(Debug, Clone)]
pub struct Config {
    /// Where artefacts are read from and pages written to
    pub layout: Layout,
    /// Stylesheet to copy instead of the embedded one
    pub stylesheet: Option<PathBuf>,
    /// Title prefix, e.g. "OVT Gallery" -> "OVT Gallery: All Tests"
    pub title: String,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            layout: Layout::new(
                env::var(ENV_BASELINE_DIR).unwrap_or_else(|_| DEFAULT_BASELINE_DIR.to_string()),
                env::var(ENV_RECENT_DIR).unwrap_or_else(|_| DEFAULT_RECENT_DIR.to_string()),
                env::var(ENV_OUTPUT_DIR).unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            stylesheet: env::var(ENV_STYLESHEET)
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            title: env::var(ENV_TITLE).unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            layout: Layout::default(),
            stylesheet: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Replace the directory layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Copy this stylesheet instead of the embedded one
    pub fn stylesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(path.into());
        self
    }

    /// Set the title prefix
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
