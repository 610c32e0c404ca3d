//! Core types for the result index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier shared by the baseline and most-recent artefacts of one test
pub type TestIndex = u32;

/// Run counter suffixed to most-recent artefacts
pub type Version = u32;

/// What the filesystem holds for one test index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// `<baseline>/<index>.png` exists
    pub has_baseline: bool,

    /// Highest version found in the most-recent directory, if any
    pub most_recent: Option<Version>,
}

impl ResultRecord {
    /// Keep the higher of the current and the observed version
    pub fn observe_version(&mut self, version: Version) {
        self.most_recent = Some(self.most_recent.map_or(version, |v| v.max(version)));
    }
}

/// Index → record, ordered by index so reports list tests ascending
pub type ResultIndex = BTreeMap<TestIndex, ResultRecord>;
