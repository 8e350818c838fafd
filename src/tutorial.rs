//! Tutorial completion tracking
//!
//! One status per level id. Ratings and unlocks live in `progress`; this
//! only remembers whether the guide hand has finished its demonstration
//! for a level, so it is persisted under its own key and can be wiped
//! independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether the guide for a level has run to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TutorialStatus {
    #[default]
    NotStarted,
    Completed,
}

/// Per-level tutorial state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TutorialProgress {
    statuses: BTreeMap<u32, TutorialStatus>,
}

impl TutorialProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, level: u32) -> TutorialStatus {
        self.statuses.get(&level).copied().unwrap_or_default()
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.status(level) == TutorialStatus::Completed
    }

    /// Mark a level's tutorial done. Completion is sticky.
    pub fn complete(&mut self, level: u32) {
        self.statuses.insert(level, TutorialStatus::Completed);
        log::info!("tutorial for level {level} completed");
    }
}
