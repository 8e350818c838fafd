//! Level progression and star accounting
//!
//! The only stateful component in the core. Owns the persisted progress
//! record plus the per-visit working stack, validates every request before
//! any mutation, and keeps `total_stars` equal to the sum of the rating map
//! at every observable point. Storage is not touched here; callers persist
//! the `Progress` record after each mutating call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FIRST_LEVEL;
use crate::engine::{self, InvalidMove};
use crate::levels::LevelCatalog;

/// Reasons a tracker request is refused. State is unchanged on every one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),
    /// The id names no cataloged level.
    #[error("level {0} is not in the catalog")]
    UnknownLevel(u32),
    /// The id is cataloged but the unlock invariant does not hold for it.
    #[error("level {0} is locked")]
    LevelLocked(u32),
}

/// Persisted progression record.
///
/// `level_stars` holds the best-ever rating per completed level; a missing
/// key means "not yet attempted". `total_stars` is always the sum of the
/// map's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current_level: u32,
    pub total_stars: u32,
    pub level_stars: BTreeMap<u32, u8>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_level: FIRST_LEVEL,
            total_stars: 0,
            level_stars: BTreeMap::new(),
        }
    }
}

impl Progress {
    /// Invariant check: the running total matches the rating map.
    pub fn is_consistent(&self) -> bool {
        self.total_stars == self.star_sum()
    }

    fn star_sum(&self) -> u32 {
        self.level_stars.values().map(|&s| u32::from(s)).sum()
    }
}

/// Where progression went after a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Progression moved on to this level.
    Next(u32),
    /// The cleared level was the last one; progression stays put.
    CatalogExhausted,
}

/// Outcome of a level clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionReport {
    pub level: u32,
    /// Moves the clear took.
    pub moves: u32,
    /// Stars earned by this clear.
    pub stars: u8,
    /// Best-ever rating for the level after this clear.
    pub best_stars: u8,
    pub total_stars: u32,
    pub advance: Advance,
}

/// Orchestrates the level lifecycle over a read-only catalog.
#[derive(Debug, Clone)]
pub struct ProgressionTracker {
    catalog: LevelCatalog,
    progress: Progress,
    arrangement: Vec<u8>,
    par: u32,
    moves_this_level: u32,
}

impl ProgressionTracker {
    /// Fresh progression: level 1, zero stars, empty rating map.
    pub fn new(catalog: LevelCatalog) -> Self {
        Self::with_progress(catalog, Progress::default())
    }

    /// Resume from a previously persisted record. A saved level past the
    /// catalog is clamped to the last level, and a star total that disagrees
    /// with the rating map is recomputed from the map.
    pub fn with_progress(catalog: LevelCatalog, mut progress: Progress) -> Self {
        if catalog.get(progress.current_level).is_none() {
            log::warn!(
                "saved level {} is past the catalog, clamping to {}",
                progress.current_level,
                catalog.last_id()
            );
            progress.current_level = catalog.last_id();
        }
        if !progress.is_consistent() {
            let recomputed = progress.star_sum();
            log::warn!(
                "star total {} disagrees with the rating map, recomputing to {recomputed}",
                progress.total_stars
            );
            progress.total_stars = recomputed;
        }
        let mut tracker = Self {
            catalog,
            progress,
            arrangement: Vec::new(),
            par: 1,
            moves_this_level: 0,
        };
        let id = tracker.progress.current_level;
        tracker.enter(id);
        tracker
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// The persisted record, for saving after a mutating call.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Current working stack, for rendering.
    pub fn arrangement(&self) -> &[u8] {
        &self.arrangement
    }

    pub fn moves_this_level(&self) -> u32 {
        self.moves_this_level
    }

    /// Par of the level being played, for the HUD.
    pub fn par(&self) -> u32 {
        self.par
    }

    pub fn current_level(&self) -> u32 {
        self.progress.current_level
    }

    pub fn total_stars(&self) -> u32 {
        self.progress.total_stars
    }

    /// Best-ever rating for a level; 0 means not yet completed.
    pub fn stars_for(&self, id: u32) -> u8 {
        self.progress.level_stars.get(&id).copied().unwrap_or(0)
    }

    /// Unlock invariant: a cataloged level is playable when it is the first
    /// level, at or before the current level, or right after a starred one.
    pub fn is_unlocked(&self, id: u32) -> bool {
        if self.catalog.get(id).is_none() {
            return false;
        }
        if id == FIRST_LEVEL || id <= self.progress.current_level {
            return true;
        }
        self.stars_for(id - 1) > 0
    }

    /// Win query over the working stack. The caller decides when to consult
    /// it (typically once its flip animation settles).
    pub fn is_solved(&self) -> bool {
        engine::is_solved(&self.arrangement)
    }

    /// Enter a level: reset the move counter and deal a fresh copy of the
    /// cataloged arrangement. Rejected without state change when the id is
    /// unknown or locked.
    pub fn go_to_level(&mut self, id: u32) -> Result<(), ProgressError> {
        if self.catalog.get(id).is_none() {
            return Err(ProgressError::UnknownLevel(id));
        }
        if !self.is_unlocked(id) {
            return Err(ProgressError::LevelLocked(id));
        }
        self.progress.current_level = id;
        self.enter(id);
        Ok(())
    }

    /// Apply one flip to the working stack and count it.
    ///
    /// Out-of-range indices are refused before any mutation; a refused move
    /// is not counted.
    pub fn request_move(&mut self, index: usize) -> Result<&[u8], ProgressError> {
        let flipped = engine::apply_move(&self.arrangement, index)?;
        self.arrangement = flipped;
        self.moves_this_level += 1;
        Ok(&self.arrangement)
    }

    /// Record a clear of the current level.
    ///
    /// Caller contract: invoke only after observing `is_solved()`. Merges
    /// the earned rating into the best-ever map (adding only the delta to
    /// the star total, so replays never double-count), then advances to the
    /// next level or reports the catalog exhausted.
    pub fn complete_level(&mut self) -> CompletionReport {
        let level = self.progress.current_level;
        let moves = self.moves_this_level;
        let stars = engine::score_stars(moves, self.par);
        let previous = self.stars_for(level);
        let best_stars = previous.max(stars);
        if best_stars > previous {
            self.progress.level_stars.insert(level, best_stars);
            self.progress.total_stars += u32::from(best_stars - previous);
        }

        let advance = match self.catalog.next_id(level) {
            Some(next) => {
                self.progress.current_level = next;
                self.enter(next);
                log::info!("level {level} cleared with {stars} stars, on to level {next}");
                Advance::Next(next)
            }
            None => {
                log::info!("level {level} cleared with {stars} stars, catalog exhausted");
                Advance::CatalogExhausted
            }
        };

        CompletionReport {
            level,
            moves,
            stars,
            best_stars,
            total_stars: self.progress.total_stars,
            advance,
        }
    }

    /// Explicit reset back to first-launch defaults.
    pub fn reset(&mut self) {
        self.progress = Progress::default();
        self.enter(FIRST_LEVEL);
    }

    fn enter(&mut self, id: u32) {
        if let Some(level) = self.catalog.get(id) {
            self.arrangement = level.arrangement.clone();
            self.par = level.min_moves;
        }
        self.moves_this_level = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;

    fn two_level_catalog() -> LevelCatalog {
        LevelCatalog::new(vec![
            Level {
                id: 1,
                arrangement: vec![2, 1],
                min_moves: 1,
            },
            Level {
                id: 2,
                arrangement: vec![2, 3, 1],
                min_moves: 2,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_fresh_tracker_defaults() {
        let tracker = ProgressionTracker::new(LevelCatalog::builtin());
        assert_eq!(tracker.current_level(), 1);
        assert_eq!(tracker.arrangement(), &[3, 1, 4, 2, 5]);
        assert_eq!(tracker.moves_this_level(), 0);
        assert_eq!(tracker.total_stars(), 0);
        assert!(!tracker.is_solved());
    }

    #[test]
    fn test_full_stack_flip() {
        let mut tracker = ProgressionTracker::new(LevelCatalog::builtin());
        let after = tracker.request_move(0).unwrap();
        assert_eq!(after, &[5, 2, 4, 1, 3]);
        assert_eq!(tracker.moves_this_level(), 1);
        assert!(!tracker.is_solved());
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut tracker = ProgressionTracker::new(LevelCatalog::builtin());
        let err = tracker.request_move(5).unwrap_err();
        assert_eq!(
            err,
            ProgressError::InvalidMove(InvalidMove { index: 5, len: 5 })
        );
        assert_eq!(tracker.arrangement(), &[3, 1, 4, 2, 5]);
        assert_eq!(tracker.moves_this_level(), 0);
    }

    #[test]
    fn test_three_star_clear_advances() {
        let mut tracker = ProgressionTracker::new(two_level_catalog());
        tracker.request_move(0).unwrap();
        assert!(tracker.is_solved());

        let report = tracker.complete_level();
        assert_eq!(report.level, 1);
        assert_eq!(report.stars, 3);
        assert_eq!(report.best_stars, 3);
        assert_eq!(report.total_stars, 3);
        assert_eq!(report.advance, Advance::Next(2));

        // Working state now belongs to level 2
        assert_eq!(tracker.current_level(), 2);
        assert_eq!(tracker.arrangement(), &[2, 3, 1]);
        assert_eq!(tracker.moves_this_level(), 0);
    }

    #[test]
    fn test_replay_keeps_best_rating() {
        let mut tracker = ProgressionTracker::new(two_level_catalog());

        // Sloppy first clear: four moves against par 1 is one star
        for index in [1, 1, 1, 0] {
            tracker.request_move(index).unwrap();
        }
        assert!(tracker.is_solved());
        let first = tracker.complete_level();
        assert_eq!(first.stars, 1);
        assert_eq!(first.total_stars, 1);

        // Replay at par: rating rises to 3, total gains only the delta
        tracker.go_to_level(1).unwrap();
        tracker.request_move(0).unwrap();
        let second = tracker.complete_level();
        assert_eq!(second.stars, 3);
        assert_eq!(second.best_stars, 3);
        assert_eq!(second.total_stars, 3);

        // Replay worse than the best: nothing regresses
        tracker.go_to_level(1).unwrap();
        for index in [1, 1, 1, 0] {
            tracker.request_move(index).unwrap();
        }
        let third = tracker.complete_level();
        assert_eq!(third.stars, 1);
        assert_eq!(third.best_stars, 3);
        assert_eq!(third.total_stars, 3);
        assert!(tracker.progress().is_consistent());
    }

    #[test]
    fn test_locked_level_rejected() {
        let mut tracker = ProgressionTracker::new(LevelCatalog::builtin());
        assert_eq!(
            tracker.go_to_level(3).unwrap_err(),
            ProgressError::LevelLocked(3)
        );
        assert_eq!(tracker.current_level(), 1);
        assert_eq!(tracker.moves_this_level(), 0);

        assert_eq!(
            tracker.go_to_level(99).unwrap_err(),
            ProgressError::UnknownLevel(99)
        );
    }

    #[test]
    fn test_unlock_by_starred_predecessor() {
        let progress = Progress {
            current_level: 1,
            total_stars: 2,
            level_stars: BTreeMap::from([(1, 2)]),
        };
        let tracker = ProgressionTracker::with_progress(LevelCatalog::builtin(), progress);
        assert!(tracker.is_unlocked(1));
        assert!(tracker.is_unlocked(2));
        assert!(!tracker.is_unlocked(3));
        assert!(!tracker.is_unlocked(99));
    }

    #[test]
    fn test_unlock_survives_revisiting_earlier_levels() {
        let mut tracker = ProgressionTracker::new(two_level_catalog());
        tracker.request_move(0).unwrap();
        tracker.complete_level();
        assert!(tracker.is_unlocked(2));

        // Going back to level 1 must not re-lock level 2
        tracker.go_to_level(1).unwrap();
        assert!(tracker.is_unlocked(2));
        tracker.go_to_level(2).unwrap();
        assert_eq!(tracker.arrangement(), &[2, 3, 1]);
    }

    #[test]
    fn test_catalog_exhausted_is_terminal_not_error() {
        let catalog = LevelCatalog::new(vec![Level {
            id: 1,
            arrangement: vec![2, 1],
            min_moves: 1,
        }])
        .unwrap();
        let mut tracker = ProgressionTracker::new(catalog);
        tracker.request_move(0).unwrap();
        let report = tracker.complete_level();

        assert_eq!(report.advance, Advance::CatalogExhausted);
        assert_eq!(report.stars, 3);
        assert_eq!(tracker.current_level(), 1);
        assert_eq!(tracker.total_stars(), 3);

        // Past-the-end entry stays rejected
        assert_eq!(
            tracker.go_to_level(2).unwrap_err(),
            ProgressError::UnknownLevel(2)
        );
    }

    #[test]
    fn test_resume_clamps_and_repairs() {
        let progress = Progress {
            current_level: 9,
            total_stars: 7,
            level_stars: BTreeMap::from([(1, 3), (2, 2)]),
        };
        let tracker = ProgressionTracker::with_progress(LevelCatalog::builtin(), progress);
        assert_eq!(tracker.current_level(), 4);
        assert_eq!(tracker.total_stars(), 5);
        assert!(tracker.progress().is_consistent());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut tracker = ProgressionTracker::new(two_level_catalog());
        tracker.request_move(0).unwrap();
        tracker.complete_level();
        tracker.reset();
        assert_eq!(tracker.progress(), &Progress::default());
        assert_eq!(tracker.arrangement(), &[2, 1]);
    }
}
