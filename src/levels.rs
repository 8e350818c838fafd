//! Level catalog and tutorial guide data
//!
//! Levels are authored at build time and treated as read-only for the life
//! of the process. Catalog ids are dense from `FIRST_LEVEL`, so "the next
//! level" is always id + 1 when one exists. The target ordering is a fixed
//! policy (ascending by size) and is not stored per level.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FIRST_LEVEL;

/// A single hand-authored puzzle.
///
/// `arrangement` is the starting disc order. `min_moves` is the designer
/// par for a three-star clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub arrangement: Vec<u8>,
    pub min_moves: u32,
}

/// Ways an externally supplied level set can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no levels")]
    Empty,
    #[error("level at position {position} has id {found}, expected {expected}")]
    NonDenseIds {
        position: usize,
        found: u32,
        expected: u32,
    },
    #[error("level {id} has an empty arrangement")]
    EmptyArrangement { id: u32 },
    #[error("level {id} has a zero-size disc")]
    ZeroDisc { id: u32 },
    #[error("level {id} has a zero-move par")]
    ZeroPar { id: u32 },
}

/// Ordered, validated set of levels.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// The shipped levels, as authored for the original release.
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                Level {
                    id: 1,
                    arrangement: vec![3, 1, 4, 2, 5],
                    min_moves: 3,
                },
                Level {
                    id: 2,
                    arrangement: vec![2, 5, 1, 4, 3],
                    min_moves: 4,
                },
                Level {
                    id: 3,
                    arrangement: vec![1, 5, 2, 4, 3],
                    min_moves: 5,
                },
                Level {
                    id: 4,
                    arrangement: vec![1, 5, 2, 4, 3],
                    min_moves: 5,
                },
            ],
        }
    }

    /// Validate and adopt an externally supplied level set (level tooling,
    /// JSON-loaded catalogs). Ids must run dense from `FIRST_LEVEL` in order.
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (position, level) in levels.iter().enumerate() {
            let expected = FIRST_LEVEL + position as u32;
            if level.id != expected {
                return Err(CatalogError::NonDenseIds {
                    position,
                    found: level.id,
                    expected,
                });
            }
            if level.arrangement.is_empty() {
                return Err(CatalogError::EmptyArrangement { id: level.id });
            }
            if level.arrangement.contains(&0) {
                return Err(CatalogError::ZeroDisc { id: level.id });
            }
            if level.min_moves == 0 {
                return Err(CatalogError::ZeroPar { id: level.id });
            }
        }
        Ok(Self { levels })
    }

    /// Look up a level by id.
    pub fn get(&self, id: u32) -> Option<&Level> {
        let index = id.checked_sub(FIRST_LEVEL)? as usize;
        self.levels.get(index)
    }

    pub fn first_id(&self) -> u32 {
        FIRST_LEVEL
    }

    pub fn last_id(&self) -> u32 {
        FIRST_LEVEL + self.levels.len() as u32 - 1
    }

    /// Id of the level after `id`, if the catalog has one.
    pub fn next_id(&self, id: u32) -> Option<u32> {
        let next = id.checked_add(1)?;
        self.get(next).map(|level| level.id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

/// Scripted flip sequences the tutorial hand replays for the early levels.
/// Indices are 0-based flip boundaries; each sequence ends on a solved stack.
const GUIDE_LEVEL_1: &[usize] = &[3, 2, 1, 0, 2];
const GUIDE_LEVEL_2: &[usize] = &[1, 3, 0, 1];

/// Guide sequence for a level, when one is authored.
pub fn guide_sequence(id: u32) -> Option<&'static [usize]> {
    match id {
        1 => Some(GUIDE_LEVEL_1),
        2 => Some(GUIDE_LEVEL_2),
        _ => None,
    }
}
