//! Star rating from move count vs. designer par

use crate::consts::{MAX_STARS, STAR_WINDOW};

/// Rate a completed level: at or under par earns three stars, up to
/// `STAR_WINDOW` moves over par earns two, anything slower earns one.
///
/// Always returns 1..=3. The zero rating means "not yet attempted" and is
/// tracked by the progression map, never produced here.
pub fn score_stars(moves_used: u32, par_moves: u32) -> u8 {
    if moves_used <= par_moves {
        MAX_STARS
    } else if moves_used <= par_moves + STAR_WINDOW {
        2
    } else {
        1
    }
}
