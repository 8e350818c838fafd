//! Pure puzzle logic
//!
//! All gameplay math lives here. This module must stay pure:
//! - No platform, storage, or rendering dependencies
//! - Value semantics: every transformation returns a fresh arrangement
//! - Bounded time in the stack height, no suspension points

pub mod flip;
pub mod score;

pub use flip::{InvalidMove, apply_move, is_solved};
pub use score::score_stars;
