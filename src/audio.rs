//! Sound event boundary
//!
//! The core announces gameplay events; the presentation layer owns the
//! audio context and decides what they sound like. There is no global
//! sound manager: a sink is constructed by whoever runs the game and
//! passed in explicitly.

/// Gameplay events worth a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// A flip was applied
    Flip,
    /// The stack came out sorted
    Victory,
    /// A star rating landed on the level-complete screen
    StarEarned,
    /// A new level became playable
    LevelUnlocked,
}

/// Receiver for gameplay sound events, implemented by the presentation
/// layer (Web Audio, rodio, or nothing at all).
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Sink that swallows every event. Useful for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _event: SoundEvent) {}
}
