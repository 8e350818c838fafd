//! Platform abstraction layer
//!
//! Handles browser/native differences for storage:
//! - LocalStorage on web
//! - A JSON save file on native
//! - An in-memory map for tests and headless embedding

pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore};
