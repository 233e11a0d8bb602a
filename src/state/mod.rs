//! Shareable URL state and persisted UI preferences.

pub mod codec;
pub mod preferences;

pub use codec::Location;
pub use preferences::{JsonFileStore, KeyValueStore, MemoryStore, Preferences};
