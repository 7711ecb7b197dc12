//! Preset module
//!
//! Immutable store of install scripts keyed by version label or preset name.

mod bundled;
mod error;
mod store;
mod version;

pub use error::{LookupKind, PresetError};
pub use store::{Preset, PresetStore};
pub use version::VersionLabel;
