//! External generation settings
//!
//! Generation budgets and strategy can be tuned from a RON file without
//! recompiling.

pub mod loader;

pub use loader::{export_default_settings, ExpandSettings, GenerationSettings, SettingsError};
