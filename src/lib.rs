pub mod config;
pub mod error;
pub mod lines;
pub mod platform;
pub mod preferences_map;

pub use error::{PrefsError, Result};
pub use platform::Platform;
pub use preferences_map::PreferencesMap;
