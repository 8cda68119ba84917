pub mod load;
pub mod types;

pub use load::DEFAULT_SETTINGS_FILE;
pub use types::{
    Config, DEFAULT_ASSUMED_TV_YEAR, DEFAULT_NOTIFY_TIMEOUT_SECS, MediaExtensionTable,
    OrganizerOptions, UserSettings,
};
