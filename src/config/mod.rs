pub mod load;
pub mod save;
pub mod types;

pub use types::{Config, ImageTypeTable, MAX_RECENT_PATHS, OutputFormat, UserSettings};
