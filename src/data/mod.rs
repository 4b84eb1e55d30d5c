mod loader;
mod stat_defs;

pub use loader::{load_stat_data, load_stat_data_from_path, stat_data_path};
pub use stat_defs::{StatDataEntry, StatDataFile};
