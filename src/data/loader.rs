use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::StatDataFile;

const STAT_DATA_RELATIVE_PATH: &str = "assets/stat_data.json";

pub fn stat_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(STAT_DATA_RELATIVE_PATH)
}

pub fn load_stat_data() -> Result<StatDataFile> {
    load_stat_data_from_path(stat_data_path())
}

pub fn load_stat_data_from_path(path: impl AsRef<Path>) -> Result<StatDataFile> {
    read_json(path.as_ref(), "stat data")
}

fn read_json<T>(path: &Path, label: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {label} file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {label} file as JSON: {}", path.display()))
}
