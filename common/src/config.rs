use std::path::PathBuf;

/// Database file used when neither `--database` nor `RECIPEBOOK_DB` is set.
pub const DEFAULT_DATABASE: &str = "recipebook.db";

pub struct Config {
    /// Path of the SQLite database file.
    pub database: PathBuf,
    /// Keep recipes in memory only. Nothing survives the process.
    pub in_memory: bool,
    /// 0 prints everything, 1 drops headers and trees, 2 prints results only.
    pub quiet: u8,
    pub no_banner: bool,
}
