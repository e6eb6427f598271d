use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_URI: &str = "localhost:48555";
pub const DEFAULT_KEYSPACE: &str = "phone_calls";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Load the phone-calls CSV data set into a graph keyspace.
///
/// Reads companies.csv, people.csv, contracts.csv and calls.csv from the
/// data directory and inserts one record per transaction.
#[derive(Debug, Clone, Parser)]
#[command(name = "phone-calls", version)]
pub struct Config {
    /// Graph store address
    #[arg(long, default_value = DEFAULT_URI)]
    pub uri: String,

    /// Keyspace to load into
    #[arg(long, default_value = DEFAULT_KEYSPACE)]
    pub keyspace: String,

    /// Directory holding the four CSV files
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Record statements in a local SQLite journal instead of the graph store
    #[arg(long, value_name = "PATH")]
    pub journal: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            keyspace: DEFAULT_KEYSPACE.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            journal: None,
        }
    }
}
