//! Configuration

use std::path::PathBuf;

use clap::Args;
use souk::{
    catalog::Catalog,
    fixtures::{self, Fixture},
    storage::FileStorage,
};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

/// Storage and catalog settings.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory the cart and wishlist are persisted in
    #[arg(long, global = true, env = "SOUK_DATA_DIR", default_value = ".souk")]
    pub(crate) data_dir: PathBuf,

    /// Catalog YAML file; the bundled catalog is used when omitted
    #[arg(long, global = true, env = "SOUK_CATALOG")]
    pub(crate) catalog: Option<PathBuf>,
}

impl StoreConfig {
    pub(crate) fn open_storage(&self) -> Result<FileStorage, String> {
        FileStorage::open(&self.data_dir).map_err(|error| {
            format!(
                "failed to open data directory {}: {error}",
                self.data_dir.display()
            )
        })
    }

    pub(crate) fn load_catalog(&self) -> Result<Catalog, String> {
        match &self.catalog {
            Some(path) => Fixture::from_path(path)
                .map(Fixture::into_catalog)
                .map_err(|error| format!("failed to load catalog {}: {error}", path.display())),
            None => fixtures::default_catalog()
                .map_err(|error| format!("failed to load bundled catalog: {error}")),
        }
    }
}
