pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, Overrides, RunConfig};
pub use core::{etl::EtlEngine, headers::HeaderReport, pipeline::HistoryPipeline};
pub use domain::model::{NormalizedTable, Record};
pub use utils::error::{EtlError, Result};
