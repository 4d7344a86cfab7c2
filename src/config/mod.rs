pub mod cli;
pub mod toml_config;

use crate::core::normalizer::default_renames;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_name, validate_glob_pattern, validate_path, validate_rename_pairs, Validate,
};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_SOURCE_DIR: &str = "../Source Data";
pub const DEFAULT_OUTPUT_DIR: &str = "../Transformed Data";
pub const DEFAULT_PATTERN: &str = "Streaming_History*.json";
pub const DEFAULT_OUTPUT_FILE: &str = "combined_streaming_history.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "streaming-history-etl")]
#[command(about = "Convert streaming-history JSON files into one combined CSV")]
pub struct CliConfig {
    /// Source directory containing JSON files [default: ../Source Data]
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory for the CSV file [default: ../Transformed Data]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Glob pattern to match JSON files, relative to the source directory;
    /// may include subdirectories or `**` [default: Streaming_History*.json]
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列 > 設定檔 > 預設值
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        let overrides = Overrides {
            source: self.source.clone(),
            out: self.out.clone(),
            pattern: self.pattern.clone(),
        };
        RunConfig::resolve(overrides, file.as_ref())
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub pattern: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pattern: String,
    pub output_file_name: String,
    pub renames: Vec<(String, String)>,
}

impl RunConfig {
    pub fn resolve(overrides: Overrides, file: Option<&TomlConfig>) -> Result<Self> {
        let paths = file.map(|f| &f.paths);

        let source_dir = overrides
            .source
            .or_else(|| paths.and_then(|p| p.source.clone()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));
        let output_dir = overrides
            .out
            .or_else(|| paths.and_then(|p| p.out.clone()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let pattern = overrides
            .pattern
            .or_else(|| paths.and_then(|p| p.pattern.clone()))
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());
        let output_file_name = paths
            .and_then(|p| p.output_file.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());

        let mut renames = default_renames();
        for pair in file.map(TomlConfig::rename_pairs).unwrap_or_default() {
            if !renames.contains(&pair) {
                renames.push(pair);
            }
        }

        let config = Self {
            source_dir,
            output_dir,
            pattern,
            output_file_name,
            renames,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source_dir)?;
        validate_path("out", &self.output_dir)?;
        validate_glob_pattern("pattern", &self.pattern)?;
        validate_file_name("paths.output_file", &self.output_file_name, "csv")?;
        validate_rename_pairs("normalize.renames", &self.renames)?;
        Ok(())
    }
}

impl ConfigProvider for RunConfig {
    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    fn renames(&self) -> &[(String, String)] {
        &self.renames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_defaults() {
        let config = RunConfig::resolve(Overrides::default(), None).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("../Source Data"));
        assert_eq!(config.output_dir, PathBuf::from("../Transformed Data"));
        assert_eq!(config.pattern, "Streaming_History*.json");
        assert_eq!(
            config.output_path(),
            PathBuf::from("../Transformed Data/combined_streaming_history.csv")
        );
        assert_eq!(config.renames, default_renames());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[paths]
source = "from_file"
out = "out_from_file"
pattern = "*.ndjson"
"#,
        )
        .unwrap();
        let overrides = Overrides {
            source: Some(PathBuf::from("from_cli")),
            ..Overrides::default()
        };

        let config = RunConfig::resolve(overrides, Some(&file)).unwrap();

        assert_eq!(config.source_dir, PathBuf::from("from_cli"));
        assert_eq!(config.output_dir, PathBuf::from("out_from_file"));
        assert_eq!(config.pattern, "*.ndjson");
    }

    #[test]
    fn test_file_renames_are_appended() {
        let file = TomlConfig::from_toml_str(
            r#"
[normalize.renames]
master_metadata_album_album_name = "master_metadata_album_name"
show = "episode_show_name"
"#,
        )
        .unwrap();

        let config = RunConfig::resolve(Overrides::default(), Some(&file)).unwrap();

        assert_eq!(config.renames.len(), 2);
        assert_eq!(config.renames[0].0, "master_metadata_album_album_name");
        assert_eq!(
            config.renames[1],
            ("show".to_string(), "episode_show_name".to_string())
        );
    }

    #[test]
    fn test_file_renames_keep_file_order() {
        let file = TomlConfig::from_toml_str(
            r#"
[normalize.renames]
zz_bad = "zz_good"
aa_bad = "aa_good"
"#,
        )
        .unwrap();

        let config = RunConfig::resolve(Overrides::default(), Some(&file)).unwrap();

        let sources: Vec<&str> = config.renames.iter().map(|(from, _)| from.as_str()).collect();
        assert_eq!(
            sources,
            ["master_metadata_album_album_name", "zz_bad", "aa_bad"]
        );
    }

    #[test]
    fn test_conflicting_rename_is_rejected() {
        let file = TomlConfig::from_toml_str(
            r#"
[normalize.renames]
master_metadata_album_album_name = "album"
"#,
        )
        .unwrap();
        let err = RunConfig::resolve(Overrides::default(), Some(&file)).unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let overrides = Overrides {
            pattern: Some(String::new()),
            ..Overrides::default()
        };
        assert!(RunConfig::resolve(overrides, None).is_err());

        let overrides = Overrides {
            pattern: Some("Streaming_History***.json".to_string()),
            ..Overrides::default()
        };
        assert!(matches!(
            RunConfig::resolve(overrides, None),
            Err(EtlError::PatternError(_))
        ));

        let file = TomlConfig::from_toml_str("[paths]\noutput_file = \"nested/out.csv\"").unwrap();
        assert!(RunConfig::resolve(Overrides::default(), Some(&file)).is_err());
    }
}
