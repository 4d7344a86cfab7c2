use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid file pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Invalid regular expression: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::CsvError(e) if e.is_io_error() => ErrorCategory::Io,
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::TomlError(_)
            | EtlError::PatternError(_)
            | EtlError::RegexError(_)
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => {
                "Check that the output directory is writable and the disk is not full"
            }
            ErrorCategory::Data => "Inspect the input files for malformed JSON records",
            ErrorCategory::Configuration => {
                "Check the command line flags and the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            EtlError::TomlError(e) => format!("Configuration file could not be parsed: {}", e),
            other => match other.category() {
                ErrorCategory::Io => format!("Could not write output: {}", other),
                _ => other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let io = EtlError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.category(), ErrorCategory::Io);

        let config = EtlError::InvalidConfigValueError {
            field: "paths.pattern".to_string(),
            value: "".to_string(),
            reason: "Value cannot be empty".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(
            config.user_friendly_message(),
            "Configuration 'paths.pattern' is invalid: Value cannot be empty"
        );

        let data = EtlError::ProcessingError {
            message: "bad".to_string(),
        };
        assert_eq!(data.category(), ErrorCategory::Data);

        let pattern = EtlError::from(glob::Pattern::new("a/**b").unwrap_err());
        assert_eq!(pattern.category(), ErrorCategory::Configuration);
    }
}
