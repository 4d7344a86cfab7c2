use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 檔案比對樣式：相對於來源目錄，可含子目錄與 `**`
pub fn validate_glob_pattern(field_name: &str, pattern: &str) -> Result<()> {
    validate_non_empty_string(field_name, pattern)?;

    if Path::new(pattern).has_root() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: "Pattern must be relative to the source directory".to_string(),
        });
    }

    glob::Pattern::new(pattern)?;
    Ok(())
}

/// 輸出檔名必須是單純的檔名，不能帶目錄
pub fn validate_file_name(field_name: &str, name: &str, extension: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    let path = Path::new(name);
    let is_bare = path.file_name().and_then(|n| n.to_str()) == Some(name);
    if !is_bare {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a file name without directory components".to_string(),
        });
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => Ok(()),
        _ => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: format!("File name must end with .{}", extension),
        }),
    }
}

pub fn validate_rename_pairs(field_name: &str, pairs: &[(String, String)]) -> Result<()> {
    let sources: HashSet<&str> = pairs.iter().map(|(bad, _)| bad.as_str()).collect();
    let mut seen_sources = HashSet::new();

    for (bad, good) in pairs {
        validate_non_empty_string(field_name, bad)?;
        validate_non_empty_string(field_name, good)?;

        if bad == good {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: bad.clone(),
                reason: "Rename source and target must differ".to_string(),
            });
        }
        if !seen_sources.insert(bad.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: bad.clone(),
                reason: "Field is renamed more than once".to_string(),
            });
        }
        if sources.contains(good.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: good.clone(),
                reason: "Rename target is itself renamed".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(bad: &str, good: &str) -> (String, String) {
        (bad.to_string(), good.to_string())
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("paths.source", Path::new("../Source Data")).is_ok());
        assert!(validate_path("paths.source", Path::new("")).is_err());
        assert!(validate_path("paths.source", Path::new("bad\0path")).is_err());
    }

    #[test]
    fn test_validate_glob_pattern() {
        assert!(validate_glob_pattern("pattern", "Streaming_History*.json").is_ok());
        assert!(validate_glob_pattern("pattern", "2023/Streaming_History*.json").is_ok());
        assert!(validate_glob_pattern("pattern", "**/Streaming_History*.json").is_ok());
        assert!(validate_glob_pattern("pattern", "").is_err());
        assert!(validate_glob_pattern("pattern", "/abs/*.json").is_err());
        assert!(matches!(
            validate_glob_pattern("pattern", "a/***.json"),
            Err(EtlError::PatternError(_))
        ));
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("paths.output_file", "combined.csv", "csv").is_ok());
        assert!(validate_file_name("paths.output_file", "combined.CSV", "csv").is_ok());
        assert!(validate_file_name("paths.output_file", "nested/combined.csv", "csv").is_err());
        assert!(validate_file_name("paths.output_file", "combined.json", "csv").is_err());
        assert!(validate_file_name("paths.output_file", "  ", "csv").is_err());
    }

    #[test]
    fn test_validate_rename_pairs() {
        assert!(validate_rename_pairs("renames", &[pair("a", "b"), pair("c", "d")]).is_ok());
        assert!(validate_rename_pairs("renames", &[pair("a", "a")]).is_err());
        assert!(validate_rename_pairs("renames", &[pair("a", "b"), pair("b", "c")]).is_err());
        assert!(validate_rename_pairs("renames", &[pair("a", "b"), pair("a", "c")]).is_err());
        assert!(validate_rename_pairs("renames", &[pair("", "b")]).is_err());
    }
}
