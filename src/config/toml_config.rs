use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file; every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub source: Option<String>,
    pub out: Option<String>,
    pub pattern: Option<String>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// 額外的欄位更名規則 (錯誤名稱 = 正確名稱)，保留檔案中的順序
    pub renames: Option<toml::Table>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed_content)?;
        config.check_renames()?;
        Ok(config)
    }

    fn check_renames(&self) -> Result<()> {
        for (bad, good) in self.normalize.renames.iter().flatten() {
            if !good.is_str() {
                return Err(EtlError::InvalidConfigValueError {
                    field: "normalize.renames".to_string(),
                    value: format!("{} = {}", bad, good),
                    reason: "Rename target must be a string".to_string(),
                });
            }
        }
        Ok(())
    }

    /// 替換環境變數 (例如 ${EXPORT_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn rename_pairs(&self) -> Vec<(String, String)> {
        self.normalize
            .renames
            .iter()
            .flatten()
            .filter_map(|(bad, good)| Some((bad.clone(), good.as_str()?.to_string())))
            .collect()
    }
}
