use crate::utils::error::{Result, RosterError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";
pub const DEFAULT_ROSTER_FILE: &str = "students.xml";
pub const DEFAULT_LOG_FILE: &str = "students_program.log";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_ROSTER_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(DEFAULT_LOG_FILE.to_string()),
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl RosterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案存在時載入配置，否則使用預設值
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| RosterError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${ROSTER_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| RosterError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.logging.format).unwrap_or_default()
    }

    pub fn log_level(&self) -> String {
        self.logging.level.to_ascii_lowercase()
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.file", &self.storage.file)?;
        if let Some(file) = &self.logging.file {
            validation::validate_path("logging.file", file)?;
        }
        validation::validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
file = "data/students.xml"

[logging]
file = "students_program.log"
level = "debug"
format = "json"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.file, "data/students.xml");
        assert_eq!(config.logging.file.as_deref(), Some("students_program.log"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = RosterConfig::from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();

        assert_eq!(config.storage.file, DEFAULT_ROSTER_FILE);
        assert_eq!(config.logging.file.as_deref(), Some(DEFAULT_LOG_FILE));
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STUDENT_ROSTER_TEST_DIR", "/tmp/roster");

        let toml_content = r#"
[storage]
file = "${STUDENT_ROSTER_TEST_DIR}/students.xml"

[logging]
file = "${STUDENT_ROSTER_UNSET_VAR}/app.log"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.file, "/tmp/roster/students.xml");
        assert_eq!(
            config.logging.file.as_deref(),
            Some("${STUDENT_ROSTER_UNSET_VAR}/app.log")
        );

        std::env::remove_var("STUDENT_ROSTER_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = RosterConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = RosterConfig::from_toml_str("[storage]\nfile = \"\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("storage.file"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = RosterConfig::from_toml_str("[storage\nfile = 1").unwrap_err();
        assert!(matches!(err, RosterError::Config { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nfile = \"from_file.xml\"\n")
            .unwrap();

        let config = RosterConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.file, "from_file.xml");
    }

    #[test]
    fn test_from_file_or_default_when_absent() {
        let config = RosterConfig::from_file_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config, RosterConfig::default());
    }
}
