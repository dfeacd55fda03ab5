use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DoxyfillError, Result};

/// File names searched in the working directory when no config path is given
pub const CONFIG_CANDIDATES: [&str; 3] = ["Doxyfill.toml", "doxyfill.toml", ".doxyfill.toml"];

const DEFAULT_FUNCTION_TEMPLATE: &str = "
/**
 * @brief Brief description of the function.
 *
 * Detailed description of the function.
 *
 * @param[in] {{ params }}
 * @return {{ returns }}
 */
";

const DEFAULT_VARIABLE_TEMPLATE: &str = "
/**
 * @brief Brief description of the {{ subtype }} variable {{ name }}.
 *
 * Detailed description of the variable.
 */
";

const DEFAULT_CONSTANT_TEMPLATE: &str = "
/**
 * @brief Constant {{ name }}.
 *
 * Detailed description of the constant.
 */
";

const DEFAULT_RECORD_TEMPLATE: &str = "
/**
 * @brief Brief description of the {{ kind }} {{ name }}.
 *
 * Detailed description of the {{ kind }}.
 */
";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source discovery settings
    pub scan: ScanConfig,

    /// Comment templates
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name suffixes that qualify a file for annotation
    pub extensions: Vec<String>,

    /// Honour .gitignore files and skip hidden entries
    pub respect_ignore_files: bool,

    /// Maximum file size to annotate (in bytes)
    pub max_file_size: u64,
}

/// Tera sources for the four comment skeletons
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Rendered with `name`, `return_type`, `params` and `returns`
    pub function: String,

    /// Rendered with `name`, `declared_type`, `subtype` and `initializer`
    pub variable: String,

    /// Same variables as `variable`, used for const-qualified declarations
    pub constant: String,

    /// Struct and class template, rendered with `kind` and `name`
    pub record: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                ".cpp".to_string(),
                ".hpp".to_string(),
                ".h".to_string(),
                ".c".to_string(),
            ],
            respect_ignore_files: false,
            max_file_size: 1024 * 1024, // 1MB
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            function: DEFAULT_FUNCTION_TEMPLATE.to_string(),
            variable: DEFAULT_VARIABLE_TEMPLATE.to_string(),
            constant: DEFAULT_CONSTANT_TEMPLATE.to_string(),
            record: DEFAULT_RECORD_TEMPLATE.to_string(),
        }
    }
}

impl ScanConfig {
    /// Whether a file name ends with one of the allow-listed extensions
    pub fn accepts(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| DoxyfillError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DoxyfillError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Err(DoxyfillError::Config(format!(
                        "Configuration file {} does not exist",
                        p.as_ref().display()
                    )))
                }
            }
            None => {
                for candidate in &CONFIG_CANDIDATES {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.scan.extensions.iter().any(|ext| ext.is_empty()) {
            return Err(DoxyfillError::Config(
                "Empty entry in scan.extensions would match every file".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let scan = ScanConfig::default();

        assert!(scan.accepts("main.c"));
        assert!(scan.accepts("widget.hpp"));
        assert!(scan.accepts("widget.cpp"));
        assert!(scan.accepts("api.h"));
        assert!(!scan.accepts("main.rs"));
        assert!(!scan.accepts("notes.txt"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[scan]
extensions = [".cc"]
"#,
        )
        .unwrap();

        assert_eq!(config.scan.extensions, vec![".cc".to_string()]);
        assert_eq!(config.scan.max_file_size, 1024 * 1024);
        assert!(config.templates.function.contains("@param[in] {{ params }}"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doxyfill.toml");

        let mut config = Config::default();
        config.scan.extensions.push(".cc".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.scan.extensions, config.scan.extensions);
        assert_eq!(loaded.templates.record, config.templates.record);
    }

    #[test]
    fn test_empty_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doxyfill.toml");
        std::fs::write(&path, "[scan]\nextensions = [\"\"]\n").unwrap();

        assert!(matches!(Config::load(&path), Err(DoxyfillError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_path() {
        let result = Config::load_or_default(Some("/definitely/not/here/doxyfill.toml"));
        assert!(matches!(result, Err(DoxyfillError::Config(_))));
    }
}
