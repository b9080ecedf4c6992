use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    pub include_suffixes: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub output_path: PathBuf,
}

/// The immutable, fully resolved configuration for a single export run.
///
/// Built from [`Config`] plus the CLI's source-directory argument; the core
/// takes this by reference and never mutates it.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub root_dir: PathBuf,
    pub output_path: PathBuf,
    pub include_suffixes: Vec<String>,
    pub exclude_dir_names: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filters: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_suffixes: vec![
                ".java".to_string(),
                ".yml".to_string(),
                ".xml".to_string(),
            ],
            exclude_dirs: vec![
                "target".to_string(),
                "build".to_string(),
                ".git".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("exported_code.txt"),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExportError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExportError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExportError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["codexport.toml", ".codexport.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref suffixes) = cli_args.suffixes {
            // Suffixes are taken verbatim: no lowercasing, no dot insertion.
            self.filters.include_suffixes = suffixes
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref exclude) = cli_args.exclude {
            self.filters.exclude_dirs.extend(exclude.clone());
        }

        if let Some(ref output_path) = cli_args.output_path {
            self.output.output_path = output_path.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExportError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExportError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.include_suffixes.is_empty() {
            return Err(ExportError::Config {
                message: "At least one file suffix must be specified".to_string(),
            });
        }

        if self.output.output_path.as_os_str().is_empty() {
            return Err(ExportError::Config {
                message: "Output path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve into the run-scoped [`ExportConfig`] for the given source root.
    pub fn export_config<P: Into<PathBuf>>(&self, root_dir: P) -> ExportConfig {
        ExportConfig {
            root_dir: root_dir.into(),
            output_path: self.output.output_path.clone(),
            include_suffixes: self.filters.include_suffixes.clone(),
            exclude_dir_names: self.filters.exclude_dirs.clone(),
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub suffixes: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub output_path: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suffixes(mut self, suffixes: Option<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_output_path(mut self, output_path: Option<PathBuf>) -> Self {
        self.output_path = output_path;
        self
    }
}
