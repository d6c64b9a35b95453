//! Configuration for stance-verifier.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (STANCE_VERIFIER_HOME, STANCE_VERIFIER_EXPORT_DIR)
//! 2. Config file (.stance-verifier/config.yaml)
//! 3. Defaults (~/.stance-verifier)
//!
//! Config file discovery:
//! - Searches current directory and parents for .stance-verifier/config.yaml
//! - Paths in config file are relative to the project root (the directory
//!   holding .stance-verifier/)
//!
//! Command-line flags override whatever is resolved here.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::feed::loader::DEFAULT_SUGGESTION_COLUMN;
use crate::session::PrelabelKind;
use crate::vectorize::VectorizeMode;

/// Directory name searched for in the current directory and its parents
pub const CONFIG_DIR: &str = ".stance-verifier";

/// Rows handed to one reviewer when nothing else is configured
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub review: Option<ReviewConfig>,
    #[serde(default)]
    pub feed: Option<FeedConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to project root)
    pub home: Option<String>,
    /// Where exports are written (relative to project root)
    pub exports: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewConfig {
    pub batch_offset: Option<usize>,
    pub batch_size: Option<usize>,
    pub prelabel: Option<PrelabelKind>,
    pub allow_partial_export: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub suggestion_column: Option<String>,
    pub vectorize_mode: Option<VectorizeMode>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Export directory
    pub exports: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Review settings
    pub review: ReviewSettings,
}

#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub batch_offset: usize,
    pub batch_size: usize,
    pub prelabel: PrelabelKind,
    pub vectorize_mode: VectorizeMode,
    pub suggestion_column: String,
    /// Write the rows reviewed so far when the reviewer quits early
    pub allow_partial_export: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            batch_offset: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            prelabel: PrelabelKind::None,
            vectorize_mode: VectorizeMode::Strict,
            suggestion_column: DEFAULT_SUGGESTION_COLUMN.to_string(),
            allow_partial_export: false,
        }
    }
}

impl ReviewSettings {
    fn from_file(config: &ConfigFile) -> Self {
        let defaults = Self::default();
        let review = config.review.as_ref();
        let feed = config.feed.as_ref();

        Self {
            batch_offset: review
                .and_then(|r| r.batch_offset)
                .unwrap_or(defaults.batch_offset),
            batch_size: review
                .and_then(|r| r.batch_size)
                .unwrap_or(defaults.batch_size),
            prelabel: review
                .and_then(|r| r.prelabel)
                .unwrap_or(defaults.prelabel),
            vectorize_mode: feed
                .and_then(|f| f.vectorize_mode)
                .unwrap_or(defaults.vectorize_mode),
            suggestion_column: feed
                .and_then(|f| f.suggestion_column.clone())
                .unwrap_or(defaults.suggestion_column),
            allow_partial_export: review
                .and_then(|r| r.allow_partial_export)
                .unwrap_or(defaults.allow_partial_export),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let config_file = find_config_file();

    let (file_home, file_exports, review) = match config_file {
        Some(ref config_path) => {
            let config = load_config_file(config_path)?;

            // Project root is the parent of .stance-verifier/
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));

            let home = config.paths.home.as_deref().map(|p| resolve_path(base_dir, p));
            let exports = config.paths.exports.as_deref().map(|p| resolve_path(base_dir, p));

            (home, exports, ReviewSettings::from_file(&config))
        }
        None => (None, None, ReviewSettings::default()),
    };

    let home = std::env::var("STANCE_VERIFIER_HOME")
        .map(PathBuf::from)
        .ok()
        .or(file_home)
        .unwrap_or(default_home);

    let exports = std::env::var("STANCE_VERIFIER_EXPORT_DIR")
        .map(PathBuf::from)
        .ok()
        .or(file_exports)
        .unwrap_or_else(|| home.join("exports"));

    Ok(ResolvedConfig {
        home,
        exports,
        config_file,
        review,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the export directory
pub fn exports_dir() -> Result<PathBuf> {
    Ok(config()?.exports.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  exports: ./labels
review:
  batch_offset: 50
  batch_size: 25
  prelabel: suggestions
  allow_partial_export: true
feed:
  suggestion_column: AI_Stances
  vectorize_mode: lenient
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.exports, Some("./labels".to_string()));
        assert_eq!(config.paths.home, None);

        let settings = ReviewSettings::from_file(&config);
        assert_eq!(settings.batch_offset, 50);
        assert_eq!(settings.batch_size, 25);
        assert_eq!(settings.prelabel, PrelabelKind::Suggestions);
        assert_eq!(settings.vectorize_mode, VectorizeMode::Lenient);
        assert_eq!(settings.suggestion_column, "AI_Stances");
        assert!(settings.allow_partial_export);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ConfigFile = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
        let settings = ReviewSettings::from_file(&config);

        assert_eq!(settings.batch_offset, 0);
        assert_eq!(settings.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(settings.prelabel, PrelabelKind::None);
        assert_eq!(settings.vectorize_mode, VectorizeMode::Strict);
        assert_eq!(settings.suggestion_column, DEFAULT_SUGGESTION_COLUMN);
        assert!(!settings.allow_partial_export);
    }

    #[test]
    fn test_invalid_prelabel_is_rejected() {
        let result = serde_yaml::from_str::<ConfigFile>(
            "version: \"1.0\"\nreview:\n  prelabel: magic\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
