use std::path::{Path, PathBuf};

use quiz_core::assets::DEFAULT_ASSET_ROOT;
use quiz_core::model::{QuizSettings, QuizSettingsDraft, ScoringMode, SettingsError};
use serde::Deserialize;
use thiserror::Error;

use crate::args::Args;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub quiz: QuizSettingsDraft,
    pub assets: AssetsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub root: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub filter: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings after layering defaults, file and command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub settings: QuizSettings,
    pub asset_root: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::layer(file, args)
    }

    fn layer(file: FileConfig, args: &Args) -> Result<Self, ConfigError> {
        let flags = QuizSettingsDraft {
            scoring: args.single_step.then_some(ScoringMode::SingleStep),
            seed: args.seed,
            ..QuizSettingsDraft::new()
        };
        let settings = file.quiz.merge(flags).validate()?;

        let asset_root = args
            .assets
            .clone()
            .or(file.assets.root)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT));

        let log_filter = file
            .log
            .filter
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            settings,
            asset_root,
            log_filter,
        })
    }
}
