//! Demo configuration, read from a RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use fetchstate_engine::ApiSettings;
use loader_logging::LogDestination;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error("page_size must be at least 1")]
    InvalidPageSize,
}

/// Which demo screen to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Case {
    /// A single user record.
    User,
    /// An endless, paged list of posts.
    Posts,
}

/// One scripted user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Step {
    /// Pull-to-refresh, or the first appearance of the screen.
    Load,
    /// Several load requests before any result arrives.
    LoadBurst(u32),
    /// The list scrolled to its footer.
    LoadMore,
    /// Flip the backend failure switch.
    SetFailure(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub latency_ms: u64,
    pub page_size: usize,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Draw stub data while the first fetch is outstanding.
    pub placeholder: bool,
    pub cases: Vec<Case>,
    pub script: Vec<Step>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            page_size: 30,
            log_level: "info".to_string(),
            log_file: None,
            placeholder: true,
            cases: vec![Case::User, Case::Posts],
            script: vec![
                Step::Load,
                Step::LoadMore,
                Step::LoadBurst(3),
                Step::SetFailure(true),
                Step::LoadMore,
                Step::Load,
                Step::SetFailure(false),
                Step::LoadMore,
                Step::Load,
            ],
        }
    }
}

impl DemoConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            latency: Duration::from_millis(self.latency_ms),
            page_size: self.page_size,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(ConfigError::InvalidLogLevel(self.log_level));
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(self)
    }
}

/// Reads and validates a config file. Fields left out take their defaults.
pub fn load(path: &Path) -> Result<DemoConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DemoConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("demo.ron");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "(latency_ms: 5, cases: [Posts], script: [Load, LoadBurst(2), SetFailure(true), LoadMore])",
        );

        let config = load(&path).unwrap();

        assert_eq!(config.latency_ms, 5);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.cases, vec![Case::Posts]);
        assert_eq!(
            config.script,
            vec![
                Step::Load,
                Step::LoadBurst(2),
                Step::SetFailure(true),
                Step::LoadMore
            ]
        );
        assert_eq!(config.api_settings().latency, Duration::from_millis(5));
        assert_eq!(config.log_destination(), LogDestination::Terminal);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "(latency_ms: \"fast\")");
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn rejects_unknown_log_level_and_empty_pages() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "(log_level: \"chatty\")");
        assert!(matches!(
            load(&path),
            Err(ConfigError::InvalidLogLevel(level)) if level == "chatty"
        ));

        let path = write(&dir, "(page_size: 0)");
        assert!(matches!(load(&path), Err(ConfigError::InvalidPageSize)));
    }

    #[test]
    fn log_file_enables_both_destinations() {
        let config = DemoConfig {
            log_file: Some(PathBuf::from("demo.log")),
            log_level: "debug".to_string(),
            ..DemoConfig::default()
        };
        assert_eq!(
            config.log_destination(),
            LogDestination::Both(PathBuf::from("demo.log"))
        );
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }
}
