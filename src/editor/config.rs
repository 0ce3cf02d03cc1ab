//! Editor settings.

use std::env;

use log::LevelFilter;

use crate::placement::decision::ViewMode;

pub const ENV_LOG_LEVEL: &str = "RACKPLAN_LOG_LEVEL";
pub const ENV_EXPORT_NAME: &str = "RACKPLAN_EXPORT_NAME";
pub const ENV_VIEW: &str = "RACKPLAN_VIEW";

pub const DEFAULT_EXPORT_NAME: &str = "rack-layout.json";

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub log_level: LevelFilter,
    /// File name used when exporting into a directory.
    pub export_file_name: String,
    pub initial_view: ViewMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            export_file_name: DEFAULT_EXPORT_NAME.to_string(),
            initial_view: ViewMode::Front,
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by `RACKPLAN_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("CONFIG_IGNORED key={} value={}", ENV_LOG_LEVEL, raw),
            }
        }

        if let Some(raw) = lookup(ENV_EXPORT_NAME) {
            let name = raw.trim();
            if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') {
                log::warn!("CONFIG_IGNORED key={} value={}", ENV_EXPORT_NAME, raw);
            } else {
                config.export_file_name = name.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_VIEW) {
            match ViewMode::parse(&raw) {
                Some(view) => config.initial_view = view,
                None => log::warn!("CONFIG_IGNORED key={} value={}", ENV_VIEW, raw),
            }
        }

        config
    }
}
