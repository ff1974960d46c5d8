//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use keyhint_protocols::LabelStyle;

/// Upper bound on labels drawn per activation, whatever the configuration says.
pub const HARD_HINT_LIMIT: usize = 500;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hints: HintsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hint overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintsConfig {
    /// Maximum number of labels drawn; may only lower [`HARD_HINT_LIMIT`].
    #[serde(default = "default_max_hints")]
    pub max_hints: usize,

    /// Start every activation with open-to-new-tab already set.
    #[serde(default)]
    pub open_in_new_tab: bool,

    #[serde(default)]
    pub label_style: LabelStyle,
}

impl Default for HintsConfig {
    fn default() -> Self {
        Self {
            max_hints: default_max_hints(),
            open_in_new_tab: false,
            label_style: LabelStyle::default(),
        }
    }
}

impl HintsConfig {
    /// The limit actually enforced during discovery.
    pub fn effective_max_hints(&self) -> usize {
        self.max_hints.clamp(1, HARD_HINT_LIMIT)
    }
}

fn default_max_hints() -> usize {
    HARD_HINT_LIMIT
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for daily-rolling log files; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
