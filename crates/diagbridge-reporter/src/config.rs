//! Bridge configuration (diagbridge.toml format).

use crate::error::ConfigError;
use crate::render::{ExplainOnce, ExplainPolicy, ExplainSetting, PlainRendering};
use diagbridge_common::Level;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// When long explanations are appended.
    #[serde(default)]
    pub explain: ExplainConfig,

    /// How problem text is rendered.
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Append explanations at all.
    #[serde(default)]
    pub enabled: bool,

    /// Explain each distinct message only once per run.
    #[serde(default)]
    pub once: bool,

    /// Levels whose diagnostics may be explained.
    #[serde(default = "all_levels")]
    pub levels: Vec<Level>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            once: false,
            levels: all_levels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Print the offending source line with a caret under the position.
    #[serde(default = "default_true")]
    pub show_source: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { show_source: true }
    }
}

fn all_levels() -> Vec<Level> {
    Level::ALL.to_vec()
}

fn default_true() -> bool {
    true
}

impl BridgeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The explain policy described by this configuration.
    pub fn explain_policy(&self) -> Box<dyn ExplainPolicy> {
        let setting = ExplainSetting {
            enabled: self.explain.enabled,
            levels: self.explain.levels.clone(),
        };
        if self.explain.once {
            Box::new(ExplainOnce::new(setting))
        } else {
            Box::new(setting)
        }
    }

    pub fn rendering(&self) -> PlainRendering {
        PlainRendering {
            show_source: self.render.show_source,
        }
    }
}
