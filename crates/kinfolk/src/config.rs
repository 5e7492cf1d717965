#![forbid(unsafe_code)]

//! Editor configuration.

use kinfolk_layout::{LayoutMetrics, MetricsError};
use kinfolk_scene::SceneStyle;
use serde::{Deserialize, Serialize};

/// Layout metrics plus scene styling for one editing session.
///
/// Every field is optional in JSON; missing values take the defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub metrics: LayoutMetrics,
    pub style: SceneStyle,
}

impl EditorConfig {
    #[must_use]
    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SceneStyle) -> Self {
        self.style = style;
        self
    }

    /// Parse a JSON configuration and validate its metrics.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(crate::Error::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MetricsError> {
        self.metrics.validate()
    }
}
