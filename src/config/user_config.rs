//! User-level configuration for vapt-chart
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/vapt-chart/config.toml

use crate::chart::{DEFAULT_SCALE, MAX_SCALE};
use crate::reporters::OutputFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_OUTPUT_DIR: &str = "VAPT_CHART_OUTPUT_DIR";
pub const ENV_SCALE: &str = "VAPT_CHART_SCALE";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory the chart PNG is written to (default: current directory)
    pub dir: Option<PathBuf>,

    /// Summary format printed to stdout (default: text)
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChartConfig {
    /// Pixel multiplier for the PNG (default: 2)
    pub scale: Option<u32>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/vapt-chart/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            let content = std::fs::read_to_string(&path)?;
            match toml::from_str::<UserConfig>(&content) {
                Ok(user_config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    config.merge(user_config);
                }
                Err(e) => {
                    tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vapt-chart").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.chart.scale.is_some() {
            self.chart.scale = other.chart.scale;
        }
    }

    /// Apply environment overrides. Unparseable values are ignored.
    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = get(ENV_OUTPUT_DIR).filter(|d| !d.is_empty()) {
            self.output.dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = get(ENV_SCALE) {
            match raw.trim().parse::<u32>() {
                Ok(scale) => self.chart.scale = Some(scale),
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_SCALE, raw),
            }
        }
    }

    /// Output directory for the chart
    pub fn output_dir(&self) -> PathBuf {
        self.output.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    /// Chart scale, clamped to the supported range
    pub fn chart_scale(&self) -> u32 {
        self.chart
            .scale
            .unwrap_or(DEFAULT_SCALE)
            .clamp(1, MAX_SCALE)
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, EXAMPLE_CONFIG)?;
        }

        Ok(config_path)
    }
}

const EXAMPLE_CONFIG: &str = r#"# vapt-chart User Configuration

[output]
# Directory the <VESSEL>_PI_CHART.png file is written to
# Override with VAPT_CHART_OUTPUT_DIR
# dir = "."

# Summary printed after generation: text, json, html, markdown
# format = "text"

[chart]
# Pixel multiplier, 1-8 (2 gives a 1520x600 image)
# Override with VAPT_CHART_SCALE
# scale = 2
"#;
