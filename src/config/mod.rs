//! Configuration module for vapt-chart
//!
//! User-level settings (output directory, summary format, chart scale)
//! loaded from `~/.config/vapt-chart/config.toml` with environment overrides.

mod user_config;

pub use user_config::{ChartConfig, OutputConfig, UserConfig, ENV_OUTPUT_DIR, ENV_SCALE};
