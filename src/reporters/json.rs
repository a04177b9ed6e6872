//! JSON reporter
//!
//! Outputs the vessel summary as pretty-printed JSON for piping to jq
//! or feeding other tools.

use crate::dashboard::Outcome;
use anyhow::Result;

/// Render summary as JSON
pub fn render(outcome: &Outcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
