//! Runner configuration from environment.

use std::env;

use anyhow::Result;
use deconflict_core::{EngineRules, SafetyBuffer, DEFAULT_SAFETY_BUFFER_M};

#[derive(Debug, Clone)]
pub struct Config {
    pub buffer_m: f64,
    pub parallel: bool,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            buffer_m: lookup("DECONFLICT_BUFFER_M")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SAFETY_BUFFER_M),
            parallel: lookup("DECONFLICT_PARALLEL")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(true),
            log_json: lookup("DECONFLICT_LOG_JSON")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(false),
        }
    }

    /// Engine rules, with `buffer_override` taking precedence over the environment.
    pub fn engine_rules(&self, buffer_override: Option<f64>) -> Result<EngineRules> {
        let safety_buffer = SafetyBuffer::new(buffer_override.unwrap_or(self.buffer_m))?;
        Ok(EngineRules {
            safety_buffer,
            parallel: self.parallel,
            ..EngineRules::default()
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
