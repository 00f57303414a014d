//! JSON configuration for building a registry.
//!
//! ```json
//! {
//!   "defaults": { "placement": "end" },
//!   "events": {
//!     "greet": [
//!       { "placement": "start", "append_text": "Hello ", "pattern": ".+" }
//!     ]
//!   }
//! }
//! ```

use crate::error::{ModifierError, Result};
use crate::types::{Pattern, PatternFlags, Placement, RuleOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One rule as written in config. Omitted fields fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,

    #[serde(default, alias = "appendText", skip_serializing_if = "Option::is_none")]
    pub append_text: Option<String>,

    /// Regex source (Rust `regex` syntax).
    #[serde(default, alias = "regex", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Pattern flags. Each requires `pattern` in the same entry; flags are
    /// never inherited from `defaults`.
    #[serde(default)]
    pub ignore_case: bool,

    #[serde(default)]
    pub multi_line: bool,

    #[serde(default)]
    pub dot_matches_new_line: bool,
}

impl RuleConfig {
    fn flags(&self) -> PatternFlags {
        PatternFlags {
            case_insensitive: self.ignore_case,
            multi_line: self.multi_line,
            dot_matches_new_line: self.dot_matches_new_line,
        }
    }

    /// Compile into rule options. `event` is only used for error context.
    pub fn to_options(&self, event: &str) -> Result<RuleOptions> {
        let flags = self.flags();
        if self.pattern.is_none() && flags != PatternFlags::default() {
            return Err(ModifierError::Config(format!(
                "pattern flags without pattern for event {event}"
            )));
        }

        let mut options = RuleOptions {
            placement: self.placement,
            append_text: self.append_text.clone(),
            pattern: None,
        };

        if let Some(ref source) = self.pattern {
            let pattern = Pattern::with_flags(source, flags).map_err(|e| {
                ModifierError::InvalidPattern {
                    event: event.to_string(),
                    pattern: source.clone(),
                    source: e,
                }
            })?;
            options.pattern = Some(pattern);
        }

        Ok(options)
    }
}

/// Registry defaults plus rules to subscribe at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Merged under every subscription.
    #[serde(default)]
    pub defaults: RuleConfig,

    /// Event name → rules, in subscription order.
    #[serde(default)]
    pub events: IndexMap<String, Vec<RuleConfig>>,
}

impl RegistryConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
