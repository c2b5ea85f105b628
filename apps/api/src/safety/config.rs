//! Guard configuration: which PII classes to scan for and which terms to block.
//!
//! Loaded from TOML when `GUARD_CONFIG_PATH` is set, e.g.
//!
//! ```toml
//! pii_types = ["email_address", "phone_number", "us_ssn", "credit_card"]
//! card_pattern = "grouped16"
//! blocklist = ["offensive", "discriminatory", "inappropriate"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::safety::blocklist::DEFAULT_BLOCKLIST;
use crate::safety::pii::{CardPattern, PiiKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    #[serde(default = "default_pii_types")]
    pub pii_types: Vec<PiiKind>,
    #[serde(default)]
    pub card_pattern: CardPattern,
    #[serde(default = "default_blocklist")]
    pub blocklist: Vec<String>,
}

fn default_pii_types() -> Vec<PiiKind> {
    PiiKind::ALL.to_vec()
}

fn default_blocklist() -> Vec<String> {
    DEFAULT_BLOCKLIST.iter().map(|t| t.to_string()).collect()
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            pii_types: default_pii_types(),
            card_pattern: CardPattern::default(),
            blocklist: default_blocklist(),
        }
    }
}

impl GuardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Invalid guard config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read guard config '{}'", path.display()))?;
        Self::from_toml_str(&raw)
    }
}
