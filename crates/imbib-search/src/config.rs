//! Search configuration.
//!
//! ```toml
//! limit = 50
//! empty_query = "match_all"
//! acronym_sensitive = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::matcher::MatchOptions;

/// What a query with no tokens returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQuery {
    /// Every record, in snapshot order, unranked
    #[default]
    MatchAll,
    /// Nothing
    MatchNone,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of ranked results (unlimited when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Behavior for empty or whitespace-only queries
    pub empty_query: EmptyQuery,
    /// Require exact case for uppercase runs ("AI", "RNA") in free words
    pub acronym_sensitive: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: None,
            empty_query: EmptyQuery::MatchAll,
            acronym_sensitive: true,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(SearchError::InvalidConfig(
                "limit must be positive (omit it for no limit)".to_string(),
            ));
        }
        Ok(())
    }

    /// Token-matching options derived from this configuration.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            acronym_sensitive: self.acronym_sensitive,
        }
    }
}
