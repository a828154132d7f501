//! Site configuration
//!
//! Every field has a default matching the markup produced by [`crate::markup`],
//! so a page without an inline configuration block works unchanged. A page can
//! override any subset through
//! `<script id="doc_site_config" type="application/json">{...}</script>`.

use serde::{Deserialize, Serialize};

use crate::breaks::BreakStyle;
use crate::error::ConfigError;

/// Id of the optional inline configuration element.
pub const CONFIG_ELEMENT_ID: &str = "doc_site_config";

/// Upper bound on rendered search results.
pub const MAX_RESULTS: usize = 10;

/// Runtime configuration for the page enhancements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL of the search index, relative to the page.
    pub index_url: String,
    /// Maximum number of rendered search results, at most [`MAX_RESULTS`].
    pub max_results: usize,
    /// Viewport width (px) at and above which the desktop layout applies.
    pub breakpoint_px: u32,
    /// Where zero-width break opportunities are inserted in rendered names.
    pub break_style: BreakStyle,
    /// Number of entries scored between cooperative yields.
    pub yield_every: usize,
    /// `tracing` filter directive used by the browser subscriber.
    pub log_level: String,
    pub ids: ElementIds,
}

/// Ids of the elements the page markup must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub search: String,
    pub search_input: String,
    pub search_results: String,
    pub sidebar: String,
    pub header_button: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_url: "search.json".to_string(),
            max_results: MAX_RESULTS,
            breakpoint_px: 481,
            break_style: BreakStyle::PunctuationAndCase,
            yield_every: 256,
            log_level: "info".to_string(),
            ids: ElementIds::default(),
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            search: "search".to_string(),
            search_input: "search_input".to_string(),
            search_results: "search_results".to_string(),
            sidebar: "sidebar".to_string(),
            header_button: "header_button".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Zero { field: "max_results" });
        }
        if self.max_results > MAX_RESULTS {
            return Err(ConfigError::TooLarge {
                field: "max_results",
                max: MAX_RESULTS,
            });
        }
        if self.yield_every == 0 {
            return Err(ConfigError::Zero { field: "yield_every" });
        }
        if self.breakpoint_px == 0 {
            return Err(ConfigError::Zero { field: "breakpoint_px" });
        }
        Ok(())
    }

    /// The CSS media query that selects the desktop layout.
    pub fn desktop_media_query(&self) -> String {
        format!("(min-width: {}px)", self.breakpoint_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_contract() {
        let config = SiteConfig::default();
        assert_eq!(config.index_url, "search.json");
        assert_eq!(config.max_results, 10);
        assert_eq!(config.desktop_media_query(), "(min-width: 481px)");
        assert_eq!(config.ids.search_results, "search_results");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            SiteConfig::from_json(r#"{"index_url":"api/search.json","ids":{"sidebar":"nav"}}"#)
                .unwrap();
        assert_eq!(config.index_url, "api/search.json");
        assert_eq!(config.ids.sidebar, "nav");
        assert_eq!(config.ids.search, "search");
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn break_style_uses_snake_case() {
        let config = SiteConfig::from_json(r#"{"break_style":"punctuation"}"#).unwrap();
        assert_eq!(config.break_style, BreakStyle::Punctuation);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = SiteConfig::from_json(r#"{"max_results":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Zero { field: "max_results" }));
        assert!(SiteConfig::from_json(r#"{"yield_every":0}"#).is_err());
    }

    #[test]
    fn result_limit_is_capped() {
        let err = SiteConfig::from_json(r#"{"max_results":50}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooLarge {
                field: "max_results",
                max: MAX_RESULTS
            }
        ));
        let config = SiteConfig::from_json(r#"{"max_results":5}"#).unwrap();
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SiteConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
