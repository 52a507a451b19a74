// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Engine Configuration
//!
//! Settings arrive from the client, either as `initializationOptions` or
//! through `workspace/didChangeConfiguration`:
//!
//! ```json
//! {
//!   "queryselectorCompletion": {
//!     "attributePrefixes": ["data", "test"],
//!     "propertyIndent": 4,
//!     "quickFixCodes": [2339, 2551],
//!     "bracketTrigger": false
//!   }
//! }
//! ```
//!
//! Missing keys keep their defaults.

use serde_json::Value;

use crate::diagnostic::UnknownPropertyCode;

/// Settings section read from the client payload
pub const SETTINGS_SECTION: &str = "queryselectorCompletion";

/// Largest accepted `propertyIndent`
pub const MAX_PROPERTY_INDENT: u32 = 16;

/// Characters that always trigger completion
const BASE_TRIGGER_CHARACTERS: [&str; 4] = ["\"", "'", "#", "`"];

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attribute name prefixes offered as `[name="value"]` completions
    pub attribute_prefixes: Vec<String>,

    /// Columns past the `class` keyword for a field inserted into an empty class
    pub property_indent: u32,

    /// Diagnostic codes that get the "add private property" quick fix
    pub quick_fix_codes: Vec<UnknownPropertyCode>,

    /// Also trigger completion on `[`
    pub bracket_trigger: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            attribute_prefixes: queryselector_lsp_markup::DEFAULT_ATTRIBUTE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            property_indent: 4,
            quick_fix_codes: UnknownPropertyCode::ALL.to_vec(),
            bracket_trigger: false,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attribute_prefixes.is_empty() {
            return Err(ConfigError::NoAttributePrefixes);
        }

        if self.attribute_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyAttributePrefix);
        }

        if self.property_indent > MAX_PROPERTY_INDENT {
            return Err(ConfigError::IndentTooLarge {
                indent: self.property_indent,
                max: MAX_PROPERTY_INDENT,
            });
        }

        Ok(())
    }

    /// Completion trigger characters for the server capabilities
    pub fn trigger_characters(&self) -> Vec<String> {
        let mut chars: Vec<String> = BASE_TRIGGER_CHARACTERS
            .iter()
            .map(|c| c.to_string())
            .collect();
        if self.bracket_trigger {
            chars.push("[".to_string());
        }
        chars
    }

    /// Parse engine config from LSP client settings payload.
    ///
    /// Returns `Ok(None)` when the payload has no `queryselectorCompletion`
    /// section. A present but malformed key is an error.
    pub fn from_lsp_settings(settings: &Value) -> Result<Option<Self>, ConfigError> {
        let Some(section) = settings.get(SETTINGS_SECTION) else {
            return Ok(None);
        };

        let mut config = Self::default();

        if let Some(value) = section.get("attributePrefixes") {
            let list = value.as_array().ok_or_else(|| ConfigError::InvalidSetting {
                key: "attributePrefixes",
                reason: "expected an array of strings".to_string(),
            })?;
            config.attribute_prefixes = list
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| ConfigError::InvalidSetting {
                        key: "attributePrefixes",
                        reason: format!("expected a string, found {}", v),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(value) = section.get("propertyIndent") {
            config.property_indent = value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ConfigError::InvalidSetting {
                    key: "propertyIndent",
                    reason: format!("expected a non-negative integer, found {}", value),
                })?;
        }

        if let Some(value) = section.get("quickFixCodes") {
            let list = value.as_array().ok_or_else(|| ConfigError::InvalidSetting {
                key: "quickFixCodes",
                reason: "expected an array of diagnostic codes".to_string(),
            })?;
            let mut codes = Vec::new();
            for v in list {
                let code = v
                    .as_i64()
                    .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
                    .ok_or_else(|| ConfigError::InvalidSetting {
                        key: "quickFixCodes",
                        reason: format!("expected a number, found {}", v),
                    })?;
                let code = UnknownPropertyCode::from_code(code)
                    .ok_or(ConfigError::UnsupportedDiagnosticCode(code))?;
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
            config.quick_fix_codes = codes;
        }

        if let Some(value) = section.get("bracketTrigger") {
            config.bracket_trigger = value.as_bool().ok_or_else(|| ConfigError::InvalidSetting {
                key: "bracketTrigger",
                reason: format!("expected a boolean, found {}", value),
            })?;
        }

        config.validate()?;
        Ok(Some(config))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No attribute prefixes configured
    #[error("At least one attribute prefix is required")]
    NoAttributePrefixes,

    /// A blank attribute prefix would match every attribute
    #[error("Attribute prefixes must not be empty")]
    EmptyAttributePrefix,

    /// Indent beyond the allowed maximum
    #[error("Property indent {indent} exceeds the maximum of {max}")]
    IndentTooLarge { indent: u32, max: u32 },

    /// A quick-fix code outside the supported set
    #[error("Diagnostic code {0} is not an unknown-property code")]
    UnsupportedDiagnosticCode(i64),

    /// A setting with the wrong JSON shape
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.attribute_prefixes, vec!["data", "test"]);
        assert_eq!(config.property_indent, 4);
        assert_eq!(config.quick_fix_codes.len(), 2);
        assert!(!config.bracket_trigger);
        assert!(config.validate().is_ok());
        assert_eq!(config.trigger_characters(), vec!["\"", "'", "#", "`"]);
    }

    #[test]
    fn test_from_lsp_settings_full() {
        let settings = json!({
            "queryselectorCompletion": {
                "attributePrefixes": ["data-qa"],
                "propertyIndent": 2,
                "quickFixCodes": [2551, "2551"],
                "bracketTrigger": true
            }
        });
        let config = EngineConfig::from_lsp_settings(&settings).unwrap().unwrap();
        assert_eq!(config.attribute_prefixes, vec!["data-qa"]);
        assert_eq!(config.property_indent, 2);
        assert_eq!(
            config.quick_fix_codes,
            vec![UnknownPropertyCode::PropertyDoesNotExistDidYouMean]
        );
        assert!(config.trigger_characters().contains(&"[".to_string()));
    }

    #[test]
    fn test_from_lsp_settings_partial_keeps_defaults() {
        let settings = json!({ "queryselectorCompletion": { "propertyIndent": 8 } });
        let config = EngineConfig::from_lsp_settings(&settings).unwrap().unwrap();
        assert_eq!(config.property_indent, 8);
        assert_eq!(config.attribute_prefixes, vec!["data", "test"]);
    }

    #[test]
    fn test_from_lsp_settings_missing_section() {
        let settings = json!({ "somethingElse": {} });
        assert_eq!(EngineConfig::from_lsp_settings(&settings), Ok(None));
    }

    #[test]
    fn test_from_lsp_settings_rejects_invalid() {
        let empty = json!({ "queryselectorCompletion": { "attributePrefixes": [] } });
        assert_eq!(
            EngineConfig::from_lsp_settings(&empty),
            Err(ConfigError::NoAttributePrefixes)
        );

        let blank = json!({ "queryselectorCompletion": { "attributePrefixes": ["data", " "] } });
        assert_eq!(
            EngineConfig::from_lsp_settings(&blank),
            Err(ConfigError::EmptyAttributePrefix)
        );

        let indent = json!({ "queryselectorCompletion": { "propertyIndent": 40 } });
        assert!(matches!(
            EngineConfig::from_lsp_settings(&indent),
            Err(ConfigError::IndentTooLarge { indent: 40, .. })
        ));

        let code = json!({ "queryselectorCompletion": { "quickFixCodes": [2304] } });
        assert_eq!(
            EngineConfig::from_lsp_settings(&code),
            Err(ConfigError::UnsupportedDiagnosticCode(2304))
        );

        let shape = json!({ "queryselectorCompletion": { "bracketTrigger": "yes" } });
        assert!(matches!(
            EngineConfig::from_lsp_settings(&shape),
            Err(ConfigError::InvalidSetting { key: "bracketTrigger", .. })
        ));
    }
}
