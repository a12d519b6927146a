use serde::{Deserialize, Serialize};

use crate::LightboxError;

/// Options recognised by a lightbox. Unknown keys are ignored and every
/// missing key falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightboxConfig {
    /// Queried once at construction to collect the trigger elements.
    pub selector: String,
    /// Prefix for every generated class name.
    pub class_name: String,
    /// Milliseconds between clearing the active flag and removing the overlay.
    pub close_delay: u32,
    /// Prefix for the per-element data attributes.
    pub attribute_prefix: String,
    /// Wrap around at the ends of the trigger list.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            selector: ".lightbox".to_string(),
            class_name: "lightbox".to_string(),
            close_delay: 500,
            attribute_prefix: "data-lightbox".to_string(),
            looping: true,
        }
    }
}

impl LightboxConfig {
    /// Parse an options object. `null` and an empty string give the defaults.
    pub fn from_json(raw: &str) -> Result<Self, LightboxError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    pub fn index_attribute(&self) -> String {
        format!("{}-index", self.attribute_prefix)
    }

    pub fn caption_attribute(&self) -> String {
        format!("{}-caption", self.attribute_prefix)
    }

    pub fn iframe_src_attribute(&self) -> String {
        format!("{}-iframesrc", self.attribute_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = LightboxConfig::from_json("{}").unwrap();
        assert_eq!(config, LightboxConfig::default());
        assert_eq!(config.close_delay, 500);
        assert!(config.looping);
    }

    #[test]
    fn null_uses_defaults() {
        assert_eq!(
            LightboxConfig::from_json("null").unwrap(),
            LightboxConfig::default()
        );
    }

    #[test]
    fn camel_case_options_and_unknown_keys() {
        let config = LightboxConfig::from_json(
            r#"{"selector":"a.gallery","className":"lb","closeDelay":250,
                "attributePrefix":"data-lb","loop":false,"theme":"dark"}"#,
        )
        .unwrap();
        assert_eq!(config.selector, "a.gallery");
        assert_eq!(config.class_name, "lb");
        assert_eq!(config.close_delay, 250);
        assert!(!config.looping);
        assert_eq!(config.index_attribute(), "data-lb-index");
        assert_eq!(config.caption_attribute(), "data-lb-caption");
        assert_eq!(config.iframe_src_attribute(), "data-lb-iframesrc");
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = LightboxConfig::from_json(r#"{"closeDelay":"slow"}"#).unwrap_err();
        assert!(matches!(err, LightboxError::InvalidConfig(_)));
    }
}
