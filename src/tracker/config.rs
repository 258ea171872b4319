//! Which elements are tracked and which of them cycle through variants.

use std::collections::HashSet;

use super::items;
use crate::error::TrackerError;

/// An element id paired with its ordered image variants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ProgressiveItem {
    pub id: String,
    pub variants: Vec<String>,
}

/// Tracker setup. Missing JSON fields fall back to [`TrackerConfig::default`];
/// unknown ones are rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TrackerConfig {
    /// Class name marking trackable elements.
    pub item_class: String,
    pub progressive: Vec<ProgressiveItem>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            item_class: items::ITEM_CLASS.to_string(),
            progressive: items::PROGRESSIVE
                .iter()
                .map(|(id, variants)| ProgressiveItem {
                    id: id.to_string(),
                    variants: variants.iter().map(|v| v.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.item_class.trim().is_empty() {
            return Err(TrackerError::Config("item_class is empty".into()));
        }
        let mut seen = HashSet::new();
        for item in &self.progressive {
            if item.variants.is_empty() {
                return Err(TrackerError::Config(format!(
                    "progressive item '{}' has no variants",
                    item.id
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(TrackerError::Config(format!(
                    "progressive item '{}' listed twice",
                    item.id
                )));
            }
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TrackerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
