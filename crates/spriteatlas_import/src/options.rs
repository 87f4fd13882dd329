use anyhow::Result;
use rgb::RGBA8;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use spriteatlas_model::DEFAULT_SLICE_COLOR;

/// Options recognized by [`crate::translate`].
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    /// Scale colour channels by `alpha / 255` before storing the pixels.
    pub premultiply_alpha: bool,
    /// Colour given to slices that don't carry one.
    #[default(DEFAULT_SLICE_COLOR)]
    pub default_slice_color: RGBA8,
}

impl ImportOptions {
    pub fn from_yaml(yaml: &str) -> Result<ImportOptions> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<ImportOptions> {
        Ok(serde_json::from_str(json)?)
    }
}
