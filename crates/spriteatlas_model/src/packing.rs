use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use strum::{Display, EnumString};

/// How the packer lays out frames on the sheet.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SmartDefault,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PackingMethod {
    /// Frames are packed into a grid as close to a square as possible.
    #[default]
    SquarePacked,
    HorizontalStrip,
    VerticalStrip,
}

/// Packer configuration. The atlas model doesn't interpret these values,
/// they are carried along so consumers can tell how the sheet was laid out.
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackingOptions {
    pub packing_method: PackingMethod,
    #[default(true)]
    pub merge_duplicates: bool,
    #[default(true)]
    pub only_visible_layers: bool,
    /// Transparent pixels around the whole sheet.
    pub border_padding: u32,
    /// Transparent pixels around each frame, inside of its cell.
    pub inner_padding: u32,
    /// Transparent pixels between neighbouring frames.
    pub spacing: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PackingOptions::default();
        assert_eq!(options.packing_method, PackingMethod::SquarePacked);
        assert!(options.merge_duplicates);
        assert!(options.only_visible_layers);
        assert_eq!(options.spacing, 0);
    }

    #[test]
    fn test_partial_yaml() {
        let options: PackingOptions =
            serde_yaml::from_str("packingMethod: horizontalStrip\nspacing: 2\n").unwrap();

        assert_eq!(options.packing_method, PackingMethod::HorizontalStrip);
        assert_eq!(options.spacing, 2);
        assert!(options.merge_duplicates);
    }
}
