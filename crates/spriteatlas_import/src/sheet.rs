use rgb::RGBA8;
use serde::Deserialize;
use spriteatlas_model::{AnimationDirection, PackingOptions, PixelBuffer};

/// A rectangle as reported by the decoder.
#[derive(Default, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Default, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourcePoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSlice {
    pub name: String,
    pub bounds: SourceRect,
    /// 9-patch center, relative to the slice bounds.
    #[serde(default)]
    pub center: Option<SourceRect>,
    #[serde(default)]
    pub pivot: Option<SourcePoint>,
    #[serde(default)]
    pub color: Option<RGBA8>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecodedFrame {
    pub source: SourceRect,
    #[serde(default)]
    pub duration_ms: u32,
    #[serde(default)]
    pub slices: Vec<DecodedSlice>,
}

/// An animation tag spanning the frames `from..=to`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTag {
    pub name: String,
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub direction: AnimationDirection,
    #[serde(default = "looping")]
    pub is_looping: bool,
}

fn looping() -> bool {
    true
}

/// Everything the decoder and the packer hand over for a single sheet.
#[derive(Debug, Clone)]
pub struct DecodedSheet {
    pub pixels: PixelBuffer,
    pub frames: Vec<DecodedFrame>,
    pub tags: Vec<DecodedTag>,
    pub packing: PackingOptions,
}

impl DecodedSheet {
    pub fn new(pixels: PixelBuffer) -> Self {
        Self {
            pixels,
            frames: Vec::new(),
            tags: Vec::new(),
            packing: PackingOptions::default(),
        }
    }
}

impl SourceRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

impl SourcePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let frame: DecodedFrame =
            serde_json::from_str(r#"{ "source": { "x": 0, "y": 0, "w": 8, "h": 8 } }"#).unwrap();
        assert_eq!(frame.duration_ms, 0);
        assert!(frame.slices.is_empty());

        let tag: DecodedTag = serde_yaml::from_str("name: idle\nfrom: 0\nto: 1\n").unwrap();
        assert_eq!(tag.direction, AnimationDirection::Forward);
        assert!(tag.is_looping);
    }
}
