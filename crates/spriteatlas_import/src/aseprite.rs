//! Aseprite's JSON sheet export (`aseprite -b --sheet out.png --data out.json`).
//!
//! Both the `json-array` and `json-hash` frame layouts are understood.
//! Hash frames keep the order they have in the document.

use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use rgb::RGBA8;
use serde::Deserialize;
use spriteatlas_model::{AnimationDirection, PackingOptions, PixelBuffer};

use crate::{DecodedFrame, DecodedSheet, DecodedSlice, DecodedTag, SourcePoint, SourceRect};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SheetDocument {
    pub frames: Frames,
    pub meta: Meta,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Frames {
    Array(Vec<Sprite>),
    Hash(IndexMap<String, Sprite>),
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Sprite {
    #[serde(default)]
    pub filename: Option<String>,
    pub frame: SourceRect,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub trimmed: bool,
    #[serde(default)]
    pub sprite_source_size: Option<SourceRect>,
    #[serde(default)]
    pub source_size: Option<Size>,
    pub duration: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
    Pingpong,
    PingpongReverse,
}

/// Aseprite writes the repeat count as a string, older versions omit it.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Repeat {
    Count(u32),
    Text(String),
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FrameTag {
    pub name: String,
    pub from: usize,
    pub to: usize,
    #[serde(default = "forward")]
    pub direction: Direction,
    #[serde(default)]
    pub repeat: Option<Repeat>,
}

fn forward() -> Direction {
    Direction::Forward
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SliceKey {
    pub frame: usize,
    pub bounds: SourceRect,
    #[serde(default)]
    pub center: Option<SourceRect>,
    #[serde(default)]
    pub pivot: Option<SourcePoint>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SliceData {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub keys: Vec<SliceKey>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub image: Option<String>,
    pub size: Size,
    #[serde(default)]
    pub frame_tags: Vec<FrameTag>,
    #[serde(default)]
    pub slices: Vec<SliceData>,
}

impl From<Direction> for AnimationDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => AnimationDirection::Forward,
            Direction::Reverse => AnimationDirection::Reverse,
            Direction::Pingpong => AnimationDirection::PingPong,
            Direction::PingpongReverse => AnimationDirection::ReversePingPong,
        }
    }
}

impl Repeat {
    fn count(&self) -> Result<u32> {
        match self {
            Repeat::Count(count) => Ok(*count),
            Repeat::Text(text) => text
                .trim()
                .parse()
                .with_context(|| format!("invalid repeat count '{text}'")),
        }
    }
}

impl FrameTag {
    /// A tag without a repeat count, or with a zero one, loops forever.
    fn is_looping(&self) -> Result<bool> {
        Ok(match &self.repeat {
            Some(repeat) => repeat.count()? == 0,
            None => true,
        })
    }

    fn to_decoded(&self) -> Result<DecodedTag> {
        Ok(DecodedTag {
            name: self.name.clone(),
            from: self.from,
            to: self.to,
            direction: self.direction.into(),
            is_looping: self.is_looping()?,
        })
    }
}

/// Parses `#rrggbbaa` or `#rrggbb`.
pub fn parse_color(color: &str) -> Result<RGBA8> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("color '{color}' does not start with '#'"))?;

    let channel = |i: usize| -> Result<u8> {
        let digits = hex
            .get(i * 2..i * 2 + 2)
            .ok_or_else(|| anyhow!("color '{color}' is too short"))?;
        u8::from_str_radix(digits, 16).with_context(|| format!("invalid color '{color}'"))
    };

    match hex.len() {
        6 => Ok(RGBA8::new(channel(0)?, channel(1)?, channel(2)?, 255)),
        8 => Ok(RGBA8::new(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
        _ => bail!("color '{color}' must have 6 or 8 hex digits"),
    }
}

impl SliceData {
    /// The key active on `frame`: the last one starting at or before it.
    fn key_for(&self, frame: usize) -> Option<&SliceKey> {
        self.keys.iter().filter(|k| k.frame <= frame).max_by_key(|k| k.frame)
    }
}

impl Frames {
    pub fn len(&self) -> usize {
        match self {
            Frames::Array(frames) => frames.len(),
            Frames::Hash(frames) => frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &Sprite> + '_> {
        match self {
            Frames::Array(frames) => Box::new(frames.iter()),
            Frames::Hash(frames) => Box::new(frames.values()),
        }
    }
}

impl SheetDocument {
    pub fn decode(json: &str) -> Result<SheetDocument> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_decoded_sheet(
        &self,
        pixels: PixelBuffer,
        packing: PackingOptions,
    ) -> Result<DecodedSheet> {
        let size = self.meta.size;
        if size.w != pixels.width() || size.h != pixels.height() {
            bail!(
                "sheet is {}x{}, but the image is {}x{}",
                size.w,
                size.h,
                pixels.width(),
                pixels.height()
            );
        }

        let colors = self
            .meta
            .slices
            .iter()
            .map(|s| s.color.as_deref().map(parse_color).transpose())
            .collect::<Result<Vec<_>>>()?;

        let frames = self
            .frames
            .iter()
            .enumerate()
            .map(|(index, sprite)| DecodedFrame {
                source: sprite.frame,
                duration_ms: sprite.duration,
                slices: self
                    .meta
                    .slices
                    .iter()
                    .zip(&colors)
                    .filter_map(|(slice, color)| {
                        slice.key_for(index).map(|key| DecodedSlice {
                            name: slice.name.clone(),
                            bounds: key.bounds,
                            center: key.center,
                            pivot: key.pivot,
                            color: *color,
                        })
                    })
                    .collect(),
            })
            .collect();

        let tags = self
            .meta
            .frame_tags
            .iter()
            .map(FrameTag::to_decoded)
            .collect::<Result<Vec<_>>>()?;

        Ok(DecodedSheet {
            pixels,
            frames,
            tags,
            packing,
        })
    }
}
