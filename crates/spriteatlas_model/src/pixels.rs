use rgb::{ComponentBytes, FromSlice, RGBA8};

use crate::{AtlasError, Result};

/// A packed, row-major RGBA image.
///
/// The length of the pixel data always equals `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<RGBA8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<RGBA8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AtlasError::malformed(format!(
                "pixel buffer of {width}x{height} requires {expected} pixels, got {}",
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a buffer from tightly packed RGBA bytes.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(AtlasError::malformed(format!(
                "RGBA byte buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }

        Self::new(width, height, bytes.as_rgba().to_vec())
    }

    /// A fully transparent buffer of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![RGBA8::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Applies `f` to every pixel, keeping the dimensions.
    pub fn map(self, f: impl FnMut(RGBA8) -> RGBA8) -> Self {
        Self {
            pixels: self.pixels.into_iter().map(f).collect(),
            ..self
        }
    }

    pub fn into_pixels(self) -> Vec<RGBA8> {
        self.pixels
    }
}
