use rayon::prelude::*;
use rgb::RGBA8;
use spriteatlas_model::{PixelBuffer, Result};

/// Scales colour channels by `alpha / 255`, rounding down.
///
/// `{200, 100, 50, 128}` becomes `{100, 50, 25, 128}`.
#[inline]
pub fn premultiply(pixel: RGBA8) -> RGBA8 {
    let scale = |c: u8| (c as u16 * pixel.a as u16 / 255) as u8;
    RGBA8::new(scale(pixel.r), scale(pixel.g), scale(pixel.b), pixel.a)
}

/// Converts the whole buffer at once. Pixels are independent, so
/// premultiplication runs in parallel; without it the buffer is returned as is.
pub fn convert_pixels(source: PixelBuffer, premultiply_alpha: bool) -> Result<PixelBuffer> {
    if !premultiply_alpha {
        return Ok(source);
    }

    let pixels = source
        .pixels()
        .par_iter()
        .map(|&p| premultiply(p))
        .collect::<Vec<_>>();

    PixelBuffer::new(source.width(), source.height(), pixels)
}
