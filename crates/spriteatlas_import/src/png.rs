use anyhow::Result;
use spriteatlas_model::PixelBuffer;

/// Decodes a packed sheet image into straight (non-premultiplied) RGBA pixels.
pub fn decode_png(png: &[u8]) -> Result<PixelBuffer> {
    let image = lodepng::decode32(png)?;
    let pixels = PixelBuffer::new(image.width as u32, image.height as u32, image.buffer)?;

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use rgb::RGBA8;

    use super::*;

    #[test]
    fn test_decode_png() {
        let source = [RGBA8::new(1, 2, 3, 4), RGBA8::new(200, 100, 50, 128)];
        let png = lodepng::encode32(&source[..], 2, 1).unwrap();

        let pixels = decode_png(&png).unwrap();
        assert_eq!(pixels.width(), 2);
        assert_eq!(pixels.height(), 1);
        assert_eq!(pixels.pixels(), &source);
    }

    #[test]
    fn test_garbage() {
        assert!(decode_png(b"not a png").is_err());
    }
}
