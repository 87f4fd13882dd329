use std::time::Duration;

use log::{debug, trace, warn};
use spriteatlas_geometry::{Point, Rect};
use spriteatlas_model::{Animation, Atlas, AtlasError, Frame, FrameKey, Result, Slice};

use crate::{
    convert_pixels, DecodedFrame, DecodedSheet, DecodedSlice, DecodedTag, ImportOptions,
    SourcePoint, SourceRect,
};

fn coordinate(value: u32, what: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        AtlasError::malformed(format!("{what} {value} does not fit into a coordinate"))
    })
}

impl SourceRect {
    fn to_rect(self) -> Result<Rect> {
        Ok(Rect::new(
            coordinate(self.x, "x")?,
            coordinate(self.y, "y")?,
            coordinate(self.w, "width")?,
            coordinate(self.h, "height")?,
        ))
    }
}

impl SourcePoint {
    fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl DecodedSlice {
    fn to_slice(&self, options: &ImportOptions) -> Result<Slice> {
        if self.name.is_empty() {
            return Err(AtlasError::malformed("slice without a name"));
        }

        let bounds = self.bounds.to_rect()?;
        let center_bounds = self.center.map(SourceRect::to_rect).transpose()?;

        if let Some(center) = center_bounds {
            let local = Rect::new(0, 0, bounds.width, bounds.height);
            if !local.contains_rect(&center) {
                warn!(
                    "Center {center:?} of slice '{}' lies outside of its bounds {bounds:?}",
                    self.name
                );
            }
        }

        Ok(Slice::new(self.name.clone(), bounds)
            .with_center_bounds(center_bounds)
            .with_pivot(self.pivot.map(SourcePoint::to_point))
            .with_color(self.color.unwrap_or(options.default_slice_color)))
    }
}

impl DecodedFrame {
    fn to_frame(&self, options: &ImportOptions) -> Result<Frame> {
        let mut frame = Frame::with_duration(
            self.source.to_rect()?,
            Duration::from_millis(self.duration_ms as u64),
        );

        for slice in &self.slices {
            frame.add_slice(slice.to_slice(options)?);
        }

        Ok(frame)
    }
}

impl DecodedTag {
    fn to_animation(&self, frames: &[FrameKey]) -> Result<Animation> {
        if self.name.is_empty() {
            return Err(AtlasError::malformed("animation tag without a name"));
        }

        if self.from > self.to || self.to >= frames.len() {
            return Err(AtlasError::malformed(format!(
                "animation '{}' spans frames {}..={}, but the sheet has {} frames",
                self.name,
                self.from,
                self.to,
                frames.len()
            )));
        }

        Ok(
            Animation::from_frames(self.name.clone(), frames[self.from..=self.to].to_vec())
                .with_direction(self.direction)
                .with_looping(self.is_looping),
        )
    }
}

/// Builds an [`Atlas`] out of a decoded sheet.
///
/// Frames keep their input order, slices keep their order within a frame,
/// and animation tags refer to frames by their position in the sheet.
/// Either the whole atlas is produced, or an error is returned.
pub fn translate(sheet: DecodedSheet, options: &ImportOptions) -> Result<Atlas> {
    let DecodedSheet {
        pixels,
        frames,
        tags,
        packing,
    } = sheet;

    let pixels = convert_pixels(pixels, options.premultiply_alpha)?;

    let frames = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| {
            trace!(
                "Frame {index}: {:?}, {}ms, {} slices",
                frame.source,
                frame.duration_ms,
                frame.slices.len()
            );
            frame.to_frame(options)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut atlas = Atlas::with_packing(pixels, packing);
    let keys = atlas.add_frames(frames)?;

    let animations = tags
        .iter()
        .map(|tag| tag.to_animation(&keys))
        .collect::<Result<Vec<_>>>()?;
    atlas.add_animations(animations)?;

    debug!(
        "Imported a {}x{} atlas with {} frames and {} animations (premultiplied: {})",
        atlas.width()?,
        atlas.height()?,
        keys.len(),
        tags.len(),
        options.premultiply_alpha
    );

    Ok(atlas)
}
