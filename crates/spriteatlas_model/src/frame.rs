use std::time::Duration;

use spriteatlas_collections::{Handle, NameMultiMap};
use spriteatlas_geometry::Rect;

use crate::{Result, Slice};

/// Slices of a single frame, grouped by name.
pub type SliceCollection = NameMultiMap<Slice>;

/// A single still image packed into the atlas.
///
/// Slices are owned by the frame and can only be added through its own API.
#[derive(Debug, Default)]
pub struct Frame {
    /// Location of this frame within the atlas pixel buffer.
    pub source_rectangle: Rect,
    pub duration: Duration,
    slices: SliceCollection,
}

impl Frame {
    pub fn new(source_rectangle: Rect) -> Self {
        Self::with_duration(source_rectangle, Duration::ZERO)
    }

    pub fn with_duration(source_rectangle: Rect, duration: Duration) -> Self {
        Self {
            source_rectangle,
            duration,
            slices: SliceCollection::default(),
        }
    }

    pub fn add_slice(&mut self, slice: Slice) -> Handle<Slice> {
        self.slices.add(slice)
    }

    pub fn add_slices<I: IntoIterator<Item = Slice>>(&mut self, slices: I) -> Vec<Handle<Slice>> {
        self.slices.add_all(slices)
    }

    pub fn remove_slice(&mut self, slice: Handle<Slice>) -> Option<Slice> {
        self.slices.remove(slice)
    }

    pub fn remove_slices_by_name(&mut self, name: &str) -> Vec<Slice> {
        self.slices.remove_by_name(name)
    }

    pub fn remove_slices<I: IntoIterator<Item = Handle<Slice>>>(
        &mut self,
        slices: I,
    ) -> Vec<Slice> {
        self.slices.remove_all(slices)
    }

    pub fn slices(&self) -> Vec<&Slice> {
        self.slices.list_all()
    }

    pub fn slices_by_name(&self, name: &str) -> Result<Vec<&Slice>> {
        Ok(self.slices.list_by_name(name)?)
    }

    pub fn first_slice_by_name(&self, name: &str) -> Result<Option<&Slice>> {
        Ok(self.slices.first_by_name(name)?)
    }

    pub fn slice(&self, slice: Handle<Slice>) -> Option<&Slice> {
        self.slices.get(slice)
    }

    pub fn slice_mut(&mut self, slice: Handle<Slice>) -> Option<&mut Slice> {
        self.slices.get_mut(slice)
    }

    /// Read-only view of the underlying collection, including handles.
    pub fn slice_collection(&self) -> &SliceCollection {
        &self.slices
    }
}

#[cfg(test)]
mod tests {
    use spriteatlas_geometry::Point;

    use super::*;
    use crate::AtlasError;

    fn hitbox(x: i32) -> Slice {
        Slice::new("hitbox", Rect::new(x, 0, 4, 4))
    }

    #[test]
    fn test_defaults() {
        let frame = Frame::new(Rect::new(0, 0, 16, 16));
        assert_eq!(frame.duration, Duration::ZERO);
        assert!(frame.slices().is_empty());
    }

    #[test]
    fn test_nine_patch_round_trip() {
        let mut frame = Frame::new(Rect::new(0, 0, 32, 32));
        frame.add_slice(
            Slice::new("panel", Rect::new(0, 0, 32, 32))
                .with_center_bounds(Rect::new(4, 4, 24, 24))
                .with_pivot(Point::new(16, 16)),
        );

        let slice = frame.first_slice_by_name("panel").unwrap().unwrap();
        assert_eq!(slice.bounds, Rect::new(0, 0, 32, 32));
        assert_eq!(slice.center_bounds, Some(Rect::new(4, 4, 24, 24)));
        assert_eq!(slice.pivot, Some(Point::new(16, 16)));
    }

    #[test]
    fn test_remove_by_identity() {
        let mut frame = Frame::default();
        let handles = frame.add_slices([hitbox(0), hitbox(0), hitbox(8)]);

        assert_eq!(frame.remove_slice(handles[0]), Some(hitbox(0)));
        assert_eq!(frame.slices_by_name("hitbox").unwrap(), vec![&hitbox(0), &hitbox(8)]);

        frame.remove_slices(handles);
        assert!(frame.slices().is_empty());
        assert!(frame.slice_collection().names().next().is_none());
    }

    #[test]
    fn test_no_aliasing_across_frames() {
        let mut first = Frame::default();
        let mut second = Frame::default();
        let handle = first.add_slice(hitbox(0));
        second.add_slice(hitbox(0));

        assert_eq!(second.remove_slice(handle), None);
        assert_eq!(second.slices().len(), 1);
        assert!(first.slice(handle).is_some());
    }

    #[test]
    fn test_empty_name_lookup() {
        let frame = Frame::default();
        assert!(matches!(
            frame.slices_by_name(""),
            Err(AtlasError::InvalidArgument(_))
        ));
        assert!(matches!(
            frame.first_slice_by_name(""),
            Err(AtlasError::InvalidArgument(_))
        ));
    }
}
