use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use log::debug;
use spriteatlas_collections::Handle;

use crate::{
    Animation, AnimationCollection, AtlasError, Frame, PackingOptions, PixelBuffer, Result,
};

/// A stable reference to a frame of an [`Atlas`].
///
/// Keys are unique for the whole process. A key of a removed frame stays
/// invalid, and a key of one atlas never resolves in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameKey(u64);

static NEXT_FRAME_KEY: AtomicU64 = AtomicU64::new(1);

impl FrameKey {
    fn next() -> Self {
        Self(NEXT_FRAME_KEY.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug)]
struct AtlasData {
    pixels: PixelBuffer,
    packing: PackingOptions,
    frames: IndexMap<FrameKey, Frame>,
    animations: AnimationCollection,
}

/// A packed sprite sheet together with its frames and animation clips.
///
/// The atlas exclusively owns its pixel buffer. [`Atlas::release`] frees it
/// together with all of the metadata, and any further access fails
/// with [`AtlasError::UseAfterRelease`]. Dropping the atlas releases it too.
///
/// The atlas does no internal locking. Callers must not mutate the same
/// atlas from several threads at once.
#[derive(Debug)]
pub struct Atlas {
    data: Option<AtlasData>,
}

impl Atlas {
    pub fn new(pixels: PixelBuffer) -> Self {
        Self::with_packing(pixels, PackingOptions::default())
    }

    pub fn with_packing(pixels: PixelBuffer, packing: PackingOptions) -> Self {
        Self {
            data: Some(AtlasData {
                pixels,
                packing,
                frames: IndexMap::new(),
                animations: AnimationCollection::default(),
            }),
        }
    }

    pub fn with_frames<I: IntoIterator<Item = Frame>>(pixels: PixelBuffer, frames: I) -> Self {
        let mut atlas = Self::new(pixels);
        if let Some(data) = atlas.data.as_mut() {
            for frame in frames {
                data.push_frame(frame);
            }
        }
        atlas
    }

    fn data(&self) -> Result<&AtlasData> {
        self.data.as_ref().ok_or(AtlasError::UseAfterRelease)
    }

    fn data_mut(&mut self) -> Result<&mut AtlasData> {
        self.data.as_mut().ok_or(AtlasError::UseAfterRelease)
    }

    /// Frees the pixel buffer and the metadata. Calling it again does nothing.
    pub fn release(&mut self) {
        if let Some(data) = self.data.take() {
            debug!(
                "Releasing atlas {}x{} with {} frames",
                data.pixels.width(),
                data.pixels.height(),
                data.frames.len()
            );
        }
    }

    pub fn is_released(&self) -> bool {
        self.data.is_none()
    }

    pub fn width(&self) -> Result<u32> {
        Ok(self.data()?.pixels.width())
    }

    pub fn height(&self) -> Result<u32> {
        Ok(self.data()?.pixels.height())
    }

    pub fn pixels(&self) -> Result<&PixelBuffer> {
        Ok(&self.data()?.pixels)
    }

    /// Packing configuration the sheet was produced with.
    pub fn packing(&self) -> Result<&PackingOptions> {
        Ok(&self.data()?.packing)
    }

    // Frames

    /// Appends a frame to the end of the frame sequence.
    pub fn add_frame(&mut self, frame: Frame) -> Result<FrameKey> {
        Ok(self.data_mut()?.push_frame(frame))
    }

    pub fn add_frames<I: IntoIterator<Item = Frame>>(
        &mut self,
        frames: I,
    ) -> Result<Vec<FrameKey>> {
        let data = self.data_mut()?;
        Ok(frames.into_iter().map(|f| data.push_frame(f)).collect())
    }

    /// Removes a frame and drops every reference to it from the animation clips.
    pub fn remove_frame(&mut self, key: FrameKey) -> Result<Option<Frame>> {
        let data = self.data_mut()?;
        let frame = data.frames.shift_remove(&key);

        if frame.is_some() {
            for (_, animation) in data.animations.iter_mut() {
                animation.frames.retain(|k| *k != key);
            }
        }

        Ok(frame)
    }

    pub fn frame(&self, key: FrameKey) -> Result<Option<&Frame>> {
        Ok(self.data()?.frames.get(&key))
    }

    pub fn frame_mut(&mut self, key: FrameKey) -> Result<Option<&mut Frame>> {
        Ok(self.data_mut()?.frames.get_mut(&key))
    }

    /// The frame at `index` in the frame sequence.
    pub fn frame_at(&self, index: usize) -> Result<Option<(FrameKey, &Frame)>> {
        Ok(self
            .data()?
            .frames
            .get_index(index)
            .map(|(key, frame)| (*key, frame)))
    }

    pub fn frame_index(&self, key: FrameKey) -> Result<Option<usize>> {
        Ok(self.data()?.frames.get_index_of(&key))
    }

    pub fn frame_count(&self) -> Result<usize> {
        Ok(self.data()?.frames.len())
    }

    /// Frames in their canonical order.
    pub fn frames(&self) -> Result<Vec<&Frame>> {
        Ok(self.data()?.frames.values().collect())
    }

    pub fn frame_keys(&self) -> Result<Vec<FrameKey>> {
        Ok(self.data()?.frames.keys().copied().collect())
    }

    /// Resolves the frames of a clip in clip order.
    pub fn animation_frames(&self, animation: &Animation) -> Result<Vec<&Frame>> {
        let data = self.data()?;
        animation
            .frames
            .iter()
            .map(|key| {
                data.frames.get(key).ok_or_else(|| {
                    AtlasError::malformed(format!(
                        "animation '{}' references {key:?} which is not in the atlas",
                        animation.name()
                    ))
                })
            })
            .collect()
    }

    // Animations

    /// Adds a clip. Every frame it references must belong to this atlas.
    pub fn add_animation(&mut self, animation: Animation) -> Result<Handle<Animation>> {
        let data = self.data_mut()?;
        data.check_frames(&animation)?;
        Ok(data.animations.add(animation))
    }

    /// Adds clips in order. Nothing is added if any of them references
    /// a frame outside of this atlas.
    pub fn add_animations<I: IntoIterator<Item = Animation>>(
        &mut self,
        animations: I,
    ) -> Result<Vec<Handle<Animation>>> {
        let data = self.data_mut()?;
        let animations: Vec<Animation> = animations.into_iter().collect();
        for animation in &animations {
            data.check_frames(animation)?;
        }
        Ok(data.animations.add_all(animations))
    }

    pub fn remove_animation(&mut self, animation: Handle<Animation>) -> Result<Option<Animation>> {
        Ok(self.data_mut()?.animations.remove(animation))
    }

    pub fn remove_animations<I: IntoIterator<Item = Handle<Animation>>>(
        &mut self,
        animations: I,
    ) -> Result<Vec<Animation>> {
        Ok(self.data_mut()?.animations.remove_all(animations))
    }

    pub fn remove_animations_by_name(&mut self, name: &str) -> Result<Vec<Animation>> {
        Ok(self.data_mut()?.animations.remove_by_name(name))
    }

    pub fn list_animations(&self) -> Result<Vec<&Animation>> {
        Ok(self.data()?.animations.list_all())
    }

    pub fn animations_by_name(&self, name: &str) -> Result<Vec<&Animation>> {
        Ok(self.data()?.animations.list_by_name(name)?)
    }

    pub fn first_animation_by_name(&self, name: &str) -> Result<Option<&Animation>> {
        Ok(self.data()?.animations.first_by_name(name)?)
    }

    pub fn animation(&self, animation: Handle<Animation>) -> Result<Option<&Animation>> {
        Ok(self.data()?.animations.get(animation))
    }

    pub fn animation_mut(
        &mut self,
        animation: Handle<Animation>,
    ) -> Result<Option<&mut Animation>> {
        Ok(self.data_mut()?.animations.get_mut(animation))
    }

    pub fn animation_collection(&self) -> Result<&AnimationCollection> {
        Ok(&self.data()?.animations)
    }
}

impl AtlasData {
    fn push_frame(&mut self, frame: Frame) -> FrameKey {
        let key = FrameKey::next();
        self.frames.insert(key, frame);
        key
    }

    /// Clips may only reference frames of this atlas.
    fn check_frames(&self, animation: &Animation) -> Result<()> {
        match animation.frames.iter().find(|k| !self.frames.contains_key(*k)) {
            Some(key) => Err(AtlasError::malformed(format!(
                "animation '{}' references {key:?} which is not in the atlas",
                animation.name()
            ))),
            None => Ok(()),
        }
    }
}

impl Drop for Atlas {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use spriteatlas_geometry::Rect;

    use super::*;
    use crate::AnimationDirection;

    fn atlas_with_frames(n: i32) -> Atlas {
        Atlas::with_frames(
            PixelBuffer::transparent(64, 16),
            (0..n).map(|i| {
                Frame::with_duration(Rect::new(i * 16, 0, 16, 16), Duration::from_millis(100))
            }),
        )
    }

    #[test]
    fn test_frame_order_is_preserved() {
        let atlas = atlas_with_frames(3);
        let xs: Vec<i32> = atlas
            .frames()
            .unwrap()
            .iter()
            .map(|f| f.source_rectangle.x)
            .collect();

        assert_eq!(xs, vec![0, 16, 32]);
        assert_eq!(atlas.frame_count().unwrap(), 3);
        assert_eq!(atlas.width().unwrap(), 64);
        assert_eq!(atlas.height().unwrap(), 16);
    }

    #[test]
    fn test_frame_shared_between_clips() {
        let mut atlas = atlas_with_frames(3);
        let keys = atlas.frame_keys().unwrap();

        atlas
            .add_animation(Animation::from_frames("walk", keys.clone()))
            .unwrap();
        atlas
            .add_animation(
                Animation::from_frames("walk", vec![keys[2], keys[0]])
                    .with_direction(AnimationDirection::Reverse),
            )
            .unwrap();

        let walks = atlas.animations_by_name("walk").unwrap();
        assert_eq!(walks.len(), 2);

        let frames = atlas.animation_frames(walks[1]).unwrap();
        assert_eq!(frames[0].source_rectangle.x, 32);
        assert_eq!(frames[1].source_rectangle.x, 0);
    }

    #[test]
    fn test_remove_frame_updates_clips() {
        let mut atlas = atlas_with_frames(3);
        let keys = atlas.frame_keys().unwrap();
        let handle = atlas
            .add_animation(Animation::from_frames("run", keys.clone()))
            .unwrap();

        let removed = atlas.remove_frame(keys[1]).unwrap();
        assert!(removed.is_some());
        assert_eq!(atlas.remove_frame(keys[1]).unwrap().map(|_| ()), None);

        let run = atlas.animation(handle).unwrap().unwrap();
        assert_eq!(run.frames, vec![keys[0], keys[2]]);
        assert_eq!(atlas.frame_index(keys[2]).unwrap(), Some(1));

        let key = atlas.add_frame(Frame::default()).unwrap();
        assert!(!keys.contains(&key));
    }

    #[test]
    fn test_dangling_key_is_malformed() {
        let mut atlas = atlas_with_frames(1);
        let key = atlas.frame_keys().unwrap()[0];
        atlas.remove_frame(key).unwrap();

        let detached = Animation::from_frames("ghost", vec![key]);
        assert!(matches!(
            atlas.animation_frames(&detached),
            Err(AtlasError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_clip_from_another_atlas_is_rejected() {
        let first = atlas_with_frames(3);
        let mut second = atlas_with_frames(3);
        let foreign = first.frame_keys().unwrap();

        assert!(second
            .frame_keys()
            .unwrap()
            .iter()
            .all(|k| !foreign.contains(k)));

        assert!(matches!(
            second.add_animation(Animation::from_frames("walk", foreign.clone())),
            Err(AtlasError::MalformedInput(_))
        ));

        let own = Animation::from_frames("idle", second.frame_keys().unwrap());
        let mixed = Animation::from_frames("walk", vec![foreign[0]]);
        assert!(matches!(
            second.add_animations([own, mixed]),
            Err(AtlasError::MalformedInput(_))
        ));
        assert!(second.list_animations().unwrap().is_empty());
    }

    #[test]
    fn test_animation_crud() {
        let mut atlas = atlas_with_frames(0);
        let handles = atlas
            .add_animations([Animation::new("a"), Animation::new("b"), Animation::new("a")])
            .unwrap();

        assert_eq!(atlas.list_animations().unwrap().len(), 3);
        assert_eq!(
            atlas.first_animation_by_name("b").unwrap().map(Animation::name),
            Some("b")
        );

        atlas.remove_animation(handles[0]).unwrap();
        assert_eq!(atlas.animations_by_name("a").unwrap().len(), 1);

        assert_eq!(atlas.remove_animations_by_name("a").unwrap().len(), 1);
        assert!(atlas.animations_by_name("a").unwrap().is_empty());
        assert!(atlas.remove_animations_by_name("a").unwrap().is_empty());

        assert_eq!(
            atlas.animations_by_name(""),
            Err(AtlasError::InvalidArgument(spriteatlas_collections::EmptyName))
        );
        assert!(atlas.first_animation_by_name("").is_err());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut atlas = atlas_with_frames(2);
        atlas.release();
        atlas.release();

        assert!(atlas.is_released());
        assert_eq!(atlas.width(), Err(AtlasError::UseAfterRelease));
        assert_eq!(atlas.pixels().map(|_| ()), Err(AtlasError::UseAfterRelease));
        assert_eq!(atlas.frame_count(), Err(AtlasError::UseAfterRelease));
        assert_eq!(atlas.list_animations(), Err(AtlasError::UseAfterRelease));
        assert_eq!(
            atlas.add_animation(Animation::new("late")).map(|_| ()),
            Err(AtlasError::UseAfterRelease)
        );
        assert_eq!(
            atlas.add_frame(Frame::default()).map(|_| ()),
            Err(AtlasError::UseAfterRelease)
        );
    }
}
