use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use spriteatlas_collections::{NameMultiMap, Named};
use strum::{Display, EnumString};

use crate::FrameKey;

/// Animation clips of an atlas, grouped by name.
pub type AnimationCollection = NameMultiMap<Animation>;

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
pub enum AnimationDirection {
    #[default]
    Forward,
    Reverse,
    PingPong,
    ReversePingPong,
}

/// A named, ordered sequence of frames of an atlas.
///
/// Frames are referenced by key, the atlas keeps owning them.
/// A clip without frames is valid, it just doesn't show anything.
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault)]
pub struct Animation {
    name: String,
    pub frames: Vec<FrameKey>,
    pub direction: AnimationDirection,
    #[default(true)]
    pub is_looping: bool,
}

impl Animation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_frames(name: impl Into<String>, frames: Vec<FrameKey>) -> Self {
        Self {
            frames,
            ..Self::new(name)
        }
    }

    pub fn with_direction(mut self, direction: AnimationDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_looping(mut self, is_looping: bool) -> Self {
        self.is_looping = is_looping;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames of a single playback cycle in the order they are shown.
    ///
    /// Ping-pong cycles don't repeat the turning frames, so `[a, b, c]`
    /// plays as `a b c b` and the next cycle starts from `a` again.
    pub fn playback_order(&self) -> Vec<FrameKey> {
        let forward = self.frames.iter().copied();
        let inner = || {
            self.frames
                .iter()
                .copied()
                .skip(1)
                .take(self.frames.len().saturating_sub(2))
        };

        match self.direction {
            AnimationDirection::Forward => forward.collect(),
            AnimationDirection::Reverse => forward.rev().collect(),
            AnimationDirection::PingPong => forward.chain(inner().rev()).collect(),
            AnimationDirection::ReversePingPong => forward.rev().chain(inner()).collect(),
        }
    }
}

impl Named for Animation {
    fn name(&self) -> &str {
        &self.name
    }
}
