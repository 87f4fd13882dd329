//! Runtime model of a packed sprite atlas: frames with their slices,
//! animation clips referencing those frames, and the packed pixels.

mod animation;
mod atlas;
mod error;
mod frame;
mod packing;
mod pixels;
mod slice;

pub use animation::{Animation, AnimationCollection, AnimationDirection};
pub use atlas::{Atlas, FrameKey};
pub use error::{AtlasError, Result};
pub use frame::{Frame, SliceCollection};
pub use packing::{PackingMethod, PackingOptions};
pub use pixels::PixelBuffer;
pub use slice::{Slice, DEFAULT_SLICE_COLOR};

pub use rgb::RGBA8;
pub use spriteatlas_collections::Handle;
pub use spriteatlas_geometry::{Point, Rect};
