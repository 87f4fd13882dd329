use rgb::RGBA8;
use spriteatlas_collections::Named;
use spriteatlas_geometry::{Point, Rect};

/// Colour used to display slices that don't define their own.
pub const DEFAULT_SLICE_COLOR: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 255,
    a: 255,
};

/// A named region of interest within a single frame, such as a hitbox
/// or a 9-patch. Bounds are relative to the frame.
///
/// The name can't be changed after construction, since slices are
/// indexed by it inside of their frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    name: String,
    pub bounds: Rect,
    /// The stretchable center of a 9-patch, relative to the origin of `bounds`.
    /// Expected to lie within them, which is not validated.
    pub center_bounds: Option<Rect>,
    pub pivot: Option<Point>,
    pub color: RGBA8,
}

impl Slice {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            bounds,
            center_bounds: None,
            pivot: None,
            color: DEFAULT_SLICE_COLOR,
        }
    }

    pub fn with_center_bounds(mut self, center_bounds: impl Into<Option<Rect>>) -> Self {
        self.center_bounds = center_bounds.into();
        self
    }

    pub fn with_pivot(mut self, pivot: impl Into<Option<Point>>) -> Self {
        self.pivot = pivot.into();
        self
    }

    pub fn with_color(mut self, color: RGBA8) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_nine_patch(&self) -> bool {
        self.center_bounds.is_some()
    }
}

impl Named for Slice {
    fn name(&self) -> &str {
        &self.name
    }
}
