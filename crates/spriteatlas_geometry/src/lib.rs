use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixels, defined by its top-left corner and size.
///
/// The zero rectangle is the distinguished "empty" value, see [`Rect::EMPTY`].
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A point in pixels, used for slice pivots.
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// A rectangle with no area. Note that this is not the same as `self == Rect::EMPTY`,
    /// a zero-width rectangle at a non-zero position is also empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Whether `other` lies fully within this rectangle. Edges may touch.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn translate(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Rect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::default().is_empty());
        assert!(Rect::new(10, 10, 0, 5).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Rect::new(1, 2, 3, 4), Rect::from((1, 2, 3, 4)));
        assert_ne!(Rect::new(1, 2, 3, 4), Rect::new(1, 2, 4, 3));
        assert_eq!(Point::new(16, 16), Point::from((16, 16)));
    }

    #[test]
    fn test_contains() {
        let bounds = Rect::new(0, 0, 32, 32);

        assert!(bounds.contains_rect(&Rect::new(4, 4, 24, 24)));
        assert!(bounds.contains_rect(&bounds));
        assert!(!bounds.contains_rect(&Rect::new(4, 4, 30, 24)));

        assert!(bounds.contains_point(Point::new(0, 0)));
        assert!(!bounds.contains_point(Point::new(32, 0)));
    }

    #[test]
    fn test_edges() {
        let rect = Rect::new(2, 3, 10, 20);
        assert_eq!(rect.right(), 12);
        assert_eq!(rect.bottom(), 23);
        assert_eq!(rect.center(), Point::new(7, 13));
        assert_eq!(rect.translate(Point::new(-2, -3)).location(), Point::new(0, 0));
    }
}
