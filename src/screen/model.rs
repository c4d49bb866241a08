use serde::{Deserialize, Serialize};

/// Pixel dimensions of a window, drawable surface, frame or content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in drawable pixels. Right and bottom edges are
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn contains_x(self, x: i32) -> bool {
        x >= self.x && x < self.right()
    }
}

/// A decoded frame as handed over by the decoder. All frames of a stream
/// share one pixel format, so only the size and the raw planes travel here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub size: Size,
    pub pixels: Vec<u8>,
}

impl VideoFrame {
    pub fn new(size: Size, pixels: Vec<u8>) -> Self {
        Self { size, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_uses_exclusive_far_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert!(rect.contains(Point::new(10, 20)));
        assert!(rect.contains(Point::new(39, 59)));
        assert!(!rect.contains(Point::new(40, 30)));
        assert!(!rect.contains(Point::new(15, 60)));
        assert!(rect.contains_x(39));
        assert!(!rect.contains_x(9));
    }

    #[test]
    fn size_swap_and_emptiness() {
        assert_eq!(Size::new(1920, 1080).swapped(), Size::new(1080, 1920));
        assert!(Size::new(0, 10).is_empty());
        assert!(!Size::new(1, 1).is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }
}
