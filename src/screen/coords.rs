use crate::screen::model::{Point, Rect, Size};
use crate::screen::orientation::Orientation;

/// A point in device-frame space together with the frame size it is
/// expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub point: Point,
    pub screen_size: Size,
}

/// Snapshot of everything needed to map pointer coordinates into the device
/// frame. Built fresh for each event: the HiDPI ratio changes when the window
/// moves between displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    pub window_size: Size,
    pub drawable_size: Size,
    pub content_rect: Rect,
    pub content_size: Size,
    pub orientation: Orientation,
}

impl CoordinateMapper {
    /// Window pixels to drawable pixels (HiDPI scaling per axis).
    pub fn window_to_drawable(&self, point: Point) -> Point {
        hidpi_scale(point, self.window_size, self.drawable_size)
    }

    /// Drawable pixels to device-frame pixels.
    ///
    /// Panics if the content rect has a zero dimension, which means a pointer
    /// event was mapped before any frame was presented.
    pub fn drawable_to_frame(&self, point: Point) -> Point {
        let rect = self.content_rect;
        assert!(
            rect.w != 0 && rect.h != 0,
            "content rect must be initialized before mapping coordinates"
        );
        let w = i64::from(self.content_size.width);
        let h = i64::from(self.content_size.height);
        let x = (i64::from(point.x) - i64::from(rect.x)) * w / i64::from(rect.w);
        let y = (i64::from(point.y) - i64::from(rect.y)) * h / i64::from(rect.h);
        self.orientation
            .transform(Point::new(x as i32, y as i32), self.content_size)
    }

    pub fn window_to_frame(&self, point: Point) -> Point {
        self.drawable_to_frame(self.window_to_drawable(point))
    }

    /// Size of the device frame the mapped points refer to.
    pub fn frame_size(&self) -> Size {
        self.orientation.oriented_size(self.content_size)
    }

    pub fn window_to_position(&self, point: Point) -> Position {
        Position {
            point: self.window_to_frame(point),
            screen_size: self.frame_size(),
        }
    }
}

/// Scale a window-space point into drawable space. A zero window dimension
/// (window not yet mapped) leaves the point untouched.
pub fn hidpi_scale(point: Point, window: Size, drawable: Size) -> Point {
    let axis = |v: i32, num: u32, den: u32| {
        if den == 0 {
            v
        } else {
            (i64::from(v) * i64::from(num) / i64::from(den)) as i32
        }
    };
    Point::new(
        axis(point.x, drawable.width, window.width),
        axis(point.y, drawable.height, window.height),
    )
}

/// Device-side mapping of client positions onto the current video size.
///
/// A client can still send events against the previous resolution right
/// after the stream changed size; those are rescaled rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMapper {
    video_size: Size,
}

impl PositionMapper {
    pub fn new(video_size: Size) -> Self {
        Self { video_size }
    }

    pub fn video_size(&self) -> Size {
        self.video_size
    }

    pub fn map(&self, position: Position) -> Point {
        let client = position.screen_size;
        if client == self.video_size || client.is_empty() {
            return position.point;
        }
        let scale_x = self.video_size.width as f32 / client.width as f32;
        let scale_y = self.video_size.height as f32 / client.height as f32;
        let mapped = Point::new(
            (position.point.x as f32 * scale_x).round() as i32,
            (position.point.y as f32 * scale_y).round() as i32,
        );
        tracing::trace!(
            ?client,
            video = ?self.video_size,
            from = ?position.point,
            to = ?mapped,
            "rescaled position from stale video size"
        );
        mapped
    }
}
