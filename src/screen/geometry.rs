//! Window sizing and content layout.
//!
//! All arithmetic is integer with 64-bit intermediates; truncation matches
//! the pixel rounding done downstream.

use crate::screen::model::{Point, Rect, Size};

/// Space kept free around the window when clamping to the display.
pub const DISPLAY_MARGINS: u32 = 96;

/// Usable display area shrunk by the window margins.
pub fn preferred_display_bounds(usable: Rect) -> Size {
    let shrink = |v: i32| (v.max(0) as u32).saturating_sub(DISPLAY_MARGINS);
    Size::new(shrink(usable.w), shrink(usable.h))
}

fn scale(value: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return value;
    }
    (u64::from(value) * u64::from(num) / u64::from(den)) as u32
}

/// A size is optimal when one dimension can be recomputed from the other
/// through the content aspect ratio.
pub fn is_optimal_size(current: Size, content: Size) -> bool {
    if content.is_empty() {
        return false;
    }
    current.height == scale(current.width, content.height, content.width)
        || current.width == scale(current.height, content.width, content.height)
}

/// Whether fitting `content` into `area` keeps the full width (black borders
/// would otherwise appear on top and bottom).
fn keeps_width(area: Size, content: Size) -> bool {
    u64::from(content.width) * u64::from(area.height)
        > u64::from(content.height) * u64::from(area.width)
}

/// Optimal window size for `content`: keeps one dimension of `current`,
/// derives the other from the aspect ratio (cropping the borders), after
/// first shrinking `current` into `display_bounds` when given.
pub fn optimal_size(current: Size, content: Size, display_bounds: Option<Size>) -> Size {
    if content.is_empty() {
        return current;
    }

    let mut window = match display_bounds {
        Some(bounds) => Size::new(
            current.width.min(bounds.width),
            current.height.min(bounds.height),
        ),
        None => current,
    };

    if is_optimal_size(window, content) {
        return window;
    }

    if keeps_width(window, content) {
        window.height = scale(content.height, window.width, content.width);
    } else {
        window.width = scale(content.width, window.height, content.height);
    }
    window
}

/// Window size for the first frame. `None` requests are unset; with both
/// unset the content size itself is fitted to the display.
pub fn initial_optimal_size(
    content: Size,
    req_width: Option<u16>,
    req_height: Option<u16>,
    display_bounds: Option<Size>,
) -> Size {
    match (req_width, req_height) {
        (None, None) => optimal_size(content, content, display_bounds),
        (Some(w), Some(h)) => Size::new(u32::from(w), u32::from(h)),
        (Some(w), None) => {
            let w = u32::from(w);
            Size::new(w, scale(w, content.height, content.width))
        }
        (None, Some(h)) => {
            let h = u32::from(h);
            Size::new(scale(h, content.width, content.height), h)
        }
    }
}

/// Content rectangle inside the drawable area, with `panel_width` drawable
/// pixels reserved on the right. The content and panel are centered together
/// across the full drawable width.
///
/// The returned rect never has a zero dimension; it is used as a divisor by
/// the coordinate pipeline.
pub fn content_rect(drawable: Size, content: Size, panel_width: i32) -> Rect {
    assert!(!content.is_empty(), "content size must be known before layout");

    let drawable_w = drawable.width as i32;
    let drawable_h = drawable.height as i32;
    let panel_width = panel_width.clamp(0, drawable_w);
    let effective_w = (drawable_w - panel_width).max(1);
    let layout = Size::new(effective_w as u32, drawable.height);

    let rect = if is_optimal_size(layout, content) {
        Rect::new(
            (drawable_w - effective_w - panel_width) / 2,
            0,
            effective_w,
            drawable_h,
        )
    } else if keeps_width(layout, content) {
        let h = scale(content.height, effective_w as u32, content.width) as i32;
        Rect::new(
            (drawable_w - effective_w - panel_width) / 2,
            (drawable_h - h) / 2,
            effective_w,
            h,
        )
    } else {
        let w = scale(content.width, drawable.height, content.height) as i32;
        Rect::new((drawable_w - w - panel_width) / 2, 0, w, drawable_h)
    };

    Rect {
        w: rect.w.max(1),
        h: rect.h.max(1),
        ..rect
    }
}

/// Logical panel width converted to drawable pixels using the horizontal
/// HiDPI ratio. Zero when the panel is hidden.
pub fn panel_width_scaled(visible: bool, logical_width: u32, window: Size, drawable: Size) -> i32 {
    if !visible {
        return 0;
    }
    scale(logical_width, drawable.width, window.width) as i32
}

/// Window size that keeps the current zoom level when the content changes
/// from `old_content` to `new_content`, before optimal-size correction.
pub fn resize_target(window: Size, old_content: Size, new_content: Size) -> Size {
    Size::new(
        scale(window.width, new_content.width, old_content.width),
        scale(window.height, new_content.height, old_content.height),
    )
}

/// Position that keeps a window shrunk from `current` to `shrunk` centered
/// where it was.
pub fn centered_position(position: Point, current: Size, shrunk: Size) -> Point {
    let dx = (current.width.saturating_sub(shrunk.width) / 2) as i32;
    let dy = (current.height.saturating_sub(shrunk.height) / 2) as i32;
    Point::new(position.x + dx, position.y + dy)
}
