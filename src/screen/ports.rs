//! Collaborators the screen drives. The controller owns one of each and only
//! ever calls them from the UI thread.

use crate::screen::messages::{ForwardedPointer, OutboundEvent};
use crate::screen::model::{Point, Rect, Size, VideoFrame};
use crate::screen::orientation::Orientation;
use crate::screen::panel::{CursorShape, PanelButton, PanelLayout};
use anyhow::Result;

/// One axis of a requested window position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCoord {
    At(i32),
    Centered,
}

pub trait WindowPort {
    fn window_size(&self) -> Size;
    /// Size in physical pixels; differs from `window_size` on HiDPI displays.
    fn drawable_size(&self) -> Size;
    fn window_position(&self) -> Point;
    /// Usable area of the display holding the window.
    fn usable_display_bounds(&self) -> Result<Rect>;
    fn set_window_size(&mut self, size: Size);
    fn set_window_position(&mut self, x: WindowCoord, y: WindowCoord);
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()>;
    /// Leave the maximized state.
    fn restore(&mut self);
    fn show(&mut self);
    fn hide(&mut self);
    fn raise(&mut self);
    fn set_always_on_top(&mut self, on_top: bool) -> Result<()>;
    fn set_cursor(&mut self, shape: CursorShape) -> Result<()>;
}

/// Outcome of a texture operation. `Pending` means the display is not ready
/// yet (e.g. a texture upload is in flight) and the frame should be dropped
/// without reporting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayResult {
    Ok,
    Pending,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelScene<'a> {
    pub layout: &'a PanelLayout,
    pub buttons: &'a [PanelButton],
}

/// Everything the renderer needs for one presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderScene<'a> {
    pub content_rect: Rect,
    pub orientation: Orientation,
    pub panel: Option<PanelScene<'a>>,
}

pub trait DisplayPort {
    fn set_texture_size(&mut self, size: Size) -> DisplayResult;
    fn update_texture(&mut self, frame: &VideoFrame) -> DisplayResult;
    fn render(&mut self, scene: &RenderScene<'_>);
}

/// Receives pointer events that reach the mirrored content.
pub trait InputSink {
    fn forward(&mut self, pointer: ForwardedPointer);
}

/// Outbound channel towards the controlling application.
pub trait EventSink {
    fn send(&mut self, event: &OutboundEvent) -> Result<()>;
}

pub struct ScreenPorts {
    pub window: Box<dyn WindowPort>,
    pub display: Box<dyn DisplayPort>,
    pub input: Box<dyn InputSink>,
    pub events: Box<dyn EventSink>,
}
