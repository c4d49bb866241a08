use crate::screen::coords::CoordinateMapper;
use crate::screen::fps::FpsCounter;
use crate::screen::frame_slot::{FrameSink, FrameSlot};
use crate::screen::geometry;
use crate::screen::messages::{
    ForwardedPointer, OutboundEvent, PointerEvent, ScreenEvent, WindowEvent,
};
use crate::screen::model::{Point, Rect, Size, VideoFrame};
use crate::screen::orientation::Orientation;
use crate::screen::panel::{
    CursorShape, PanelAction, PanelLayout, PanelOverlay, PanelUpdate, PANEL_WIDTH,
};
use crate::screen::ports::{DisplayResult, PanelScene, RenderScene, ScreenPorts, WindowCoord};
use crate::screen::window_state::{ResizeRequest, RestoreOutcome, WindowFlags, WindowStateMachine};
use anyhow::{bail, Result};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

/// Requested initial window placement. `None` leaves the choice to the
/// screen: centered position, size fitted to the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowRequest {
    pub x: Option<i16>,
    pub y: Option<i16>,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenParams {
    pub window: WindowRequest,
    pub orientation: Orientation,
    pub fullscreen: bool,
    pub panel_show: bool,
    pub hide_window: bool,
    pub start_fps_counter: bool,
    pub always_on_top: bool,
}

/// Producer-side ends handed out by [`Screen::new`]. `frame_sink` goes to the
/// decoder thread; `events_rx` stays with the UI loop and is drained through
/// [`Screen::pump_events`].
pub struct ScreenHandles {
    pub frame_sink: FrameSink,
    pub events_rx: Receiver<ScreenEvent>,
}

/// The mirror window: owns geometry, orientation, panel and window state,
/// and drives the collaborators in [`ScreenPorts`]. Lives on the UI thread.
pub struct Screen {
    ports: ScreenPorts,
    slot: Arc<FrameSlot<VideoFrame>>,
    params: ScreenParams,

    frame_size: Size,
    content_size: Size,
    orientation: Orientation,
    rect: Rect,
    window_state: WindowStateMachine,
    panel: PanelOverlay,
    fps: FpsCounter,

    has_frame: bool,
    ready_sent: bool,
    paused: bool,
    resume_frame: Option<VideoFrame>,
    skipped_seen: u64,
}

impl Screen {
    pub fn new(params: ScreenParams, mut ports: ScreenPorts) -> (Self, ScreenHandles) {
        let slot = Arc::new(FrameSlot::new());
        let (events_tx, events_rx) = channel();
        let frame_sink = FrameSink::new(slot.clone(), events_tx);

        if params.always_on_top {
            if let Err(err) = ports.window.set_always_on_top(true) {
                tracing::warn!(error = %err, "could not keep window on top");
            }
        }

        let screen = Self {
            ports,
            slot,
            params,
            frame_size: Size::default(),
            content_size: Size::default(),
            orientation: params.orientation,
            rect: Rect::default(),
            window_state: WindowStateMachine::new(),
            panel: PanelOverlay::new(params.panel_show),
            fps: FpsCounter::new(),
            has_frame: false,
            ready_sent: false,
            paused: false,
            resume_frame: None,
            skipped_seen: 0,
        };
        (
            screen,
            ScreenHandles {
                frame_sink,
                events_rx,
            },
        )
    }

    /// Handle every queued producer event. Returns `false` once the producer
    /// side has gone away.
    pub fn pump_events(&mut self, events_rx: &Receiver<ScreenEvent>) -> bool {
        loop {
            match events_rx.try_recv() {
                Ok(event) => {
                    if let Err(err) = self.handle_screen_event(event) {
                        tracing::error!(error = %err, ?event, "screen event failed");
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("frame producer disconnected");
                    return false;
                }
            }
        }
    }

    pub fn handle_screen_event(&mut self, event: ScreenEvent) -> Result<()> {
        match event {
            ScreenEvent::InitSize(size) => self.init_size(size),
            ScreenEvent::NewFrame => self.update_frame(),
        }
    }

    /// Record the stream's frame size and allocate the texture. Must happen
    /// before the first frame; a reopened stream may announce a new size.
    pub fn init_size(&mut self, frame_size: Size) -> Result<()> {
        assert!(
            !self.has_frame,
            "frame size must be initialized before the first frame"
        );
        self.frame_size = frame_size;
        self.content_size = self.orientation.oriented_size(frame_size);
        tracing::debug!(?frame_size, content_size = ?self.content_size, "initial frame size");
        match self.ports.display.set_texture_size(frame_size) {
            DisplayResult::Error => bail!(
                "could not allocate a {}x{} texture",
                frame_size.width,
                frame_size.height
            ),
            DisplayResult::Ok | DisplayResult::Pending => Ok(()),
        }
    }

    /// Take the frame announced by a `NewFrame` wake-up.
    pub fn update_frame(&mut self) -> Result<()> {
        let skipped = self.slot.skipped_frames();
        let newly_skipped = skipped.saturating_sub(self.skipped_seen);
        self.skipped_seen = skipped;
        self.fps
            .add_skipped_frames(u32::try_from(newly_skipped).unwrap_or(u32::MAX), Instant::now());

        let Some(frame) = self.slot.consume() else {
            tracing::warn!("frame wake-up without a pending frame");
            return Ok(());
        };
        if self.paused {
            self.resume_frame = Some(frame);
            return Ok(());
        }
        self.apply_frame(&frame)
    }

    fn apply_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        match self.prepare_for_frame(frame.size) {
            DisplayResult::Ok => {}
            DisplayResult::Pending => return Ok(()),
            DisplayResult::Error => bail!(
                "could not prepare display for a {}x{} frame",
                frame.size.width,
                frame.size.height
            ),
        }
        match self.ports.display.update_texture(frame) {
            DisplayResult::Ok => {}
            DisplayResult::Pending => return Ok(()),
            DisplayResult::Error => bail!("could not update texture"),
        }

        let first_frame = !self.has_frame;
        if first_frame {
            // Still frameless while the window is set up, so a startup
            // fullscreen switch does not render ahead of this frame.
            self.show_initial_window();
            self.has_frame = true;
        }
        self.fps.add_rendered_frame(Instant::now());
        self.render(first_frame);
        Ok(())
    }

    /// Adapt geometry and texture to a frame of `new_frame_size`.
    pub fn prepare_for_frame(&mut self, new_frame_size: Size) -> DisplayResult {
        if self.frame_size == new_frame_size {
            return DisplayResult::Ok;
        }
        let new_content_size = self.orientation.oriented_size(new_frame_size);
        tracing::debug!(
            from = ?self.frame_size,
            to = ?new_frame_size,
            "frame size changed"
        );
        self.frame_size = new_frame_size;
        self.set_content_size(new_content_size);
        self.update_content_rect();
        self.ports.display.set_texture_size(new_frame_size)
    }

    fn set_content_size(&mut self, new_content_size: Size) {
        let old_content_size = self.content_size;
        self.content_size = new_content_size;
        if !self.has_frame || old_content_size.is_empty() {
            // The initial window size is derived from the content later on.
            return;
        }
        match self
            .window_state
            .content_size_changed(old_content_size, new_content_size)
        {
            Some(request) => self.resize_for_content(request),
            None => tracing::debug!(
                ?new_content_size,
                "window constrained, resize deferred"
            ),
        }
    }

    fn resize_for_content(&mut self, request: ResizeRequest) {
        let window = self.content_window_size();
        let target = geometry::resize_target(window, request.from, request.to);
        let optimal = geometry::optimal_size(target, request.to, self.display_bounds());
        let size = self.with_panel(optimal);
        tracing::debug!(?window, ?size, "resizing window for new content size");
        self.ports.window.set_window_size(size);
    }

    fn show_initial_window(&mut self) {
        if self.params.hide_window {
            tracing::info!("window kept hidden");
            self.update_content_rect();
            return;
        }

        let request = self.params.window;
        let size = geometry::initial_optimal_size(
            self.content_size,
            request.width,
            request.height,
            self.display_bounds(),
        );
        // The panel width is logical, like the window size.
        let size = self.with_panel(size);
        let coord = |value: Option<i16>| value.map_or(WindowCoord::Centered, |v| WindowCoord::At(v.into()));
        self.ports.window.set_window_size(size);
        self.ports
            .window
            .set_window_position(coord(request.x), coord(request.y));

        if self.params.fullscreen {
            self.toggle_fullscreen();
        }
        if self.params.start_fps_counter {
            self.fps.start(Instant::now());
        }
        self.ports.window.show();
        self.update_content_rect();
    }

    /// Present the current texture. With `update_content_rect` the content
    /// rect is recomputed first; callers set it whenever drawable size,
    /// content size or panel width may have changed.
    pub fn render(&mut self, update_content_rect: bool) {
        if !self.has_frame {
            return;
        }
        if update_content_rect {
            self.update_content_rect();
        }

        let layout = self.panel_layout();
        let buttons = self.panel.panel().buttons();
        let panel = (self.panel.visible() && !buttons.is_empty()).then_some(PanelScene {
            layout: &layout,
            buttons,
        });
        self.ports.display.render(&RenderScene {
            content_rect: self.rect,
            orientation: self.orientation,
            panel,
        });

        if !self.ready_sent {
            self.ready_sent = true;
            tracing::info!("first frame rendered, sending ready event");
            self.send_event(OutboundEvent::Ready);
        }
    }

    fn update_content_rect(&mut self) {
        if self.content_size.is_empty() {
            return;
        }
        let drawable = self.ports.window.drawable_size();
        let panel_width = self.panel_width_drawable();
        self.rect = geometry::content_rect(drawable, self.content_size, panel_width);
    }

    pub fn handle_window_event(&mut self, event: WindowEvent) {
        if !self.has_frame {
            // Nothing to lay out before the first frame.
            return;
        }
        match event {
            WindowEvent::Exposed | WindowEvent::SizeChanged => self.render(true),
            WindowEvent::Maximized => self.window_state.on_maximized(),
            WindowEvent::Minimized => self.window_state.on_minimized(),
            WindowEvent::Restored => match self.window_state.on_restored(self.content_size) {
                RestoreOutcome::Ignored => {
                    tracing::debug!("restored while fullscreen, ignored");
                }
                RestoreOutcome::Restored(pending) => {
                    if let Some(request) = pending {
                        self.resize_for_content(request);
                    }
                    self.render(true);
                }
            },
        }
    }

    /// Route a window-space pointer event through the panel to the input
    /// sink.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        if !self.has_frame {
            return;
        }
        let drawable_point = self.hidpi_scale_coords(event.point());
        let layout = self.panel_layout();
        let outcome = self.panel.handle_pointer(&event, drawable_point, &layout);
        if let Some(cursor) = outcome.cursor {
            self.apply_cursor(cursor);
        }
        match outcome.action {
            PanelAction::PassThrough | PanelAction::ForwardThenSwallow => self.forward(event),
            PanelAction::Swallow => {}
            PanelAction::Activate { id } => self.send_panel_click(&id),
            PanelAction::ReleaseThenSwallow(release) => self.forward(release),
        }
    }

    fn forward(&mut self, event: PointerEvent) {
        let position = self.mapper().window_to_position(event.point());
        self.ports.input.forward(ForwardedPointer { event, position });
    }

    fn apply_cursor(&mut self, shape: CursorShape) {
        if let Err(err) = self.ports.window.set_cursor(shape) {
            tracing::warn!(error = %err, "cursor change failed, hover cursor disabled");
            self.panel.disable_cursor_swap();
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation == self.orientation {
            return;
        }
        let new_content_size = orientation.oriented_size(self.frame_size);
        self.set_content_size(new_content_size);
        self.orientation = orientation;
        tracing::info!(%orientation, "display orientation set");
        self.render(true);
    }

    /// Pause or resume rendering. Leaving a paused state re-applies the
    /// latest frame received meanwhile, even when pausing again.
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if !paused && !self.paused {
            return Ok(());
        }
        let was_paused = self.paused;
        self.paused = paused;
        match (paused, was_paused) {
            (false, _) => tracing::info!("display unpaused"),
            (true, false) => tracing::info!("display paused"),
            (true, true) => tracing::info!("display re-paused"),
        }
        if was_paused {
            if let Some(frame) = self.resume_frame.take() {
                self.apply_frame(&frame)?;
            }
        }
        Ok(())
    }

    pub fn toggle_fullscreen(&mut self) {
        let fullscreen = !self.window_state.flags().fullscreen;
        if let Err(err) = self.ports.window.set_fullscreen(fullscreen) {
            tracing::warn!(error = %err, "could not switch fullscreen mode");
            return;
        }
        if let Some(request) = self.window_state.on_fullscreen_toggled(self.content_size) {
            self.resize_for_content(request);
        }
        tracing::debug!(fullscreen, "switched fullscreen mode");
        self.render(true);
    }

    /// Shrink the window to remove black borders, keeping it centered.
    pub fn resize_to_fit(&mut self) {
        if !self.has_frame || !self.window_state.is_windowed() {
            return;
        }
        let position = self.ports.window.window_position();
        let window = self.ports.window.window_size();
        let optimal = geometry::optimal_size(self.content_window_size(), self.content_size, None);
        let size = self.with_panel(optimal);
        let point = geometry::centered_position(position, window, size);
        tracing::debug!(?size, "resize to fit");
        self.ports.window.set_window_size(size);
        self.ports
            .window
            .set_window_position(WindowCoord::At(point.x), WindowCoord::At(point.y));
    }

    /// Size the window to show one device pixel per window pixel.
    pub fn resize_to_pixel_perfect(&mut self) {
        let flags = self.window_state.flags();
        if !self.has_frame || flags.fullscreen || flags.minimized {
            return;
        }
        if flags.maximized {
            self.ports.window.restore();
        }
        self.window_state.leave_maximized();
        let size = self.with_panel(self.content_size);
        tracing::debug!(?size, "resize to pixel-perfect");
        self.ports.window.set_window_size(size);
    }

    /// Replace the panel buttons. Ignored when the panel was not enabled at
    /// startup.
    pub fn update_panel(&mut self, update: PanelUpdate) {
        if !self.params.panel_show {
            tracing::debug!("panel disabled, update ignored");
            return;
        }
        if let Some(cursor) = self.panel.apply_update(update) {
            self.apply_cursor(cursor);
        }
        tracing::info!(
            buttons = self.panel.panel().buttons().len(),
            visible = self.panel.visible(),
            "panel updated"
        );
        self.render(true);
    }

    /// Apply a JSON control message. Returns whether it was a panel message.
    pub fn update_panel_json(&mut self, text: &str) -> Result<bool> {
        match PanelUpdate::from_json(text) {
            Ok(Some(update)) => {
                self.update_panel(update);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                tracing::error!(error = %err, "rejected panel update");
                Err(err)
            }
        }
    }

    pub fn send_panel_click(&mut self, id: &str) {
        tracing::info!(id, "panel button clicked");
        self.send_event(OutboundEvent::PanelButtonClick { id: id.to_string() });
    }

    fn send_event(&mut self, event: OutboundEvent) {
        if let Err(err) = self.ports.events.send(&event) {
            tracing::warn!(error = %err, ?event, "could not send outbound event");
        }
    }

    pub fn hide(&mut self) {
        self.ports.window.hide();
    }

    pub fn raise(&mut self) {
        self.ports.window.raise();
        tracing::info!("window raised");
    }

    pub fn set_always_on_top(&mut self, on_top: bool) {
        match self.ports.window.set_always_on_top(on_top) {
            Ok(()) => tracing::info!(on_top, "always-on-top changed"),
            Err(err) => tracing::warn!(error = %err, "could not change always-on-top"),
        }
    }

    /// Map a window-space point to device-frame space. Only valid once a
    /// frame has been presented.
    pub fn window_to_frame(&self, point: Point) -> Point {
        self.mapper().window_to_frame(point)
    }

    pub fn drawable_to_frame(&self, point: Point) -> Point {
        self.mapper().drawable_to_frame(point)
    }

    pub fn hidpi_scale_coords(&self, point: Point) -> Point {
        self.mapper().window_to_drawable(point)
    }

    fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper {
            window_size: self.ports.window.window_size(),
            drawable_size: self.ports.window.drawable_size(),
            content_rect: self.rect,
            content_size: self.content_size,
            orientation: self.orientation,
        }
    }

    fn panel_width_drawable(&self) -> i32 {
        geometry::panel_width_scaled(
            self.panel.visible(),
            PANEL_WIDTH,
            self.ports.window.window_size(),
            self.ports.window.drawable_size(),
        )
    }

    fn panel_layout(&self) -> PanelLayout {
        let drawable = self.ports.window.drawable_size();
        PanelLayout::for_screen(
            self.rect,
            self.panel_width_drawable(),
            drawable.height as i32,
            self.panel.panel().buttons().len(),
        )
    }

    fn panel_logical_width(&self) -> u32 {
        if self.panel.visible() {
            PANEL_WIDTH
        } else {
            0
        }
    }

    /// Window size without the panel column.
    fn content_window_size(&self) -> Size {
        let window = self.ports.window.window_size();
        Size::new(
            window.width.saturating_sub(self.panel_logical_width()),
            window.height,
        )
    }

    fn with_panel(&self, size: Size) -> Size {
        Size::new(size.width + self.panel_logical_width(), size.height)
    }

    fn display_bounds(&self) -> Option<Size> {
        match self.ports.window.usable_display_bounds() {
            Ok(usable) => Some(geometry::preferred_display_bounds(usable)),
            Err(err) => {
                tracing::warn!(error = %err, "could not get display bounds, size not clamped");
                None
            }
        }
    }

    pub fn frame_size(&self) -> Size {
        self.frame_size
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn content_rect(&self) -> Rect {
        self.rect
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn window_flags(&self) -> WindowFlags {
        self.window_state.flags()
    }

    pub fn resize_pending(&self) -> bool {
        self.window_state.resize_pending()
    }

    pub fn has_frame(&self) -> bool {
        self.has_frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn panel(&self) -> &PanelOverlay {
        &self.panel
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn fps_mut(&mut self) -> &mut FpsCounter {
        &mut self.fps
    }
}
