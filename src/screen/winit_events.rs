//! Adapter from `winit` window events to the screen's own event types.

use crate::screen::messages::{MouseButton, PointerEvent, WindowEvent};
use crate::screen::model::Point;
use winit::event::{ElementState, MouseButton as WinitButton, WindowEvent as WinitWindowEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatedEvent {
    Window(WindowEvent),
    Pointer(PointerEvent),
}

/// Stateful translator: winit reports button presses without a position and
/// cursor moves in physical pixels, while the screen expects logical
/// window coordinates on every pointer event.
#[derive(Debug, Clone)]
pub struct WinitEventTranslator {
    scale_factor: f64,
    cursor: Point,
    maximized: bool,
    minimized: bool,
}

impl WinitEventTranslator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: Point::default(),
            maximized: false,
            minimized: false,
        }
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn translate(&mut self, event: &WinitWindowEvent) -> Option<TranslatedEvent> {
        match event {
            WinitWindowEvent::Resized(_) => Some(TranslatedEvent::Window(WindowEvent::SizeChanged)),
            WinitWindowEvent::RedrawRequested => Some(TranslatedEvent::Window(WindowEvent::Exposed)),
            WinitWindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                Some(TranslatedEvent::Window(WindowEvent::SizeChanged))
            }
            WinitWindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.scale_factor);
                self.cursor = Point::new(logical.x.floor() as i32, logical.y.floor() as i32);
                Some(TranslatedEvent::Pointer(PointerEvent::Motion { point: self.cursor }))
            }
            WinitWindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(*button)?;
                let point = self.cursor;
                // winit does not count clicks.
                let event = match state {
                    ElementState::Pressed => PointerEvent::ButtonDown {
                        point,
                        button,
                        clicks: 1,
                    },
                    ElementState::Released => PointerEvent::ButtonUp {
                        point,
                        button,
                        clicks: 1,
                    },
                };
                Some(TranslatedEvent::Pointer(event))
            }
            _ => None,
        }
    }

    /// winit has no maximize/minimize events; the event loop polls the window
    /// after a resize and reports the state here. Returns the lifecycle event
    /// for the transition, if any.
    pub fn sync_window_state(&mut self, maximized: bool, minimized: bool) -> Option<WindowEvent> {
        let was_constrained = self.maximized || self.minimized;
        let event = if minimized && !self.minimized {
            Some(WindowEvent::Minimized)
        } else if maximized && !self.maximized {
            Some(WindowEvent::Maximized)
        } else if was_constrained && !maximized && !minimized {
            Some(WindowEvent::Restored)
        } else {
            None
        };
        self.maximized = maximized;
        self.minimized = minimized;
        event
    }
}

fn map_button(button: WinitButton) -> Option<MouseButton> {
    match button {
        WinitButton::Left => Some(MouseButton::Left),
        WinitButton::Middle => Some(MouseButton::Middle),
        WinitButton::Right => Some(MouseButton::Right),
        WinitButton::Back => Some(MouseButton::X1),
        WinitButton::Forward => Some(MouseButton::X2),
        WinitButton::Other(_) => None,
    }
}
