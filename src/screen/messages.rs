use crate::screen::coords::Position;
use crate::screen::model::{Point, Size};
use serde::{Deserialize, Serialize};

/// Posted by the producer thread to wake the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The stream opened with the given frame size; sent before any frame.
    InitSize(Size),
    /// A frame is waiting in the slot.
    NewFrame,
}

/// Window lifecycle notifications reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Exposed,
    SizeChanged,
    Maximized,
    Minimized,
    Restored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
}

/// Pointer input in window coordinates, as received from the windowing
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    ButtonDown {
        point: Point,
        button: MouseButton,
        clicks: u8,
    },
    ButtonUp {
        point: Point,
        button: MouseButton,
        clicks: u8,
    },
    Motion {
        point: Point,
    },
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        match *self {
            Self::ButtonDown { point, .. } | Self::ButtonUp { point, .. } | Self::Motion { point } => {
                point
            }
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(self, Self::ButtonDown { .. } | Self::ButtonUp { .. })
    }
}

/// What the input-routing collaborator receives: the raw event plus its
/// position in device-frame space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardedPointer {
    pub event: PointerEvent,
    pub position: Position,
}

/// Outbound notifications, serialized as `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OutboundEvent {
    Ready,
    PanelButtonClick { id: String },
}

impl OutboundEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::error!(%err, "failed to serialize outbound event");
            String::new()
        })
    }
}
