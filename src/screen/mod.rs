pub mod controller;
pub mod coords;
pub mod fps;
pub mod frame_slot;
pub mod geometry;
pub mod messages;
pub mod model;
pub mod orientation;
pub mod panel;
pub mod ports;
pub mod window_state;
pub mod winit_events;

pub use controller::{Screen, ScreenHandles, ScreenParams, WindowRequest};
pub use frame_slot::{FrameSink, FrameSlot};
pub use model::{Point, Rect, Size, VideoFrame};
pub use orientation::Orientation;
pub use ports::{DisplayPort, DisplayResult, EventSink, InputSink, ScreenPorts, WindowPort};
