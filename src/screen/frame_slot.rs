use crate::screen::messages::ScreenEvent;
use crate::screen::model::{Size, VideoFrame};
use anyhow::{anyhow, Result};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Largest frame dimension accepted from the decoder.
pub const MAX_FRAME_DIMENSION: u32 = 0xFFFF;

#[derive(Debug)]
struct SlotState<F> {
    pending: Option<F>,
    skipped_total: u64,
}

/// Single-slot hand-off between the decoder thread and the UI thread.
///
/// At most one frame is retained. A push that lands before the previous frame
/// was consumed overwrites it and reports the skip, so a slow consumer drops
/// frames instead of stalling the producer.
#[derive(Debug)]
pub struct FrameSlot<F> {
    state: Mutex<SlotState<F>>,
}

impl<F> Default for FrameSlot<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FrameSlot<F> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                pending: None,
                skipped_total: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<F>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `frame`, returning whether an unconsumed frame was discarded.
    pub fn push(&self, frame: F) -> bool {
        let mut state = self.lock();
        let previous_skipped = state.pending.replace(frame).is_some();
        if previous_skipped {
            state.skipped_total += 1;
        }
        previous_skipped
    }

    /// Take the stored frame. Only meaningful after a `NewFrame` wake-up.
    pub fn consume(&self) -> Option<F> {
        self.lock().pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.lock().pending.is_some()
    }

    pub fn skipped_frames(&self) -> u64 {
        self.lock().skipped_total
    }
}

/// Producer-side handle: pushes into the shared slot and posts the wake-up
/// the UI thread drains the slot on.
#[derive(Debug, Clone)]
pub struct FrameSink {
    slot: Arc<FrameSlot<VideoFrame>>,
    events_tx: Sender<ScreenEvent>,
}

impl FrameSink {
    pub fn new(slot: Arc<FrameSlot<VideoFrame>>, events_tx: Sender<ScreenEvent>) -> Self {
        Self { slot, events_tx }
    }

    /// Announce the stream's frame size before the first frame.
    pub fn open(&self, frame_size: Size) -> Result<()> {
        if !is_valid_frame_size(frame_size) {
            tracing::error!(
                width = frame_size.width,
                height = frame_size.height,
                "invalid video size"
            );
            return Err(anyhow!(
                "invalid video size: {}x{}",
                frame_size.width,
                frame_size.height
            ));
        }
        self.post(ScreenEvent::InitSize(frame_size))
    }

    pub fn push(&self, frame: VideoFrame) -> Result<()> {
        if self.slot.push(frame) {
            // The NewFrame posted for the discarded frame will pick this one up.
            tracing::trace!("previous frame skipped");
            return Ok(());
        }
        self.post(ScreenEvent::NewFrame)
    }

    fn post(&self, event: ScreenEvent) -> Result<()> {
        self.events_tx
            .send(event)
            .map_err(|_| anyhow!("screen event receiver disconnected"))
    }
}

pub fn is_valid_frame_size(size: Size) -> bool {
    (1..=MAX_FRAME_DIMENSION).contains(&size.width)
        && (1..=MAX_FRAME_DIMENSION).contains(&size.height)
}
