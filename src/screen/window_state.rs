use crate::screen::model::Size;

/// Window constraints as reported by the windowing layer. Tracked as
/// independent flags: some platforms report combinations such as
/// maximized and fullscreen at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFlags {
    pub fullscreen: bool,
    pub maximized: bool,
    pub minimized: bool,
}

impl WindowFlags {
    /// True when the window manager is not constraining the window size.
    pub fn is_windowed(self) -> bool {
        !self.fullscreen && !self.maximized && !self.minimized
    }
}

/// A window resize to perform for a content-size change from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest {
    pub from: Size,
    pub to: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Restored while fullscreen; flags left alone.
    Ignored,
    Restored(Option<ResizeRequest>),
}

/// Decides whether a content-size change resizes the window now or once the
/// window leaves fullscreen/maximized/minimized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowStateMachine {
    flags: WindowFlags,
    resize_pending: bool,
    // meaningful only while resize_pending is set
    windowed_content_size: Size,
}

impl WindowStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn is_windowed(&self) -> bool {
        self.flags.is_windowed()
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Content size recorded when the pending resize was deferred.
    pub fn windowed_content_size(&self) -> Option<Size> {
        self.resize_pending.then_some(self.windowed_content_size)
    }

    /// Content size changes from `old` to `new`. Returns the resize to apply
    /// right away, or records a deferred one when constrained. The first
    /// deferred baseline wins over later intermediate sizes.
    pub fn content_size_changed(&mut self, old: Size, new: Size) -> Option<ResizeRequest> {
        if self.flags.is_windowed() {
            return Some(ResizeRequest { from: old, to: new });
        }
        if !self.resize_pending {
            self.windowed_content_size = old;
            self.resize_pending = true;
        }
        None
    }

    pub fn on_maximized(&mut self) {
        self.flags.maximized = true;
    }

    pub fn on_minimized(&mut self) {
        self.flags.minimized = true;
    }

    pub fn on_restored(&mut self, content_size: Size) -> RestoreOutcome {
        if self.flags.fullscreen {
            // Leaving fullscreen from maximized on Windows emits "restored"
            // then "maximized" while the window is still fullscreen.
            return RestoreOutcome::Ignored;
        }
        self.flags.maximized = false;
        self.flags.minimized = false;
        RestoreOutcome::Restored(self.take_pending_resize(content_size))
    }

    /// Flip the fullscreen flag after the windowing layer accepted the
    /// switch. Leaving fullscreen into a windowed state releases any deferred
    /// resize.
    pub fn on_fullscreen_toggled(&mut self, content_size: Size) -> Option<ResizeRequest> {
        self.flags.fullscreen = !self.flags.fullscreen;
        self.take_pending_resize(content_size)
    }

    /// Leave maximized for an explicit resize that supersedes any deferred
    /// one.
    pub fn leave_maximized(&mut self) {
        self.flags.maximized = false;
        if self.flags.is_windowed() {
            self.resize_pending = false;
        }
    }

    /// Return the deferred resize toward `content_size` if the window is
    /// windowed again, clearing the pending flag first.
    pub fn take_pending_resize(&mut self, content_size: Size) -> Option<ResizeRequest> {
        if !self.flags.is_windowed() || !self.resize_pending {
            return None;
        }
        self.resize_pending = false;
        Some(ResizeRequest {
            from: self.windowed_content_size,
            to: content_size,
        })
    }
}
