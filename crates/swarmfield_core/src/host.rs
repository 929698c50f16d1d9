//! Host capabilities: frame scheduling and resize notification
//!
//! The component never owns a timer or an event loop. It asks its host for
//! the next frame and registers for resize notifications through these
//! traits, and the host calls back into the component with the handle it
//! handed out. A winit window, a test harness or a headless driver can all
//! implement them.

/// Handle for one scheduled frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// Handle for a registered resize listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Schedules frame callbacks in sync with the display
pub trait FrameScheduler {
    /// Ask for one callback on the next display frame
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request; cancelling an already delivered request is a no-op
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Notifies about surface/viewport size changes
pub trait ResizeNotifier {
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Removing an unknown listener is a no-op
    fn remove_resize_listener(&mut self, listener: ListenerId);
}

/// Everything a mounted component needs from its environment
pub trait Host: FrameScheduler + ResizeNotifier {}

impl<T: FrameScheduler + ResizeNotifier + ?Sized> Host for T {}

/// Deterministic host driven by hand
///
/// Frames are only delivered when the driver calls
/// [`take_due_frames`](Self::take_due_frames), so tests can step the
/// animation one frame at a time.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_frame: u64,
    next_listener: u64,
    pending: Vec<FrameRequest>,
    listeners: Vec<ListenerId>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every outstanding frame request, oldest first
    pub fn take_due_frames(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Outstanding (requested, not yet delivered or cancelled) frames
    pub fn pending_frames(&self) -> &[FrameRequest] {
        &self.pending
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_listening(&self, listener: ListenerId) -> bool {
        self.listeners.contains(&listener)
    }
}

impl FrameScheduler for ManualHost {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_frame += 1;
        let request = FrameRequest(self.next_frame);
        self.pending.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}

impl ResizeNotifier for ManualHost {
    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let listener = ListenerId(self.next_listener);
        self.listeners.push(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }
}
