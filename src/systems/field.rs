//! Particle field hosting
//!
//! Bridges the window's event loop to the field component: redraw requests
//! are the frame-scheduling primitive and `Resized` events are the resize
//! notification source.

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarmfield_core::{
    FieldParams, FrameReport, FrameRequest, FrameScheduler, ListenerId, ParticleFieldComponent,
    ResizeNotifier,
};
use swarmfield_render::{PixelCanvas, PixelSurface};

/// Frame scheduler and resize notifier backed by window redraws
///
/// Requesting a frame asks the window for a redraw; the request is delivered
/// when the next `RedrawRequested` event arrives.
pub struct WinitHost {
    request_redraw: Box<dyn Fn()>,
    next_id: u64,
    pending: Vec<FrameRequest>,
    listeners: Vec<ListenerId>,
}

impl WinitHost {
    pub fn new(request_redraw: impl Fn() + 'static) -> Self {
        Self {
            request_redraw: Box::new(request_redraw),
            next_id: 0,
            pending: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Requests due on this redraw
    pub fn take_due_frames(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Listeners to notify of a resize
    pub fn listeners(&self) -> Vec<ListenerId> {
        self.listeners.clone()
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.pending.is_empty()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameScheduler for WinitHost {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending.push(request);
        (self.request_redraw)();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        // The redraw may still arrive; it just has nothing to deliver
        self.pending.retain(|r| *r != request);
    }
}

impl ResizeNotifier for WinitHost {
    fn add_resize_listener(&mut self) -> ListenerId {
        let listener = ListenerId(self.next_id());
        self.listeners.push(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }
}

/// Owns the host and the mounted field, if any
pub struct FieldSystem {
    host: WinitHost,
    component: Option<ParticleFieldComponent<PixelSurface, StdRng>>,
}

impl FieldSystem {
    pub fn new(host: WinitHost) -> Self {
        Self {
            host,
            component: None,
        }
    }

    /// Mount the field onto `surface`; a fixed `seed` makes the layout reproducible
    ///
    /// Returns whether the field is now mounted. Mounting twice replaces the
    /// previous field.
    pub fn mount(&mut self, surface: PixelSurface, params: FieldParams, seed: Option<u64>) -> bool {
        self.unmount();

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.component = ParticleFieldComponent::mount(&mut self.host, surface, params, rng);
        self.component.is_some()
    }

    /// Deliver due frames; returns the report of the frame drawn, if any
    pub fn redraw(&mut self) -> Option<FrameReport> {
        let component = self.component.as_mut()?;
        let mut report = None;
        for request in self.host.take_due_frames() {
            if let Some(drawn) = component.on_frame(&mut self.host, request) {
                report = Some(drawn);
            }
        }
        report
    }

    /// Deliver a resize notification to every registered listener
    pub fn resized(&mut self) {
        let Some(component) = self.component.as_mut() else {
            return;
        };
        for listener in self.host.listeners() {
            component.on_resize(listener);
        }
    }

    /// Tear the field down; no-op if nothing is mounted
    pub fn unmount(&mut self) {
        if let Some(component) = self.component.take() {
            component.unmount(&mut self.host);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.component.is_some()
    }

    /// The canvas to present, if mounted
    pub fn canvas(&self) -> Option<&PixelCanvas> {
        self.component.as_ref().map(|c| c.surface().canvas())
    }

    pub fn host(&self) -> &WinitHost {
        &self.host
    }
}
