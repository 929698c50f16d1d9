//! Mounted particle field with its frame chain and resize listener

use rand::Rng;

use crate::field::{FieldParams, FrameReport, ParticleField};
use crate::host::{FrameRequest, Host, ListenerId};
use crate::surface::Surface;

/// A [`ParticleField`] bound to a surface and a host
///
/// Holds at most one pending frame request at any time. The host delivers
/// that request back through [`on_frame`](Self::on_frame), which draws and
/// immediately requests the next one. Dropping the component without
/// [`unmount`](Self::unmount) leaves the host holding stale handles, which
/// are ignored if ever delivered to another component.
pub struct ParticleFieldComponent<S: Surface, R: Rng> {
    surface: S,
    field: ParticleField,
    rng: R,
    pending_frame: Option<FrameRequest>,
    resize_listener: ListenerId,
    last_report: FrameReport,
}

impl<S: Surface, R: Rng> ParticleFieldComponent<S, R> {
    /// Mount onto `surface`
    ///
    /// Returns `None` without touching the host if the surface has no 2D
    /// context. Otherwise fits the backing buffer, populates the field, runs
    /// the first frame synchronously and requests the next one.
    pub fn mount<H: Host + ?Sized>(
        host: &mut H,
        mut surface: S,
        params: FieldParams,
        rng: R,
    ) -> Option<Self> {
        if surface.context_2d().is_none() {
            log::debug!("No 2D drawing context available; particle field not mounted");
            return None;
        }

        let resize_listener = host.add_resize_listener();
        let mut component = Self {
            surface,
            field: ParticleField::new(params),
            rng,
            pending_frame: None,
            resize_listener,
            last_report: FrameReport::default(),
        };
        component.reinitialize();

        log::info!(
            "Particle field mounted at {}x{} with {} particles",
            component.field.size().width,
            component.field.size().height,
            component.field.len()
        );

        component.draw_frame();
        component.pending_frame = Some(host.request_frame());
        Some(component)
    }

    /// Deliver a frame callback
    ///
    /// Only the currently pending request draws; stale or cancelled
    /// requests return `None`.
    pub fn on_frame<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        request: FrameRequest,
    ) -> Option<FrameReport> {
        if self.pending_frame != Some(request) {
            log::trace!("Ignoring stale frame request {:?}", request);
            return None;
        }

        let report = self.draw_frame();
        self.pending_frame = Some(host.request_frame());
        report
    }

    /// Deliver a resize notification
    ///
    /// Refits the backing buffer to the current layout size and regenerates
    /// the whole population. The pending frame is left in place so the chain
    /// continues with the new state. Returns whether the notification was
    /// addressed to this component.
    pub fn on_resize(&mut self, listener: ListenerId) -> bool {
        if listener != self.resize_listener {
            return false;
        }

        self.reinitialize();
        log::debug!(
            "Particle field resized to {}x{} ({} particles)",
            self.field.size().width,
            self.field.size().height,
            self.field.len()
        );
        true
    }

    /// Tear down: deregister the resize listener and cancel the pending frame
    ///
    /// Returns the surface so the caller can reuse it.
    pub fn unmount<H: Host + ?Sized>(mut self, host: &mut H) -> S {
        host.remove_resize_listener(self.resize_listener);
        if let Some(request) = self.pending_frame.take() {
            host.cancel_frame(request);
        }
        log::info!("Particle field unmounted");
        self.surface
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for the host, e.g. to present the backing buffer
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    pub fn resize_listener(&self) -> ListenerId {
        self.resize_listener
    }

    /// Report of the most recently drawn frame
    pub fn last_report(&self) -> FrameReport {
        self.last_report
    }

    fn reinitialize(&mut self) {
        let size = self.surface.layout_size();
        self.surface.set_backing_size(size);
        self.field.regenerate(size, &mut self.rng);
    }

    fn draw_frame(&mut self) -> Option<FrameReport> {
        let ctx = self.surface.context_2d()?;
        let report = self.field.frame(ctx);
        self.last_report = report;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualHost;
    use crate::recording::{DrawCommand, RecordingSurface};
    use crate::surface::SurfaceSize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mount(
        host: &mut ManualHost,
        size: SurfaceSize,
    ) -> ParticleFieldComponent<RecordingSurface, StdRng> {
        ParticleFieldComponent::mount(
            host,
            RecordingSurface::new(size),
            FieldParams::default(),
            StdRng::seed_from_u64(3),
        )
        .expect("surface has a context")
    }

    #[test]
    fn test_mount_draws_first_frame_and_requests_next() {
        let mut host = ManualHost::new();
        let component = mount(&mut host, SurfaceSize::new(600, 400));

        assert_eq!(component.surface().backing_size(), SurfaceSize::new(600, 400));
        assert_eq!(component.field().len(), 40);
        assert_eq!(component.last_report().particles, 40);
        assert_eq!(host.pending_frames().len(), 1);
        assert_eq!(host.listener_count(), 1);

        let commands = component.surface().commands();
        assert!(matches!(commands.first(), Some(DrawCommand::Clear { .. })));
    }

    #[test]
    fn test_mount_without_context_is_silent() {
        let mut host = ManualHost::new();
        let component = ParticleFieldComponent::mount(
            &mut host,
            RecordingSurface::unavailable(SurfaceSize::new(600, 400)),
            FieldParams::default(),
            StdRng::seed_from_u64(3),
        );

        assert!(component.is_none());
        assert!(host.pending_frames().is_empty());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_frame_chain_keeps_one_pending_request() {
        let mut host = ManualHost::new();
        let mut component = mount(&mut host, SurfaceSize::new(600, 400));

        for _ in 0..10 {
            let due = host.take_due_frames();
            assert_eq!(due.len(), 1);
            let report = component.on_frame(&mut host, due[0]);
            assert!(report.is_some());
            assert_eq!(host.pending_frames().len(), 1);
        }
    }

    #[test]
    fn test_stale_request_is_ignored() {
        let mut host = ManualHost::new();
        let mut component = mount(&mut host, SurfaceSize::new(600, 400));

        let first = host.take_due_frames()[0];
        assert!(component.on_frame(&mut host, first).is_some());
        // Delivering the same request twice must not draw or fork the chain
        assert!(component.on_frame(&mut host, first).is_none());
        assert_eq!(host.pending_frames().len(), 1);
    }

    #[test]
    fn test_resize_regenerates_without_restarting_chain() {
        let mut host = ManualHost::new();
        let mut component = mount(&mut host, SurfaceSize::new(600, 400));
        let pending = component.pending_frame();
        let generation = component.field().generation();

        component.surface_mut().set_layout_size(SurfaceSize::new(300, 200));
        assert!(component.on_resize(component.resize_listener()));

        assert_eq!(component.field().generation(), generation + 1);
        assert_eq!(component.field().len(), 10);
        assert_eq!(component.surface().backing_size(), SurfaceSize::new(300, 200));
        assert_eq!(component.pending_frame(), pending);
        assert_eq!(host.pending_frames().len(), 1);
    }

    #[test]
    fn test_resize_for_other_listener_is_ignored() {
        let mut host = ManualHost::new();
        let mut component = mount(&mut host, SurfaceSize::new(600, 400));
        let generation = component.field().generation();

        assert!(!component.on_resize(ListenerId(9999)));
        assert_eq!(component.field().generation(), generation);
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let mut host = ManualHost::new();
        let component = mount(&mut host, SurfaceSize::new(600, 400));

        let surface = component.unmount(&mut host);
        assert!(host.pending_frames().is_empty());
        assert_eq!(host.listener_count(), 0);

        let drawn = surface.commands().len();
        assert!(host.take_due_frames().is_empty());
        assert_eq!(surface.commands().len(), drawn);
    }
}
