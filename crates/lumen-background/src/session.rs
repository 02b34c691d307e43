//! Background session lifecycle: start, frame callbacks, teardown.

use lumen_core::{AnimatorSettings, Capabilities, Point, Pointer, Theme, Viewport};
use rand::Rng;

use crate::animator::Animator;
use crate::raster::Raster;

/// Host events a running session listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    PointerMove,
}

/// Identifies a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Environment a session runs in: event subscriptions and frame scheduling.
pub trait Host {
    fn subscribe(&mut self, event: HostEvent);
    fn unsubscribe(&mut self, event: HostEvent);
    /// Ask for [`BackgroundSession::on_frame`] to be called once, soon.
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug)]
struct Running<R> {
    animator: Animator<R>,
    raster: Raster,
    pending: Option<FrameHandle>,
    /// Set once the first frame has been drawn into `raster`.
    drawn: bool,
}

#[derive(Debug)]
enum Mode<R> {
    /// Static gradient only; terminal for the session.
    Static,
    Animated(Box<Running<R>>),
    Ended,
}

/// One lifetime of the background, from start to [`end`](Self::end).
#[derive(Debug)]
pub struct BackgroundSession<R> {
    theme: Theme,
    mode: Mode<R>,
}

impl<R: Rng> BackgroundSession<R> {
    /// Start a session.
    ///
    /// When `capabilities` forbid animation, or there is nothing to draw on,
    /// the session stays static and never touches `host`.
    pub fn start<H: Host>(
        host: &mut H,
        capabilities: Capabilities,
        settings: AnimatorSettings,
        viewport: Viewport,
        pixel_scale: f32,
        theme: Theme,
        rng: R,
    ) -> Self {
        if !capabilities.allows_animation() {
            log::info!(
                "background animation disabled (reduced motion: {}, mobile: {})",
                capabilities.reduced_motion,
                capabilities.mobile
            );
            return Self::static_session(theme);
        }
        if viewport.is_empty() {
            log::debug!("no drawing area, background stays static");
            return Self::static_session(theme);
        }

        let animator = Animator::new(settings, viewport, theme, rng);
        let raster = Raster::new(viewport, pixel_scale, theme.palette().background);
        log::info!(
            "background animation started: {} nodes over {}x{}",
            animator.nodes().len(),
            viewport.width,
            viewport.height
        );

        host.subscribe(HostEvent::Resize);
        host.subscribe(HostEvent::PointerMove);
        let pending = Some(host.request_frame());

        Self {
            theme,
            mode: Mode::Animated(Box::new(Running {
                animator,
                raster,
                pending,
                drawn: false,
            })),
        }
    }

    fn static_session(theme: Theme) -> Self {
        Self {
            theme,
            mode: Mode::Static,
        }
    }

    /// Frame callback: update, draw and request the next frame.
    ///
    /// Callbacks for handles that are no longer pending are ignored.
    pub fn on_frame<H: Host>(&mut self, host: &mut H, handle: FrameHandle) {
        let Mode::Animated(running) = &mut self.mode else {
            return;
        };
        if running.pending != Some(handle) {
            return;
        }

        running.animator.step();
        running.animator.draw(&mut running.raster);
        running.drawn = true;
        running.pending = Some(host.request_frame());
    }

    /// Resize the drawing surface. Nodes and pulses carry over.
    pub fn on_resize(&mut self, viewport: Viewport) {
        let Mode::Animated(running) = &mut self.mode else {
            return;
        };
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        running.animator.resize(viewport);
        running
            .raster
            .resize(viewport, self.theme.palette().background);
    }

    /// Track the pointer, given in viewport units.
    pub fn on_pointer_move(&mut self, position: Point) {
        let Mode::Animated(running) = &mut self.mode else {
            return;
        };
        let pointer = Pointer::from_position(position, running.animator.viewport());
        running.animator.set_pointer(pointer);
    }

    /// Switch theme for subsequent frames.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Mode::Animated(running) = &mut self.mode {
            running.animator.set_theme(theme);
        }
    }

    /// Tear down: drop subscriptions and cancel the pending frame. Safe to
    /// call more than once.
    pub fn end<H: Host>(&mut self, host: &mut H) {
        if let Mode::Animated(running) = &mut self.mode {
            host.unsubscribe(HostEvent::Resize);
            host.unsubscribe(HostEvent::PointerMove);
            if let Some(handle) = running.pending.take() {
                host.cancel_frame(handle);
            }
            log::info!("background animation stopped");
        }
        self.mode = Mode::Ended;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_animated(&self) -> bool {
        matches!(self.mode, Mode::Animated(_))
    }

    /// The drawing surface, once animating and drawn at least once. Until
    /// then the static gradient stands in.
    pub fn raster(&self) -> Option<&Raster> {
        match &self.mode {
            Mode::Animated(running) if running.drawn => Some(&running.raster),
            _ => None,
        }
    }

    pub fn animator(&self) -> Option<&Animator<R>> {
        match &self.mode {
            Mode::Animated(running) => Some(&running.animator),
            _ => None,
        }
    }

    /// Handle of the frame callback currently awaited.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match &self.mode {
            Mode::Animated(running) => running.pending,
            _ => None,
        }
    }
}
