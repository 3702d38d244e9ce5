use winit::event::WindowEvent;

use super::ctx::{FrameCtx, InitCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Lifecycle: `init` once after the window and GPU exist, then `on_frame`
/// once per redraw until the window closes or a callback returns
/// [`AppControl::Exit`], then `on_exit` once before the GPU and window drop.
pub trait App {
    /// Creates GPU resources. An error aborts startup and is returned from
    /// [`Runtime::run`](crate::window::Runtime::run).
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> anyhow::Result<()>;

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once at shutdown.
    fn on_exit(&mut self) {}
}
