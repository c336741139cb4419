use crate::canvas::Canvas;
use crate::input::{Key, MouseButton};

/// Control directive returned by application callbacks.
///
/// Returning `Exit` from any callback shuts the runtime down after the
/// current event is processed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract: one method per host event.
///
/// Every method has a default no-op implementation, so applications override
/// only what they need. The runtime invokes these on the thread owning the
/// window and GPU context; no callback is re-entered.
pub trait App {
    /// Called once before the first frame, with the process arguments the
    /// runtime was configured with (opaque pass-through data).
    fn on_startup(&mut self, args: &[String]) -> AppControl {
        let _ = args;
        AppControl::Continue
    }

    /// Called once per frame before painting, with the clamped frame delta
    /// in seconds.
    fn on_update(&mut self, dt: f32) -> AppControl {
        let _ = dt;
        AppControl::Continue
    }

    /// Called once per frame between the canvas's `begin` and `end`. All
    /// drawing happens here.
    fn on_paint(&mut self, canvas: &mut Canvas) -> AppControl {
        let _ = canvas;
        AppControl::Continue
    }

    /// Called once when the runtime shuts down.
    fn on_shutdown(&mut self) {}

    /// Called on key press (including key repeats).
    fn on_key_press(&mut self, key: Key) -> AppControl {
        let _ = key;
        AppControl::Continue
    }

    /// Called on mouse button press.
    fn on_mouse_button_press(&mut self, button: MouseButton) -> AppControl {
        let _ = button;
        AppControl::Continue
    }

    /// Called on cursor movement, in physical pixels so positions line up
    /// with canvas drawing coordinates.
    fn on_cursor_move(&mut self, x: f32, y: f32) -> AppControl {
        let _ = (x, y);
        AppControl::Continue
    }

    /// Called after the framebuffer size changed; the runtime has already
    /// resized the surface and the canvas.
    fn on_window_resize(&mut self, width: u32, height: u32) -> AppControl {
        let _ = (width, height);
        AppControl::Continue
    }
}
