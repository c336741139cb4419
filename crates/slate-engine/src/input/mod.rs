//! Input identifiers.
//!
//! The public types are platform-agnostic; the runtime translates winit
//! events into them before invoking application callbacks.

mod platform;
mod types;

pub(crate) use platform::{map_key, map_mouse_button};
pub use types::{Key, MouseButton};
