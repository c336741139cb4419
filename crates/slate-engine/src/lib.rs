//! Slate engine crate.
//!
//! Immediate-mode 2D drawing over wgpu: a window/GPU runtime plus a canvas
//! that re-tessellates and re-uploads every shape on every draw call. There
//! is no retained scene — applications implement [`crate::core::App`] and
//! redraw the whole frame each tick.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod math;
pub mod canvas;
pub mod paint;
