//! Window + runtime loop.
//!
//! Owns the winit EventLoop and the single application window, and wires
//! them to the GPU layer and the canvas.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
