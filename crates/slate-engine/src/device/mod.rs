//! GPU device + surface management.
//!
//! Owns the wgpu Instance/Adapter/Device/Queue and the window surface, hands
//! out per-frame texture views, and triages surface errors. Command encoding
//! is left to the canvas.

mod gpu;

pub use gpu::{Frame, Gpu, GpuInit, SurfaceErrorAction};
