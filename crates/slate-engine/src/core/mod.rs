//! Engine-facing application contract.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! application: one callback per windowing event plus the per-frame paint
//! hook that receives the canvas.

mod app;

pub use app::{App, AppControl};
