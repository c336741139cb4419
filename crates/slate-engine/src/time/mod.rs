//! Frame timing.
//!
//! One [`FrameClock`] per render loop; call `tick()` once per presented
//! frame to obtain the delta fed to `App::on_update`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
