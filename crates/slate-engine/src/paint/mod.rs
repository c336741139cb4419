//! Color model used by the canvas and host applications.
//!
//! Scope:
//! - channel storage and conversions (packed ints, hex, bytes, HSV)
//! - derived colors and compositing/blend operators
//!
//! Colors here are plain immutable values with no GPU dependency.

mod color;

pub use color::{Color, ColorError};
