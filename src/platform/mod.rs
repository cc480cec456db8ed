//! Platform abstraction layer
//!
//! The core never talks to devices. Each tick the driver hands it an input
//! snapshot built from whatever windowing layer is in use.

pub mod input;

pub use input::{ButtonState, InputSnapshot, Key, KeyEdge, KeySet};
