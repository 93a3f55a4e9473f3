//! Platform abstraction layer
//!
//! Inbound collaborators the frame driver polls:
//! - Time (`Clock`)
//! - Input sampling (`InputSource`)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock};
pub use input::{InputSample, InputSource, ScriptedInput};
