//! Platform glue that sits between DOM events and the engine
//!
//! Handles:
//! - Input events (pointer drag, spawn key)
//! - Spawn cooldown against a caller-supplied clock
//!
//! Nothing here touches the browser directly, so it runs in native tests.

pub mod cooldown;
pub mod input;

pub use cooldown::Cooldown;
pub use input::{InputEvent, InputState};
