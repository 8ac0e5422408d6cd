//! Merge Blocks - a drag-and-drop block merging game
//!
//! Core modules:
//! - `sim`: Deterministic merge engine (catalog, recipes, collisions)
//! - `platform`: Input events and spawn cooldown
//! - `renderer`: Label layout and Canvas 2D drawing
//! - `settings`: Player/game configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Catalog, MergeEngine};

/// Game configuration constants
pub mod consts {
    /// Side length of every block (square)
    pub const BLOCK_SIZE: f32 = 50.0;

    /// Default spawn cooldown (milliseconds)
    pub const SPAWN_COOLDOWN_MS: f64 = 2000.0;

    /// Label font bounds (pixels)
    pub const LABEL_MAX_FONT_PX: f32 = 16.0;
    pub const LABEL_MIN_FONT_PX: f32 = 10.0;
    /// Horizontal room kept free around a label
    pub const LABEL_PADDING: f32 = 10.0;
    /// Distance between wrapped label lines
    pub const LABEL_LINE_HEIGHT: f32 = 20.0;
}
