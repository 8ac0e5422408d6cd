//! Deterministic merge simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - No clocks (time is passed in by callers)
//! - Stable iteration order (storage order of the block collection)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod engine;
pub mod recipe;
pub mod state;

pub use catalog::{BlockType, Catalog, CatalogDef, CatalogError, RecipeDef};
pub use collision::Aabb;
pub use engine::{EngineError, MergeEngine, merge_point};
pub use recipe::{PairKey, RecipeTable};
pub use state::{Block, BlockId, BlockView, DragStart, MergeEvent, SpawnOutcome};
