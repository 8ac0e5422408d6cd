//! Board entities and the events the engine emits

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::BLOCK_SIZE;

/// Engine-assigned block identity (never reused within one engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A block placed on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Block type id (key into the catalog)
    pub kind: String,
    /// Top-left corner
    pub pos: Vec2,
    /// Held by the pointer
    pub dragging: bool,
}

impl Block {
    pub fn new(id: BlockId, kind: impl Into<String>, pos: Vec2) -> Self {
        Self {
            id,
            kind: kind.into(),
            pos,
            dragging: false,
        }
    }

    /// Create a block whose center sits on `center`
    pub fn centered(id: BlockId, kind: impl Into<String>, center: Vec2) -> Self {
        Self::new(id, kind, center - Vec2::splat(BLOCK_SIZE / 2.0))
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::splat(BLOCK_SIZE)
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size())
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    /// Move so the block's center sits on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size() / 2.0;
    }
}

/// Two blocks were replaced by one
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    /// Trigger first, then the partner it matched
    pub consumed: [BlockId; 2],
    pub produced: BlockId,
    /// Type id of the produced block
    pub result: String,
    /// Top-left of the produced block
    pub at: Vec2,
}

/// Result of a spawn request
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnOutcome {
    /// The block that was spawned (may already be consumed by `merges`)
    pub spawned: BlockId,
    pub merges: Vec<MergeEvent>,
}

/// Result of a pointer press
#[derive(Debug, Clone, PartialEq)]
pub struct DragStart {
    /// Block now held, if the press hit one
    pub picked: Option<BlockId>,
    /// Merges from dropping a drag whose release was never reported
    pub dropped: Vec<MergeEvent>,
}

/// Read-only snapshot of a block for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView<'a> {
    pub id: BlockId,
    pub kind: &'a str,
    pub color: &'a str,
    pub display_name: &'a str,
    pub pos: Vec2,
    pub size: Vec2,
    pub dragging: bool,
}
