//! Merge engine
//!
//! Owns the live block collection. Blocks are spawned, dragged and dropped
//! by the caller; on spawn and on drop the engine looks for an overlapping
//! partner with a recipe and replaces the pair with the recipe result.
//!
//! Resolution rules:
//! - partners are scanned in storage order, the first overlapping block
//!   with a recipe wins
//! - at most one merge per resolution pass; the new block does not react
//!   to its neighbours unless cascading is enabled in [`Settings`]
//! - the result lands on the midpoint of the two inputs' top-left corners
//!   and is appended to the end of the collection

use std::sync::Arc;

use glam::Vec2;

use super::catalog::Catalog;
use super::state::{Block, BlockId, BlockView, DragStart, MergeEvent, SpawnOutcome};
use crate::settings::Settings;

/// Rejected engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),

    #[error("no block {0} on the board")]
    UnknownBlock(BlockId),
}

/// Where a merge result is placed: midpoint of the inputs' top-left corners
#[inline]
pub fn merge_point(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) / 2.0
}

/// The board and its merge rules
#[derive(Debug, Clone)]
pub struct MergeEngine {
    catalog: Arc<Catalog>,
    /// Live blocks in storage order (drives tie-breaks)
    blocks: Vec<Block>,
    /// Block currently held by the pointer
    dragged: Option<BlockId>,
    /// Keep resolving with each merge result as the new trigger
    cascade: bool,
    next_id: u32,
}

impl MergeEngine {
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            blocks: Vec::new(),
            dragged: None,
            cascade: false,
            next_id: 1,
        }
    }

    pub fn with_settings(catalog: impl Into<Arc<Catalog>>, settings: &Settings) -> Self {
        let mut engine = Self::new(catalog);
        engine.cascade = settings.cascade_merges;
        engine
    }

    pub fn set_cascade(&mut self, cascade: bool) {
        self.cascade = cascade;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Live blocks in storage order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block currently being dragged
    pub fn dragged(&self) -> Option<BlockId> {
        self.dragged
    }

    /// Remove every block (ids keep counting up)
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.dragged = None;
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Place a new block centered on `center`, then resolve collisions for it
    pub fn spawn(&mut self, kind: &str, center: Vec2) -> Result<SpawnOutcome, EngineError> {
        if !self.catalog.contains(kind) {
            return Err(EngineError::UnknownBlockType(kind.to_string()));
        }

        let id = self.next_block_id();
        self.blocks.push(Block::centered(id, kind, center));
        log::debug!("Spawned {} {} at {:?}", kind, id, center);

        let merges = self.settle(id);
        Ok(SpawnOutcome { spawned: id, merges })
    }

    /// Move a block's center to `center` without resolving collisions
    pub fn move_block(&mut self, id: BlockId, center: Vec2) -> Result<(), EngineError> {
        let idx = self.index_of(id).ok_or(EngineError::UnknownBlock(id))?;
        self.blocks[idx].set_center(center);
        Ok(())
    }

    /// Pick up the first block (storage order) under `point`.
    ///
    /// A drag that never saw its release is dropped first, with the usual
    /// collision resolution, before the new pick is hit-tested.
    pub fn begin_drag(&mut self, point: Vec2) -> DragStart {
        let dropped = self.end_drag();
        if !dropped.is_empty() {
            log::debug!("Resolved unreleased drag: {} merge(s)", dropped.len());
        }

        let picked = self
            .blocks
            .iter_mut()
            .find(|b| b.bounds().contains_point(point))
            .map(|block| {
                block.dragging = true;
                block.id
            });
        self.dragged = picked;
        DragStart { picked, dropped }
    }

    /// Follow the pointer with the dragged block. Returns false when nothing
    /// is held.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        let Some(id) = self.dragged else {
            return false;
        };
        self.move_block(id, point).is_ok()
    }

    /// Drop the dragged block and resolve collisions for it
    pub fn end_drag(&mut self) -> Vec<MergeEvent> {
        let Some(id) = self.dragged.take() else {
            return Vec::new();
        };
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.blocks[idx].dragging = false;
        self.settle(id)
    }

    /// Resolve from `trigger`, continuing down the chain when cascading
    fn settle(&mut self, trigger: BlockId) -> Vec<MergeEvent> {
        let mut merges = Vec::new();
        let mut trigger = trigger;
        // Each merge removes one block net, so this terminates
        while let Some(event) = self.resolve_collisions(trigger) {
            trigger = event.produced;
            merges.push(event);
            if !self.cascade {
                break;
            }
        }
        merges
    }

    /// Merge `trigger` with the first overlapping partner that has a recipe.
    ///
    /// Performs at most one merge. Returns `None` (and leaves the board as
    /// is) when the trigger is gone or nothing matches.
    pub fn resolve_collisions(&mut self, trigger: BlockId) -> Option<MergeEvent> {
        let t_idx = self.index_of(trigger)?;
        let t = &self.blocks[t_idx];
        let t_bounds = t.bounds();

        let (o_idx, result) = self
            .blocks
            .iter()
            .enumerate()
            .filter(|&(i, other)| i != t_idx && t_bounds.overlaps(&other.bounds()))
            .find_map(|(i, other)| {
                self.catalog
                    .merge_result(&t.kind, &other.kind)
                    .map(|r| (i, r.to_string()))
            })?;

        debug_assert!(
            self.catalog.contains(&result),
            "catalog load admits only known recipe results"
        );

        let other = &self.blocks[o_idx];
        let partner = other.id;
        let at = merge_point(t.pos, other.pos);
        log::debug!(
            "Merge {} {} + {} {} -> {}",
            t.kind,
            trigger,
            other.kind,
            partner,
            result
        );

        self.blocks.retain(|b| b.id != trigger && b.id != partner);
        if matches!(self.dragged, Some(id) if id == trigger || id == partner) {
            self.dragged = None;
        }

        let produced = self.next_block_id();
        self.blocks.push(Block::new(produced, result.as_str(), at));

        Some(MergeEvent {
            consumed: [trigger, partner],
            produced,
            result,
            at,
        })
    }

    /// Per-frame render data, in storage order
    pub fn views(&self, locale: &str) -> Vec<BlockView<'_>> {
        self.blocks
            .iter()
            .map(|b| BlockView {
                id: b.id,
                kind: &b.kind,
                color: self.catalog.color(&b.kind).unwrap_or_default(),
                display_name: self.catalog.display_name(&b.kind, locale),
                pos: b.pos,
                size: b.size(),
                dragging: b.dragging,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MergeEngine {
        MergeEngine::new(Catalog::builtin().unwrap())
    }

    /// Spawn position for a block whose top-left should be at (x, y)
    fn tl(x: f32, y: f32) -> Vec2 {
        Vec2::new(x + 25.0, y + 25.0)
    }

    fn kinds(engine: &MergeEngine) -> Vec<&str> {
        engine.blocks().iter().map(|b| b.kind.as_str()).collect()
    }

    #[test]
    fn test_two_lava_make_water() {
        let mut e = engine();
        let first = e.spawn("Lava", Vec2::new(200.0, 200.0)).unwrap();
        assert!(first.merges.is_empty());

        let second = e.spawn("Lava", Vec2::new(200.0, 200.0)).unwrap();
        assert_eq!(second.merges.len(), 1);
        assert_eq!(kinds(&e), vec!["Water"]);

        let merge = &second.merges[0];
        assert_eq!(merge.consumed, [second.spawned, first.spawned]);
        assert_eq!(merge.result, "Water");
        assert_eq!(e.blocks()[0].pos, Vec2::new(175.0, 175.0));
    }

    #[test]
    fn test_no_recipe_leaves_board_alone() {
        let mut e = engine();
        e.spawn("Water", tl(0.0, 0.0)).unwrap();
        let out = e.spawn("Water", tl(10.0, 10.0)).unwrap();
        assert!(out.merges.is_empty());
        assert_eq!(kinds(&e), vec!["Water", "Water"]);
        assert_eq!(e.blocks()[1].pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_touching_edges_do_not_merge() {
        let mut e = engine();
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        let out = e.spawn("Lava", tl(50.0, 0.0)).unwrap();
        assert!(out.merges.is_empty());
        assert_eq!(e.len(), 2);

        let out = e.spawn("Lava", tl(200.0, 50.0)).unwrap();
        assert!(out.merges.is_empty());
        let below = e.spawn("Lava", tl(200.0, 100.0)).unwrap();
        assert!(below.merges.is_empty());
        assert_eq!(e.len(), 4);
    }

    #[test]
    fn test_merge_point_is_corner_midpoint() {
        assert_eq!(
            merge_point(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)),
            Vec2::new(50.0, 0.0)
        );

        let mut e = engine();
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        let out = e.spawn("Lava", tl(30.0, 20.0)).unwrap();
        assert_eq!(out.merges[0].at, Vec2::new(15.0, 10.0));
        assert_eq!(e.blocks()[0].pos, Vec2::new(15.0, 10.0));
    }

    #[test]
    fn test_single_merge_per_call() {
        let mut e = engine();
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        e.spawn("Lava", tl(100.0, 0.0)).unwrap();
        // Park the second lava on top of the first without resolving
        let second = e.blocks()[1].id;
        e.move_block(second, tl(5.0, 0.0)).unwrap();
        assert_eq!(e.len(), 2);

        // Third lava overlaps both; matches the first in storage order
        let out = e.spawn("Lava", tl(2.0, 0.0)).unwrap();
        assert_eq!(out.merges.len(), 1);
        assert_eq!(e.len(), 2);
        // The new water overlaps the remaining lava (a valid recipe) but
        // does not react on its own
        assert_eq!(kinds(&e), vec!["Lava", "Water"]);
        assert_eq!(e.blocks()[0].id, second);
    }

    #[test]
    fn test_cascade_chains_when_enabled() {
        let mut e = engine();
        e.set_cascade(true);
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        e.spawn("Lava", tl(100.0, 0.0)).unwrap();
        let second = e.blocks()[1].id;
        e.move_block(second, tl(5.0, 0.0)).unwrap();

        let out = e.spawn("Lava", tl(2.0, 0.0)).unwrap();
        assert_eq!(out.merges.len(), 2);
        assert_eq!(out.merges[0].result, "Water");
        assert_eq!(out.merges[1].result, "SodaStone");
        assert_eq!(out.merges[1].consumed[0], out.merges[0].produced);
        assert_eq!(kinds(&e), vec!["SodaStone"]);
    }

    #[test]
    fn test_first_in_storage_order_wins() {
        let mut e = engine();
        // Lava and SodaStone both react with Water
        e.spawn("SodaStone", tl(0.0, 0.0)).unwrap();
        e.spawn("Lava", tl(40.0, 0.0)).unwrap();
        let water = e.spawn("Water", tl(300.0, 0.0)).unwrap().spawned;

        e.move_block(water, tl(20.0, 0.0)).unwrap();
        let merge = e.resolve_collisions(water).unwrap();
        assert_eq!(merge.result, "Ocean");
        assert_eq!(kinds(&e), vec!["Lava", "Ocean"]);
    }

    #[test]
    fn test_drag_water_onto_soda_stone() {
        let mut e = engine();
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        e.spawn("SodaStone", tl(40.0, 0.0)).unwrap();
        let water = e.spawn("Water", tl(300.0, 300.0)).unwrap().spawned;
        assert_eq!(e.len(), 3);

        assert_eq!(e.begin_drag(Vec2::new(325.0, 325.0)).picked, Some(water));
        // Over the SodaStone but clear of the Lava
        assert!(e.drag_to(tl(80.0, 0.0)));
        assert_eq!(e.len(), 3, "no merge while dragging");
        assert!(e.block(water).unwrap().dragging);

        let merges = e.end_drag();
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].result, "Ocean");
        assert_eq!(merges[0].at, Vec2::new(60.0, 0.0));
        assert_eq!(kinds(&e), vec!["Lava", "Ocean"]);
        assert_eq!(e.blocks()[0].pos, Vec2::ZERO);
        assert_eq!(e.dragged(), None);
    }

    #[test]
    fn test_drag_miss_and_drop_without_partner() {
        let mut e = engine();
        let id = e.spawn("Ocean", tl(0.0, 0.0)).unwrap().spawned;

        assert_eq!(e.begin_drag(Vec2::new(500.0, 500.0)).picked, None);
        assert!(!e.drag_to(Vec2::new(10.0, 10.0)));
        assert!(e.end_drag().is_empty());

        // Edge of the block is not a hit
        assert_eq!(e.begin_drag(Vec2::new(0.0, 25.0)).picked, None);

        assert_eq!(e.begin_drag(Vec2::new(25.0, 25.0)).picked, Some(id));
        e.drag_to(Vec2::new(400.0, 300.0));
        assert!(e.end_drag().is_empty());
        let block = e.block(id).unwrap();
        assert_eq!(block.pos, Vec2::new(375.0, 275.0));
        assert!(!block.dragging);
    }

    #[test]
    fn test_unreleased_drag_resolves_on_next_pick() {
        let mut e = engine();
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        let lava = e.spawn("Lava", tl(200.0, 0.0)).unwrap().spawned;
        let water = e.spawn("Water", tl(375.0, 375.0)).unwrap().spawned;

        assert_eq!(e.begin_drag(tl(200.0, 0.0)).picked, Some(lava));
        e.drag_to(tl(5.0, 0.0));
        // Release happened somewhere we never heard about

        let start = e.begin_drag(tl(375.0, 375.0));
        assert_eq!(start.picked, Some(water));
        assert_eq!(start.dropped.len(), 1);
        assert_eq!(start.dropped[0].result, "Water");
        assert_eq!(start.dropped[0].consumed[0], lava);
        assert!(e.end_drag().is_empty());

        assert_eq!(kinds(&e), vec!["Water", "Water"]);
        assert_eq!(e.blocks()[1].pos, Vec2::new(2.5, 0.0));
        assert!(e.blocks().iter().all(|b| !b.dragging));
    }

    #[test]
    fn test_unreleased_drag_resolves_on_miss() {
        let mut e = engine();
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        let lava = e.spawn("Lava", tl(200.0, 0.0)).unwrap().spawned;
        e.begin_drag(tl(200.0, 0.0));
        e.drag_to(tl(10.0, 0.0));

        let start = e.begin_drag(Vec2::new(700.0, 700.0));
        assert_eq!(start.picked, None);
        assert_eq!(start.dropped[0].consumed[0], lava);
        assert_eq!(kinds(&e), vec!["Water"]);
        assert_eq!(e.dragged(), None);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut e = engine();
        let err = e.spawn("Granite", Vec2::ZERO).unwrap_err();
        assert_eq!(err, EngineError::UnknownBlockType("Granite".into()));
        assert!(e.is_empty());
    }

    #[test]
    fn test_move_unknown_block() {
        let mut e = engine();
        let err = e.move_block(BlockId(42), Vec2::ZERO).unwrap_err();
        assert_eq!(err, EngineError::UnknownBlock(BlockId(42)));
    }

    #[test]
    fn test_ids_never_reused() {
        let mut e = engine();
        let a = e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        let b = e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        let produced = b.merges[0].produced;
        assert!(produced > a.spawned && produced > b.spawned);

        e.clear();
        let c = e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        assert!(c.spawned > produced);
    }

    #[test]
    fn test_resolve_missing_trigger() {
        let mut e = engine();
        assert!(e.resolve_collisions(BlockId(9)).is_none());
    }

    #[test]
    fn test_views_expose_render_data() {
        let mut e = engine();
        e.spawn("SodaStone", tl(10.0, 20.0)).unwrap();
        let views = e.views("ja");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].kind, "SodaStone");
        assert_eq!(views[0].color, "lightblue");
        assert_eq!(views[0].display_name, "ソーダ石");
        assert_eq!(views[0].pos, Vec2::new(10.0, 20.0));
        assert_eq!(views[0].size, Vec2::splat(50.0));
    }

    #[test]
    fn test_settings_enable_cascade() {
        let settings = Settings {
            cascade_merges: true,
            ..Default::default()
        };
        let mut e = MergeEngine::with_settings(Catalog::builtin().unwrap(), &settings);
        e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        e.spawn("Lava", tl(200.0, 0.0)).unwrap();
        let second = e.blocks()[1].id;
        e.move_block(second, tl(0.0, 0.0)).unwrap();
        let out = e.spawn("Lava", tl(0.0, 0.0)).unwrap();
        assert_eq!(out.merges.len(), 2);
    }
}
