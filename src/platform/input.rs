//! Input handling
//!
//! Turns discrete pointer/keyboard events into engine calls. Pointer
//! coordinates are canvas-local.

use glam::Vec2;

use super::cooldown::Cooldown;
use crate::settings::Settings;
use crate::sim::{EngineError, MergeEngine, MergeEvent};

/// A single user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button pressed at a position (starts a drag if it hits a block)
    PointerDown(Vec2),
    /// Pointer moved (drags the held block, if any)
    PointerMove(Vec2),
    /// Button released (drops the held block)
    PointerUp,
    /// Spawn key pressed (drops a new block under the pointer)
    SpawnKey,
}

/// Per-session input state
#[derive(Debug, Clone)]
pub struct InputState {
    /// Last known pointer position (spawn location)
    pointer: Vec2,
    cooldown: Cooldown,
    cooldown_ms: f64,
    spawn_type: String,
}

impl InputState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pointer: Vec2::ZERO,
            cooldown: Cooldown::new(),
            cooldown_ms: settings.spawn_cooldown_ms,
            spawn_type: settings.default_spawn_type.clone(),
        }
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// Apply one event at time `now` (milliseconds).
    ///
    /// Returns the merges it caused. A press while a block is still held
    /// drops that block first. A spawn during cooldown is dropped silently.
    pub fn handle(
        &mut self,
        engine: &mut MergeEngine,
        event: InputEvent,
        now: f64,
    ) -> Result<Vec<MergeEvent>, EngineError> {
        match event {
            InputEvent::PointerDown(pos) => {
                self.pointer = pos;
                let start = engine.begin_drag(pos);
                if let Some(id) = start.picked {
                    log::debug!("Picked up {}", id);
                }
                Ok(start.dropped)
            }
            InputEvent::PointerMove(pos) => {
                self.pointer = pos;
                engine.drag_to(pos);
                Ok(Vec::new())
            }
            InputEvent::PointerUp => Ok(engine.end_drag()),
            InputEvent::SpawnKey => {
                if !self.cooldown.is_ready(now) {
                    log::debug!(
                        "Spawn ignored, cooldown {:.0}ms left",
                        self.cooldown.remaining(now)
                    );
                    return Ok(Vec::new());
                }
                let outcome = engine.spawn(&self.spawn_type, self.pointer)?;
                self.cooldown.trigger(now, self.cooldown_ms);
                Ok(outcome.merges)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Catalog;

    fn setup() -> (MergeEngine, InputState) {
        let settings = Settings::default();
        let engine = MergeEngine::with_settings(Catalog::builtin().unwrap(), &settings);
        (engine, InputState::new(&settings))
    }

    #[test]
    fn test_spawn_at_pointer() {
        let (mut engine, mut input) = setup();
        input
            .handle(&mut engine, InputEvent::PointerMove(Vec2::new(100.0, 80.0)), 0.0)
            .unwrap();
        input.handle(&mut engine, InputEvent::SpawnKey, 0.0).unwrap();

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.blocks()[0].kind, "Lava");
        assert_eq!(engine.blocks()[0].pos, Vec2::new(75.0, 55.0));
    }

    #[test]
    fn test_spawn_cooldown_is_silent() {
        let (mut engine, mut input) = setup();
        input.handle(&mut engine, InputEvent::SpawnKey, 0.0).unwrap();
        let merges = input.handle(&mut engine, InputEvent::SpawnKey, 1999.0).unwrap();
        assert!(merges.is_empty());
        assert_eq!(engine.len(), 1);

        // Cooldown over: same spot, two lava make water
        let merges = input.handle(&mut engine, InputEvent::SpawnKey, 2000.0).unwrap();
        assert_eq!(merges.len(), 1);
        assert_eq!(engine.blocks()[0].kind, "Water");
    }

    #[test]
    fn test_drag_and_drop_cycle() {
        let (mut engine, mut input) = setup();
        let water = engine.spawn("Water", Vec2::new(300.0, 300.0)).unwrap().spawned;
        engine.spawn("Lava", Vec2::new(25.0, 25.0)).unwrap();

        input
            .handle(&mut engine, InputEvent::PointerDown(Vec2::new(300.0, 300.0)), 0.0)
            .unwrap();
        assert_eq!(engine.dragged(), Some(water));

        input
            .handle(&mut engine, InputEvent::PointerMove(Vec2::new(40.0, 30.0)), 0.0)
            .unwrap();
        assert_eq!(engine.len(), 2);

        let merges = input.handle(&mut engine, InputEvent::PointerUp, 0.0).unwrap();
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].result, "SodaStone");
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_press_without_release_drops_held_block() {
        let (mut engine, mut input) = setup();
        engine.spawn("Lava", Vec2::new(25.0, 25.0)).unwrap();
        engine.spawn("Lava", Vec2::new(225.0, 25.0)).unwrap();
        engine.spawn("Water", Vec2::new(400.0, 400.0)).unwrap();

        input
            .handle(&mut engine, InputEvent::PointerDown(Vec2::new(225.0, 25.0)), 0.0)
            .unwrap();
        input
            .handle(&mut engine, InputEvent::PointerMove(Vec2::new(30.0, 25.0)), 0.0)
            .unwrap();

        // Release landed outside the canvas and was never delivered
        let merges = input
            .handle(&mut engine, InputEvent::PointerDown(Vec2::new(400.0, 400.0)), 0.0)
            .unwrap();
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].result, "Water");
        assert_eq!(merges[0].at, Vec2::new(2.5, 0.0));

        let merges = input.handle(&mut engine, InputEvent::PointerUp, 0.0).unwrap();
        assert!(merges.is_empty());
        let kinds: Vec<_> = engine.blocks().iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Water", "Water"]);
    }

    #[test]
    fn test_unknown_spawn_type_does_not_start_cooldown() {
        let settings = Settings {
            default_spawn_type: "Plasma".into(),
            ..Default::default()
        };
        let mut engine = MergeEngine::new(Catalog::builtin().unwrap());
        let mut input = InputState::new(&settings);

        let err = input.handle(&mut engine, InputEvent::SpawnKey, 0.0).unwrap_err();
        assert_eq!(err, EngineError::UnknownBlockType("Plasma".into()));
        assert!(input.cooldown().is_ready(0.0));
        assert!(engine.is_empty());
    }
}
