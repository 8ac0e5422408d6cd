//! Merge Blocks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use merge_blocks::Settings;
    use merge_blocks::platform::{InputEvent, InputState};
    use merge_blocks::renderer::CanvasRenderer;
    use merge_blocks::sim::{Catalog, MergeEngine};

    /// Game instance holding all state
    struct Game {
        engine: MergeEngine,
        input: InputState,
        settings: Settings,
        renderer: CanvasRenderer,
    }

    impl Game {
        /// Feed one input event through to the engine
        fn handle(&mut self, event: InputEvent) {
            let now = js_sys::Date::now();
            match self.input.handle(&mut self.engine, event, now) {
                Ok(merges) => {
                    for merge in merges {
                        log::info!("Merged into {} at {:?}", merge.result, merge.at);
                    }
                }
                Err(e) => log::error!("Input rejected: {}", e),
            }
        }

        /// Render the current frame
        fn render(&self) {
            self.renderer.render(&self.engine.views(&self.settings.locale));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Merge Blocks starting...");

        let catalog = Catalog::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let settings = Settings::load();
        settings
            .validate(&catalog)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        log::info!(
            "Catalog: {} block types, {} recipes",
            catalog.types().len(),
            catalog.recipes().len()
        );

        let game = Rc::new(RefCell::new(Game {
            engine: MergeEngine::with_settings(catalog, &settings),
            input: InputState::new(&settings),
            settings,
            renderer: CanvasRenderer::new(canvas.clone(), ctx),
        }));

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Merge Blocks running!");
        Ok(())
    }

    /// Canvas-local pointer position
    fn pointer_pos(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - pick up a block
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = pointer_pos(&canvas_clone, &event);
                game.borrow_mut().handle(InputEvent::PointerDown(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - track spawn position, drag held block
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = pointer_pos(&canvas_clone, &event);
                game.borrow_mut().handle(InputEvent::PointerMove(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            log::error!("no window, mouse-up and keyboard input disabled");
            return;
        };

        // Mouse up - drop and merge (window, so releases off the canvas count)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle(InputEvent::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().handle(InputEvent::SpawnKey);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow().render();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use merge_blocks::platform::{InputEvent, InputState};
    use merge_blocks::{Catalog, MergeEngine, Settings};

    env_logger::init();
    log::info!("Merge Blocks (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Bad catalog: {}", e);
            std::process::exit(1);
        }
    };
    let settings = Settings::load();
    if let Err(e) = settings.validate(&catalog) {
        log::error!("Bad settings: {}", e);
        std::process::exit(1);
    }

    // Scripted session: two lava -> water, lava onto water -> soda stone
    let mut engine = MergeEngine::with_settings(catalog, &settings);
    let mut input = InputState::new(&settings);
    let cooldown = settings.spawn_cooldown_ms;
    let script = [
        (0.0, InputEvent::PointerMove(Vec2::new(100.0, 100.0))),
        (0.0, InputEvent::SpawnKey),
        (cooldown, InputEvent::SpawnKey),
        (cooldown, InputEvent::PointerMove(Vec2::new(300.0, 100.0))),
        (cooldown * 2.0, InputEvent::SpawnKey),
        (cooldown * 2.0, InputEvent::PointerDown(Vec2::new(300.0, 100.0))),
        (cooldown * 2.0, InputEvent::PointerMove(Vec2::new(110.0, 100.0))),
        (cooldown * 2.0, InputEvent::PointerUp),
    ];

    for (now, event) in script {
        match input.handle(&mut engine, event, now) {
            Ok(merges) => {
                for merge in merges {
                    println!("merged into {} at {:?}", merge.result, merge.at);
                }
            }
            Err(e) => log::error!("Input rejected: {}", e),
        }
    }

    for view in engine.views(&settings.locale) {
        println!("{} {} at {:?}", view.id, view.display_name, view.pos);
    }
}
