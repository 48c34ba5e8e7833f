use crate::game::{Overlay, OverlayButton};
use crate::{Game, Input, Renderer, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// Simulation runs at 10 Hz during play; overlays poll faster so menu
// clicks feel immediate without burning CPU on gameplay ticks.
const PLAY_TICK_INTERVAL: f64 = 100.0;
const OVERLAY_TICK_INTERVAL: f64 = 33.0;

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
    last_update: f64,
}

impl GameLoop {
    fn new() -> Result<Self, JsValue> {
        let game = Game::new();
        let mut renderer = WebRenderer::new("gameCanvas")?;
        renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no window")?;
        let performance = window.performance().ok_or("no performance")?;
        let last_update = performance.now();

        Ok(Self {
            game,
            renderer,
            last_update,
        })
    }

    fn update_frame(&mut self, current_time: f64) -> Result<(), JsValue> {
        // Poll for input
        if let Some(input) = self
            .renderer
            .poll_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            match input {
                Input::Direction(direction) => {
                    self.game.steer(direction);
                }
                Input::Escape => {
                    self.game.open_menu();
                }
                Input::Click { x, y } => {
                    if self.game.handle_click(x, y) == Some(OverlayButton::Exit) {
                        // In web, we can't really quit, just log it
                        web_sys::console::log_1(&"Exit requested".into());
                    }
                }
                Input::Quit => {
                    web_sys::console::log_1(&"Game quit".into());
                }
            }
        }

        // Update game logic at fixed rate
        let interval = if self.game.overlay == Overlay::None {
            PLAY_TICK_INTERVAL
        } else {
            OVERLAY_TICK_INTERVAL
        };
        if current_time - self.last_update >= interval {
            self.game.tick();
            self.last_update = current_time;
        }

        // Render (renderer manages its own frame rate)
        self.renderer
            .render(&self.game)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(())
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting game initialization...".into());

    // Create game loop
    let game_loop = match GameLoop::new() {
        Ok(gl) => Rc::new(RefCell::new(gl)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game loop: {:?}", e).into());
            return Err(e);
        }
    };

    // Setup requestAnimationFrame loop
    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    // Create closure for animation frame
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let game_loop_clone = game_loop.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let current_time = performance.now();

        // Update game frame
        if let Err(e) = game_loop_clone.borrow_mut().update_frame(current_time) {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        // Schedule next frame
        let window = web_sys::window().unwrap();
        window
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    // Start the loop
    window
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        .unwrap();

    web_sys::console::log_1(&"[WASM] Game loop started".into());

    Ok(())
}
