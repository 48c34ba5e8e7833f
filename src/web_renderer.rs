use crate::enemy::EnemyKind;
use crate::entity::{Direction, Position};
use crate::food::FoodKind;
use crate::game::{Game, Overlay, OverlayButton, DIFFICULTY_BUTTONS, GAME_OVER_BUTTONS};
use crate::grid::{GRID_SIZE, WINDOW_SIZE};
use crate::motion_trail::MotionTrail;
use crate::renderer::{Input, Renderer};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
    TouchEvent,
};

const TARGET_FRAME_TIME: f64 = 16.0; // ~60 FPS
const GAME_UPDATE_INTERVAL: f64 = 100.0; // Game logic updates at 10 Hz
const SWIPE_THRESHOLD: f64 = 30.0; // Minimum distance in pixels to register a swipe
const UI_STRIP_HEIGHT: f64 = 60.0;

// Colors (retro palette)
const COLOR_BACKGROUND: &str = "#000000";
const COLOR_SNAKE_HEAD: &str = "#55FF55";
const COLOR_SNAKE_BODY: &str = "#00AA00";
const COLOR_TRAIL: &str = "#FF5555";
const COLOR_UI: &str = "#FFFFFF";
const COLOR_OVERLAY_SHADE: &str = "rgba(0, 0, 0, 0.65)";
const COLOR_BUTTON: &str = "#0000AA";
const COLOR_BUTTON_TEXT: &str = "#FFFFFF";

fn food_color(kind: FoodKind) -> &'static str {
    match kind {
        FoodKind::Square => "#FFFF55",
        FoodKind::Triangle => "#55FFFF",
        FoodKind::Circle => "#FF55FF",
    }
}

fn enemy_color(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Circle => "#FF5555",
        EnemyKind::Square => "#FFAA00",
        EnemyKind::Triangle => "#AA00AA",
    }
}

fn button_label(button: OverlayButton) -> &'static str {
    match button {
        OverlayButton::Easy => "Easy",
        OverlayButton::Medium => "Medium",
        OverlayButton::Hard => "Hard",
        OverlayButton::Restart => "Restart",
        OverlayButton::Exit => "Exit",
    }
}

/// Snapshot of the last simulation tick, for interpolating enemy motion
/// between 10 Hz updates.
#[derive(Clone)]
struct GameSnapshot {
    head: Position,
    enemy_positions: Vec<(f32, f32)>,
    food_position: Position,
}

impl GameSnapshot {
    fn from_game(game: &Game) -> Self {
        Self {
            head: game.snake.head(),
            enemy_positions: game.enemies.iter().map(|e| (e.x, e.y)).collect(),
            food_position: game.food.position,
        }
    }

    fn differs_from(&self, game: &Game) -> bool {
        self.head != game.snake.head()
            || self.food_position != game.food.position
            || self.enemy_positions.len() != game.enemies.len()
            || self
                .enemy_positions
                .iter()
                .zip(&game.enemies)
                .any(|(&(px, py), e)| px != e.x || py != e.y)
    }

    /// Interpolated draw position for enemy `i`. A wrap is too far to lerp
    /// across, so those frames snap to the current position.
    fn enemy_draw_position(&self, index: usize, enemy: &crate::enemy::Enemy, alpha: f64) -> (f64, f64) {
        match self.enemy_positions.get(index) {
            Some(&(px, py))
                if (enemy.x - px).abs() <= GRID_SIZE as f32
                    && (enemy.y - py).abs() <= GRID_SIZE as f32 =>
            {
                (
                    px as f64 + (enemy.x - px) as f64 * alpha,
                    py as f64 + (enemy.y - py) as f64 * alpha,
                )
            }
            _ => (enemy.x as f64, enemy.y as f64),
        }
    }
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,
    device_pixel_ratio: f64,

    // Interpolation state: the latest tick and the tick before it
    last_snapshot: Option<GameSnapshot>,
    interp_from: Option<GameSnapshot>,
    last_update_time: f64,
    last_render_time: f64,

    // Visual effects
    enemy_trails: Vec<MotionTrail>,

    // Input state
    pending_input: Rc<RefCell<Option<Input>>>,

    // Touch state
    touch_start_pos: Rc<RefCell<Option<(f64, f64)>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Disable image smoothing for crisp pixels
        context.set_image_smoothing_enabled(false);

        let device_pixel_ratio = window.device_pixel_ratio();

        Ok(Self {
            canvas,
            context,
            window,
            device_pixel_ratio,
            last_snapshot: None,
            interp_from: None,
            last_update_time: 0.0,
            last_render_time: 0.0,
            enemy_trails: Vec::new(),
            pending_input: Rc::new(RefCell::new(None)),
            touch_start_pos: Rc::new(RefCell::new(None)),
        })
    }

    fn setup_keyboard_listener(&self) {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            // Number and letter keys double as clicks on the overlay
            // buttons; a click on a button that is not on screen lands on
            // nothing.
            let difficulty_click = |index: usize| {
                let (x, y) = DIFFICULTY_BUTTONS[index].1.center();
                Input::Click { x, y }
            };
            let input = match event.key().as_str() {
                "ArrowUp" => Some(Input::Direction(Direction::Up)),
                "ArrowDown" => Some(Input::Direction(Direction::Down)),
                "ArrowLeft" => Some(Input::Direction(Direction::Left)),
                "ArrowRight" => Some(Input::Direction(Direction::Right)),
                "Escape" => Some(Input::Escape),
                "q" | "Q" => Some(Input::Quit),
                "1" => Some(difficulty_click(0)),
                "2" => Some(difficulty_click(1)),
                "3" => Some(difficulty_click(2)),
                "r" | "R" => {
                    let (x, y) = GAME_OVER_BUTTONS[0].1.center();
                    Some(Input::Click { x, y })
                }
                _ => None,
            };

            if let Some(input) = input {
                *pending_input.borrow_mut() = Some(input);
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .unwrap();

        closure.forget(); // Keep listener alive
    }

    fn setup_mouse_listener(&self) {
        let pending_input = self.pending_input.clone();
        let canvas = self.canvas.clone();

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            // The canvas is laid out at logical size, so offsets are
            // already window pixels.
            *pending_input.borrow_mut() = Some(Input::Click {
                x: event.offset_x(),
                y: event.offset_y(),
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .unwrap();
        closure.forget();
    }

    fn setup_touch_listeners(&self) {
        let pending_input = self.pending_input.clone();
        let touch_start_pos = self.touch_start_pos.clone();
        let canvas = self.canvas.clone();

        // TouchStart: Record initial position
        let touch_start_pos_clone = touch_start_pos.clone();
        let touchstart_closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default(); // Prevent zooming, scrolling, etc.

            if let Some(touch) = event.touches().item(0) {
                let x = touch.client_x() as f64;
                let y = touch.client_y() as f64;
                *touch_start_pos_clone.borrow_mut() = Some((x, y));
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        canvas
            .add_event_listener_with_callback(
                "touchstart",
                touchstart_closure.as_ref().unchecked_ref(),
            )
            .unwrap();
        touchstart_closure.forget();

        // TouchMove: Prevent default to avoid scrolling
        let touchmove_closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default();
        }) as Box<dyn FnMut(TouchEvent)>);

        canvas
            .add_event_listener_with_callback(
                "touchmove",
                touchmove_closure.as_ref().unchecked_ref(),
            )
            .unwrap();
        touchmove_closure.forget();

        // TouchEnd: a long swipe steers, a short tap clicks
        let touch_start_pos_clone = touch_start_pos.clone();
        let pending_input_clone = pending_input.clone();
        let canvas_clone = canvas.clone();
        let touchend_closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default();

            if let Some(touch) = event.changed_touches().item(0) {
                let end_x = touch.client_x() as f64;
                let end_y = touch.client_y() as f64;

                if let Some((start_x, start_y)) = *touch_start_pos_clone.borrow() {
                    let dx = end_x - start_x;
                    let dy = end_y - start_y;
                    let abs_dx = dx.abs();
                    let abs_dy = dy.abs();

                    let input = if abs_dx > SWIPE_THRESHOLD || abs_dy > SWIPE_THRESHOLD {
                        // Primary direction is the one with larger delta
                        if abs_dx > abs_dy {
                            if dx > 0.0 {
                                Some(Input::Direction(Direction::Right))
                            } else {
                                Some(Input::Direction(Direction::Left))
                            }
                        } else if dy > 0.0 {
                            Some(Input::Direction(Direction::Down))
                        } else {
                            Some(Input::Direction(Direction::Up))
                        }
                    } else {
                        // Tap: treat as a pointer click in canvas space
                        let rect = canvas_clone.get_bounding_client_rect();
                        Some(Input::Click {
                            x: (end_x - rect.left()) as i32,
                            y: (end_y - rect.top()) as i32,
                        })
                    };

                    // Haptic feedback on a recognized swipe (vibrate for
                    // 50ms); fails silently where unsupported.
                    if matches!(input, Some(Input::Direction(_))) {
                        if let Some(window) = web_sys::window() {
                            let navigator = window.navigator();
                            let _ = js_sys::Reflect::get(&navigator, &JsValue::from_str("vibrate"))
                                .ok()
                                .and_then(|vibrate_fn| {
                                    if vibrate_fn.is_function() {
                                        let vibrate = vibrate_fn.dyn_ref::<js_sys::Function>()?;
                                        let _ = vibrate.call1(&navigator, &JsValue::from_f64(50.0));
                                    }
                                    Some(())
                                });
                        }
                    }

                    *pending_input_clone.borrow_mut() = input;
                    *touch_start_pos_clone.borrow_mut() = None;
                }
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        canvas
            .add_event_listener_with_callback(
                "touchend",
                touchend_closure.as_ref().unchecked_ref(),
            )
            .unwrap();
        touchend_closure.forget();

        // TouchCancel: Clear state if touch is cancelled
        let touchcancel_closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default();
            *touch_start_pos.borrow_mut() = None;
        }) as Box<dyn FnMut(TouchEvent)>);

        canvas
            .add_event_listener_with_callback(
                "touchcancel",
                touchcancel_closure.as_ref().unchecked_ref(),
            )
            .unwrap();
        touchcancel_closure.forget();
    }

    fn current_time(&self) -> f64 {
        self.window.performance().unwrap().now()
    }

    fn interpolation_alpha(&self) -> f64 {
        let elapsed = self.current_time() - self.last_update_time;
        (elapsed / GAME_UPDATE_INTERVAL).min(1.0)
    }

    fn resize_canvas_if_needed(&self) {
        // Display size (CSS pixels)
        let display_width = WINDOW_SIZE as u32;
        let display_height = (WINDOW_SIZE as f64 + UI_STRIP_HEIGHT) as u32;

        // Internal resolution (actual pixels, scaled for high DPI)
        let pixel_width = (display_width as f64 * self.device_pixel_ratio) as u32;
        let pixel_height = (display_height as f64 * self.device_pixel_ratio) as u32;

        if self.canvas.width() != pixel_width || self.canvas.height() != pixel_height {
            // Set internal resolution
            self.canvas.set_width(pixel_width);
            self.canvas.set_height(pixel_height);

            // Set CSS display size
            let element: &HtmlElement = self.canvas.unchecked_ref();
            element
                .style()
                .set_property("width", &format!("{}px", display_width))
                .unwrap();
            element
                .style()
                .set_property("height", &format!("{}px", display_height))
                .unwrap();

            // Setting canvas width/height resets the context state
            self.context.set_image_smoothing_enabled(false);
            self.context
                .scale(self.device_pixel_ratio, self.device_pixel_ratio)
                .unwrap();
        }
    }

    fn draw_square(&self, x: f64, y: f64, color: &str) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(x, y, GRID_SIZE as f64, GRID_SIZE as f64);
    }

    fn draw_circle(&self, x: f64, y: f64, color: &str) {
        let half = GRID_SIZE as f64 / 2.0;
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        self.context
            .arc(x + half, y + half, half, 0.0, TAU)
            .unwrap();
        self.context.fill();
    }

    fn draw_triangle(&self, x: f64, y: f64, color: &str) {
        let size = GRID_SIZE as f64;
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        self.context.move_to(x + size / 2.0, y);
        self.context.line_to(x + size, y + size);
        self.context.line_to(x, y + size);
        self.context.close_path();
        self.context.fill();
    }

    fn draw_food(&self, game: &Game) {
        let (x, y) = (game.food.position.x as f64, game.food.position.y as f64);
        let color = food_color(game.food.kind);
        match game.food.kind {
            FoodKind::Square => self.draw_square(x, y, color),
            FoodKind::Triangle => self.draw_triangle(x, y, color),
            FoodKind::Circle => self.draw_circle(x, y, color),
        }
    }

    fn draw_enemy(&self, kind: EnemyKind, x: f64, y: f64) {
        let color = enemy_color(kind);
        match kind {
            EnemyKind::Circle => self.draw_circle(x, y, color),
            EnemyKind::Square => self.draw_square(x, y, color),
            EnemyKind::Triangle => self.draw_triangle(x, y, color),
        }
    }

    fn draw_snake(&self, game: &Game) {
        for (index, segment) in game.snake.segments.iter().enumerate() {
            let color = if index == 0 {
                COLOR_SNAKE_HEAD
            } else {
                COLOR_SNAKE_BODY
            };
            self.draw_square(segment.x as f64, segment.y as f64, color);
        }
    }

    fn draw_enemy_trails(&self) {
        for trail in &self.enemy_trails {
            let positions = trail.positions();
            for (i, (x, y)) in positions.iter().enumerate() {
                let alpha = 1.0 - (i as f64 / positions.len() as f64);
                self.context.set_global_alpha(alpha * 0.4);
                self.draw_square(*x as f64, *y as f64, COLOR_TRAIL);
            }
        }
        self.context.set_global_alpha(1.0);
    }

    fn draw_overlay(&self, game: &Game) {
        let title = match game.overlay {
            Overlay::None => return,
            Overlay::DifficultySelect => "CHOOSE DIFFICULTY".to_string(),
            Overlay::GameOver => format!("GAME OVER  -  SCORE {}", game.snake.score),
        };

        self.context.set_fill_style_str(COLOR_OVERLAY_SHADE);
        self.context
            .fill_rect(0.0, 0.0, WINDOW_SIZE as f64, WINDOW_SIZE as f64);

        self.context.set_fill_style_str(COLOR_UI);
        self.context.set_font("32px monospace");
        self.context.set_text_align("center");
        self.context.set_text_baseline("middle");
        self.context
            .fill_text(&title, WINDOW_SIZE as f64 / 2.0, 180.0)
            .unwrap();

        self.context.set_font("20px monospace");
        for (button, rect) in game.buttons() {
            self.context.set_fill_style_str(COLOR_BUTTON);
            self.context.fill_rect(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            );
            let (cx, cy) = rect.center();
            self.context.set_fill_style_str(COLOR_BUTTON_TEXT);
            self.context
                .fill_text(button_label(*button), cx as f64, cy as f64)
                .unwrap();
        }
    }

    fn draw_ui(&self, game: &Game) {
        let y_offset = WINDOW_SIZE as f64 + 10.0;

        self.context.set_fill_style_str(COLOR_UI);
        self.context.set_font("14px monospace");
        self.context.set_text_align("left");
        self.context.set_text_baseline("top");

        let info = format!(
            "Score: {}  Difficulty: {}  Food eaten: {}",
            game.snake.score,
            game.difficulty.label(),
            game.food_eaten
        );
        self.context.fill_text(&info, 5.0, y_offset).unwrap();

        let controls = "Controls: Arrow Keys / Swipe | Esc: Menu | Tap or click buttons";
        self.context
            .fill_text(controls, 5.0, y_offset + 20.0)
            .unwrap();
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.setup_keyboard_listener();
        self.setup_mouse_listener();
        self.setup_touch_listeners();

        self.last_update_time = self.current_time();
        self.last_render_time = self.current_time();

        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        let now = self.current_time();

        // Frame rate limiting
        if now - self.last_render_time < TARGET_FRAME_TIME {
            return Ok(());
        }
        self.last_render_time = now;

        let updated = self
            .last_snapshot
            .as_ref()
            .map(|snapshot| snapshot.differs_from(game))
            .unwrap_or(true);

        if updated {
            // A restart shrinks the enemy list; drop the stale trails.
            if self.enemy_trails.len() > game.enemies.len() {
                self.enemy_trails.clear();
            }
            while self.enemy_trails.len() < game.enemies.len() {
                self.enemy_trails.push(MotionTrail::new());
            }

            self.interp_from = self.last_snapshot.take();
            self.last_snapshot = Some(GameSnapshot::from_game(game));
            self.last_update_time = now;
        }

        self.resize_canvas_if_needed();

        let display_height = WINDOW_SIZE as f64 + UI_STRIP_HEIGHT;
        self.context.set_fill_style_str(COLOR_BACKGROUND);
        self.context
            .fill_rect(0.0, 0.0, WINDOW_SIZE as f64, display_height);

        self.draw_snake(game);
        self.draw_food(game);

        // Enemies lerp from the previous tick to the current one.
        let alpha = self.interpolation_alpha();
        let draw_positions: Vec<(f64, f64)> = game
            .enemies
            .iter()
            .enumerate()
            .map(|(i, enemy)| match &self.interp_from {
                Some(from) => from.enemy_draw_position(i, enemy, alpha),
                None => (enemy.x as f64, enemy.y as f64),
            })
            .collect();

        for (i, &(x, y)) in draw_positions.iter().enumerate() {
            if let Some(trail) = self.enemy_trails.get_mut(i) {
                trail.add_position(x as f32, y as f32);
            }
        }

        self.draw_enemy_trails();

        for (enemy, &(x, y)) in game.enemies.iter().zip(&draw_positions) {
            self.draw_enemy(enemy.kind, x, y);
        }

        self.draw_ui(game);
        self.draw_overlay(game);

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().take())
    }
}
