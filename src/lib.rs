pub mod difficulty;
pub mod enemy;
pub mod entity;
pub mod food;
pub mod game;
pub mod grid;
pub mod motion_trail;
pub mod renderer;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use difficulty::Difficulty;
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Direction, Position, Snake};
pub use food::{Food, FoodKind};
pub use game::{Game, Overlay, OverlayButton};
pub use renderer::{Input, Renderer};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
