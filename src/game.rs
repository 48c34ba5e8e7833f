use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::difficulty::{self, Difficulty};
use crate::enemy::Enemy;
use crate::entity::{Direction, Snake};
use crate::food::Food;

/// Overlay state of the session. `None` means the simulation is live;
/// both overlays freeze the entities until the player acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    DifficultySelect,
    GameOver,
}

/// Interactive regions on the overlays, hit-tested in window pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayButton {
    Easy,
    Medium,
    Hard,
    Restart,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ButtonRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

pub const DIFFICULTY_BUTTONS: [(OverlayButton, ButtonRect); 4] = [
    (OverlayButton::Easy, ButtonRect::new(300, 260, 200, 60)),
    (OverlayButton::Medium, ButtonRect::new(300, 340, 200, 60)),
    (OverlayButton::Hard, ButtonRect::new(300, 420, 200, 60)),
    (OverlayButton::Exit, ButtonRect::new(300, 580, 200, 60)),
];

pub const GAME_OVER_BUTTONS: [(OverlayButton, ButtonRect); 2] = [
    (OverlayButton::Restart, ButtonRect::new(300, 500, 200, 60)),
    (OverlayButton::Exit, ButtonRect::new(300, 580, 200, 60)),
];

/// The game session: owns every entity, advances the simulation one tick
/// at a time, and exposes read-only state to the renderers.
pub struct Game {
    pub snake: Snake,
    pub food: Food,
    pub enemies: Vec<Enemy>,
    pub difficulty: Difficulty,
    pub food_eaten: u32,
    pub overlay: Overlay,
    rng: StdRng,
}

impl Game {
    /// A fresh session waiting on the difficulty overlay.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic session for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let snake = Snake::new(&mut rng);
        let food = Food::new(&mut rng);
        Self {
            snake,
            food,
            enemies: Vec::new(),
            difficulty: Difficulty::Easy,
            food_eaten: 0,
            overlay: Overlay::DifficultySelect,
            rng,
        }
    }

    /// Buffer a direction change. Ignored while an overlay is up; a dead
    /// session only comes back through [`Game::restart`].
    pub fn steer(&mut self, direction: Direction) {
        if self.overlay == Overlay::None {
            self.snake.steer(direction);
        }
    }

    /// Escape during play pauses into the difficulty overlay.
    pub fn open_menu(&mut self) {
        if self.overlay == Overlay::None {
            self.overlay = Overlay::DifficultySelect;
        }
    }

    /// Restart with a tier: reinitialized snake, re-rolled food, no
    /// enemies, zeroed food counter, back to live play.
    pub fn restart(&mut self, difficulty: Difficulty) {
        debug!(tier = difficulty.label(), "session restart");
        self.snake.reset(&mut self.rng);
        self.food.randomize_position(&mut self.rng);
        self.food.randomize_kind(&mut self.rng);
        self.enemies.clear();
        self.food_eaten = 0;
        self.difficulty = difficulty;
        self.overlay = Overlay::None;
    }

    /// Advance one simulation tick. A no-op while an overlay is up, so the
    /// frozen entities stay exactly as the player last saw them.
    pub fn tick(&mut self) {
        if self.overlay != Overlay::None {
            return;
        }

        if !self.snake.advance() {
            debug!(score = self.snake.score, "snake bit itself");
            self.overlay = Overlay::GameOver;
            return;
        }

        if self.snake.head() == self.food.position {
            let points = self.food.kind.points();
            self.snake.grow(points);
            self.food.randomize_position(&mut self.rng);
            self.food.randomize_kind(&mut self.rng);
            self.food_eaten += 1;
            if self.difficulty.should_spawn(self.food_eaten) {
                if let Some(enemy) =
                    difficulty::spawn_enemy(self.snake.head(), self.difficulty, &mut self.rng)
                {
                    self.enemies.push(enemy);
                }
            }
        }

        let head = self.snake.head();
        for enemy in &mut self.enemies {
            enemy.pursue(head, &mut self.rng);
            if enemy.touches(head) {
                debug!(score = self.snake.score, "enemy caught the snake");
                self.overlay = Overlay::GameOver;
                return;
            }
        }
    }

    /// The interactive regions of the current overlay.
    pub fn buttons(&self) -> &'static [(OverlayButton, ButtonRect)] {
        match self.overlay {
            Overlay::None => &[],
            Overlay::DifficultySelect => &DIFFICULTY_BUTTONS,
            Overlay::GameOver => &GAME_OVER_BUTTONS,
        }
    }

    /// Hit-test a pointer click against the current overlay and apply the
    /// button it lands on. Clicks outside overlays (or outside every
    /// button) are ignored. `Exit` is returned for the frontend to act on.
    pub fn handle_click(&mut self, x: i32, y: i32) -> Option<OverlayButton> {
        let button = self
            .buttons()
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(button, _)| *button)?;

        match button {
            OverlayButton::Easy => self.restart(Difficulty::Easy),
            OverlayButton::Medium => self.restart(Difficulty::Medium),
            OverlayButton::Hard => self.restart(Difficulty::Hard),
            OverlayButton::Restart => self.overlay = Overlay::DifficultySelect,
            OverlayButton::Exit => {}
        }
        Some(button)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
