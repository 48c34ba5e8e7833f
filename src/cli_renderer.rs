use crate::enemy::EnemyKind;
use crate::entity::{Direction, Position};
use crate::food::FoodKind;
use crate::game::{
    ButtonRect, Game, Overlay, OverlayButton, DIFFICULTY_BUTTONS, GAME_OVER_BUTTONS,
};
use crate::grid::{GRID_COUNT, GRID_SIZE};
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::collections::HashSet;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Each grid cell is two characters wide, so one terminal column spans
/// half a cell of window pixels.
const PIXELS_PER_COLUMN: i32 = GRID_SIZE / 2;

pub struct CliRenderer {
    last_render: Instant,
    target_frame_time: Duration,
    /// Overlay at the last render, so number keys can be translated into
    /// clicks on the buttons the player is actually looking at.
    last_overlay: Overlay,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
            last_overlay: Overlay::DifficultySelect,
        }
    }

    fn food_symbol(kind: FoodKind) -> (&'static str, Color) {
        match kind {
            FoodKind::Square => ("[]", Color::Yellow),
            FoodKind::Triangle => ("/\\", Color::Cyan),
            FoodKind::Circle => ("()", Color::Magenta),
        }
    }

    fn enemy_symbol(kind: EnemyKind) -> (&'static str, Color) {
        match kind {
            EnemyKind::Circle => ("()", Color::Red),
            EnemyKind::Square => ("[]", Color::DarkYellow),
            EnemyKind::Triangle => ("/\\", Color::DarkMagenta),
        }
    }

    /// Grid cell currently covering an enemy's fractional position.
    fn enemy_cell(x: f32, y: f32) -> Position {
        let cell = |coord: f32| {
            ((coord / GRID_SIZE as f32).round() as i32).rem_euclid(GRID_COUNT) * GRID_SIZE
        };
        Position::new(cell(x), cell(y))
    }

    fn button_label(button: OverlayButton) -> &'static str {
        match button {
            OverlayButton::Easy => "[1] Easy",
            OverlayButton::Medium => "[2] Medium",
            OverlayButton::Hard => "[3] Hard",
            OverlayButton::Restart => "[R] Restart",
            OverlayButton::Exit => "[Q] Exit",
        }
    }

    /// Synthesize a click on a button's center, in window pixels. The game
    /// hit-tests against the active overlay, so a shortcut for a button
    /// that is not on screen lands on nothing.
    fn click_on(rect: ButtonRect) -> Input {
        let (x, y) = rect.center();
        Input::Click { x, y }
    }

    fn draw_board(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        let body: HashSet<Position> = game.snake.segments.iter().copied().collect();
        let head = game.snake.head();
        let enemy_cells: Vec<(Position, EnemyKind)> = game
            .enemies
            .iter()
            .map(|e| (Self::enemy_cell(e.x, e.y), e.kind))
            .collect();

        queue!(stdout, cursor::MoveTo(0, 0))?;
        for cell_y in 0..GRID_COUNT {
            for cell_x in 0..GRID_COUNT {
                let pos = Position::new(cell_x * GRID_SIZE, cell_y * GRID_SIZE);

                if pos == head {
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Green),
                        SetForegroundColor(Color::Black),
                        Print("@@"),
                        ResetColor
                    )?;
                } else if body.contains(&pos) {
                    queue!(stdout, SetBackgroundColor(Color::DarkGreen), Print("  "))?;
                } else if let Some((_, kind)) =
                    enemy_cells.iter().find(|(cell, _)| *cell == pos)
                {
                    let (symbol, color) = Self::enemy_symbol(*kind);
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Black),
                        SetForegroundColor(color),
                        Print(symbol),
                        ResetColor
                    )?;
                } else if pos == game.food.position {
                    let (symbol, color) = Self::food_symbol(game.food.kind);
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Black),
                        SetForegroundColor(color),
                        Print(symbol),
                        ResetColor
                    )?;
                } else {
                    queue!(stdout, SetBackgroundColor(Color::Black), Print("  "))?;
                }
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }
        Ok(())
    }

    fn draw_overlay(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        let title = match game.overlay {
            Overlay::None => return Ok(()),
            Overlay::DifficultySelect => "CHOOSE DIFFICULTY".to_string(),
            Overlay::GameOver => format!("GAME OVER  -  Score: {}", game.snake.score),
        };

        let buttons = game.buttons();
        let title_row = buttons
            .first()
            .map(|(_, rect)| rect.y / GRID_SIZE - 2)
            .unwrap_or(10) as u16;
        let title_col = (GRID_COUNT - title.len() as i32 / 2).max(0) as u16;
        queue!(
            stdout,
            cursor::MoveTo(title_col, title_row),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::White),
            Print(&title),
            ResetColor
        )?;

        for (button, rect) in buttons {
            let row = ((rect.y + rect.height / 2) / GRID_SIZE) as u16;
            let col = (rect.x / PIXELS_PER_COLUMN) as u16;
            let width = (rect.width / PIXELS_PER_COLUMN) as usize;
            queue!(
                stdout,
                cursor::MoveTo(col, row),
                SetBackgroundColor(Color::DarkBlue),
                SetForegroundColor(Color::White),
                Print(format!("{:^width$}", Self::button_label(*button))),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn draw_status(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, GRID_COUNT as u16 + 1),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "Score: {}  Difficulty: {}  Food eaten: {}",
                game.snake.score,
                game.difficulty.label(),
                game.food_eaten
            )),
            cursor::MoveTo(0, GRID_COUNT as u16 + 2),
            terminal::Clear(ClearType::CurrentLine),
            Print("Controls: Arrow Keys to steer | Esc for menu | Q to quit | Mouse to click buttons")
        )?;
        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }
        self.last_render = Instant::now();
        self.last_overlay = game.overlay;

        let mut stdout = io::stdout();
        self.draw_board(game, &mut stdout)?;
        self.draw_overlay(game, &mut stdout)?;
        self.draw_status(game, &mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(Duration::from_millis(15))? {
            match event::read()? {
                Event::Key(KeyEvent { code, .. }) => {
                    let input = match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => match self.last_overlay {
                            // During play Q quits directly; on an overlay it
                            // is the shortcut for the Exit button.
                            Overlay::None => Some(Input::Quit),
                            _ => Some(Self::click_on(DIFFICULTY_BUTTONS[3].1)),
                        },
                        KeyCode::Esc => Some(Input::Escape),
                        KeyCode::Char('1') => Some(Self::click_on(DIFFICULTY_BUTTONS[0].1)),
                        KeyCode::Char('2') => Some(Self::click_on(DIFFICULTY_BUTTONS[1].1)),
                        KeyCode::Char('3') => Some(Self::click_on(DIFFICULTY_BUTTONS[2].1)),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            Some(Self::click_on(GAME_OVER_BUTTONS[0].1))
                        }
                        KeyCode::Up => Some(Input::Direction(Direction::Up)),
                        KeyCode::Down => Some(Input::Direction(Direction::Down)),
                        KeyCode::Left => Some(Input::Direction(Direction::Left)),
                        KeyCode::Right => Some(Input::Direction(Direction::Right)),
                        _ => None,
                    };
                    return Ok(input);
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    return Ok(Some(Input::Click {
                        x: column as i32 * PIXELS_PER_COLUMN,
                        y: row as i32 * GRID_SIZE,
                    }));
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
