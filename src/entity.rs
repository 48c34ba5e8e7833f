use std::collections::VecDeque;

use rand::Rng;

use crate::grid::{self, GRID_COUNT, GRID_SIZE, WINDOW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Uniform-random grid-aligned position.
    pub fn random_cell(rng: &mut impl Rng) -> Self {
        Self::new(
            rng.gen_range(0..GRID_COUNT) * GRID_SIZE,
            rng.gen_range(0..GRID_COUNT) * GRID_SIZE,
        )
    }

    /// One grid step in `direction`, wrapped onto the torus.
    pub fn stepped(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self::new(
            grid::wrap(self.x + dx * GRID_SIZE),
            grid::wrap(self.y + dy * GRID_SIZE),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Direction {
        match rng.gen_range(0..4) {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    /// Segments head-first. Never empty.
    pub segments: VecDeque<Position>,
    /// Target length; the segment count catches up one tick at a time.
    pub length: usize,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub score: u32,
}

impl Snake {
    /// A length-1 snake centered on the grid, facing a random direction.
    pub fn new(rng: &mut impl Rng) -> Self {
        let center = Position::new(WINDOW_SIZE / 2, WINDOW_SIZE / 2);
        Self {
            segments: VecDeque::from([center]),
            length: 1,
            direction: Direction::random(rng),
            pending_direction: None,
            score: 0,
        }
    }

    pub fn head(&self) -> Position {
        *self
            .segments
            .front()
            .expect("snake always has at least one segment")
    }

    /// Buffer a direction change for the next tick. A change to the exact
    /// opposite of the current direction is ignored; the last accepted
    /// change within a tick wins.
    pub fn steer(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Advance one grid step. Returns `false` on self-collision, leaving
    /// the segments untouched. Self-collision is only checked from segment
    /// index 3 onward; the first three segments cannot geometrically
    /// intersect the new head.
    pub fn advance(&mut self) -> bool {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next = self.head().stepped(self.direction);
        if self.segments.iter().skip(3).any(|&segment| segment == next) {
            return false;
        }

        self.segments.push_front(next);
        while self.segments.len() > self.length {
            self.segments.pop_back();
        }
        true
    }

    /// Award food: the target length and score both increase by the food's
    /// point value.
    pub fn grow(&mut self, points: u32) {
        self.length += points as usize;
        self.score += points;
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::new(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snake_facing(direction: Direction) -> Snake {
        let mut snake = Snake::new(&mut StdRng::seed_from_u64(0));
        snake.direction = direction;
        snake
    }

    #[test]
    fn steer_rejects_exact_reversal_for_all_pairs() {
        let pairs = [
            (Direction::Up, Direction::Down),
            (Direction::Down, Direction::Up),
            (Direction::Left, Direction::Right),
            (Direction::Right, Direction::Left),
        ];
        for (current, reversal) in pairs {
            let mut snake = snake_facing(current);
            snake.steer(reversal);
            assert_eq!(snake.pending_direction, None);
            snake.advance();
            assert_eq!(snake.direction, current);
        }
    }

    #[test]
    fn steer_accepts_perpendicular_turn_and_last_writer_wins() {
        let mut snake = snake_facing(Direction::Right);
        snake.steer(Direction::Up);
        snake.steer(Direction::Down);
        snake.advance();
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn advance_wraps_at_every_edge() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut snake = snake_facing(direction);
            for _ in 0..GRID_COUNT {
                assert!(snake.advance());
            }
            // A full lap across the torus lands back at the center.
            assert_eq!(
                snake.head(),
                Position::new(WINDOW_SIZE / 2, WINDOW_SIZE / 2)
            );
        }
    }

    #[test]
    fn growth_is_deferred_one_segment_per_tick() {
        let mut snake = snake_facing(Direction::Right);
        snake.grow(3);
        assert_eq!(snake.length, 4);
        assert_eq!(snake.segments.len(), 1);

        for expected in 2..=4 {
            snake.advance();
            assert_eq!(snake.segments.len(), expected);
        }
        snake.advance();
        assert_eq!(snake.segments.len(), 4);
    }

    #[test]
    fn grow_adds_points_to_score_once() {
        let mut snake = snake_facing(Direction::Right);
        snake.grow(2);
        snake.grow(3);
        assert_eq!(snake.score, 5);
        assert_eq!(snake.length, 6);
    }

    #[test]
    fn short_snake_never_self_collides() {
        // Bodies of three or fewer segments must survive arbitrarily tight
        // turning; the collision scan starts at segment index 3.
        let mut snake = snake_facing(Direction::Right);
        snake.grow(2);
        let turns = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        for turn in turns.iter().cycle().take(64) {
            snake.steer(*turn);
            assert!(snake.advance());
        }
    }

    #[test]
    fn tight_loop_with_long_body_is_fatal() {
        let mut snake = snake_facing(Direction::Right);
        snake.grow(6);
        for _ in 0..7 {
            assert!(snake.advance());
        }
        // Turn back into the body: up, left, down lands on a segment
        // at index >= 3.
        snake.steer(Direction::Up);
        assert!(snake.advance());
        snake.steer(Direction::Left);
        assert!(snake.advance());
        snake.steer(Direction::Down);
        let segments_before = snake.segments.clone();
        assert!(!snake.advance());
        assert_eq!(snake.segments, segments_before);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut snake = Snake::new(&mut rng);
        snake.grow(5);
        for _ in 0..3 {
            snake.advance();
        }
        snake.reset(&mut rng);
        assert_eq!(snake.length, 1);
        assert_eq!(snake.segments.len(), 1);
        assert_eq!(snake.score, 0);
        assert_eq!(
            snake.head(),
            Position::new(WINDOW_SIZE / 2, WINDOW_SIZE / 2)
        );
    }
}
