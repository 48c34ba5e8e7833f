use rand::Rng;

use crate::entity::Position;
use crate::grid::{self, GRID_SIZE};

/// Pursuer variants. Speed is the fraction of one grid cell covered per
/// tick; faster variants are the rarer, more dangerous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Circle,
    Square,
    Triangle,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Circle, EnemyKind::Square, EnemyKind::Triangle];

    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Circle => 0.15,
            EnemyKind::Square => 0.25,
            EnemyKind::Triangle => 0.35,
        }
    }

    pub fn random(rng: &mut impl Rng) -> EnemyKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Maximum jitter applied to the pursuit target, per axis.
const JITTER_RANGE: f32 = 3.0 * GRID_SIZE as f32;

/// A pursuer. Unlike the snake it moves in fractional pixel steps, so its
/// position is not grid-aligned.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(position: Position, kind: EnemyKind) -> Self {
        Self {
            x: position.x as f32,
            y: position.y as f32,
            kind,
        }
    }

    /// Move one tick toward a jittered copy of `target`. The displacement
    /// is normalized by Chebyshev distance, so diagonal and axis-aligned
    /// motion cover the same number of grid steps per tick. Coordinates
    /// wrap onto the torus; a zero-distance target means no movement.
    pub fn pursue(&mut self, target: Position, rng: &mut impl Rng) {
        let jittered_x = target.x as f32 + rng.gen_range(-JITTER_RANGE..=JITTER_RANGE);
        let jittered_y = target.y as f32 + rng.gen_range(-JITTER_RANGE..=JITTER_RANGE);

        let dx = jittered_x - self.x;
        let dy = jittered_y - self.y;
        let distance = dx.abs().max(dy.abs());
        if distance == 0.0 {
            return;
        }

        let step = GRID_SIZE as f32 * self.kind.speed();
        self.x = grid::wrap_f(self.x + dx / distance * step);
        self.y = grid::wrap_f(self.y + dy / distance * step);
    }

    /// Bounding-box overlap with the snake head, tolerant of this enemy's
    /// fractional position.
    pub fn touches(&self, head: Position) -> bool {
        (self.x - head.x as f32).abs() < GRID_SIZE as f32
            && (self.y - head.y as f32).abs() < GRID_SIZE as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WINDOW_SIZE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn speeds_follow_the_variant_table() {
        assert_eq!(EnemyKind::Circle.speed(), 0.15);
        assert_eq!(EnemyKind::Square.speed(), 0.25);
        assert_eq!(EnemyKind::Triangle.speed(), 0.35);
    }

    #[test]
    fn pursue_closes_in_on_a_distant_target() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = Enemy::new(Position::new(100, 100), EnemyKind::Triangle);
        let target = Position::new(400, 400);

        let start_gap = (enemy.x - target.x as f32)
            .abs()
            .max((enemy.y - target.y as f32).abs());
        for _ in 0..20 {
            enemy.pursue(target, &mut rng);
        }
        let end_gap = (enemy.x - target.x as f32)
            .abs()
            .max((enemy.y - target.y as f32).abs());
        // The jitter spans +-3 cells; over 20 ticks at 0.35 cells/tick the
        // pull toward the target dominates.
        assert!(end_gap < start_gap);
    }

    #[test]
    fn pursue_step_is_bounded_by_variant_speed() {
        let mut rng = StdRng::seed_from_u64(5);
        for kind in EnemyKind::ALL {
            let mut enemy = Enemy::new(Position::new(200, 200), kind);
            let target = Position::new(600, 300);
            let max_step = GRID_SIZE as f32 * kind.speed() + 1e-3;
            for _ in 0..50 {
                let (px, py) = (enemy.x, enemy.y);
                enemy.pursue(target, &mut rng);
                assert!((enemy.x - px).abs() <= max_step);
                assert!((enemy.y - py).abs() <= max_step);
            }
        }
    }

    #[test]
    fn pursue_wraps_coordinates_onto_the_torus() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut enemy = Enemy::new(Position::new(0, 0), EnemyKind::Triangle);
        // Chase a target across the far edge for a while.
        let target = Position::new(WINDOW_SIZE - GRID_SIZE, WINDOW_SIZE - GRID_SIZE);
        for _ in 0..2000 {
            enemy.pursue(target, &mut rng);
            assert!((0.0..WINDOW_SIZE as f32).contains(&enemy.x));
            assert!((0.0..WINDOW_SIZE as f32).contains(&enemy.y));
        }
    }

    #[test]
    fn touch_test_is_a_strict_bounding_box() {
        let head = Position::new(400, 400);
        let mut enemy = Enemy::new(Position::new(400, 400), EnemyKind::Circle);
        enemy.x = 400.0 + GRID_SIZE as f32 - 0.5;
        assert!(enemy.touches(head));
        enemy.x = 400.0 + GRID_SIZE as f32;
        assert!(!enemy.touches(head));
        enemy.x = 400.0;
        enemy.y = 400.0 - GRID_SIZE as f32;
        assert!(!enemy.touches(head));
    }
}
