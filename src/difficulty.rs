use rand::Rng;
use tracing::warn;

use crate::enemy::{Enemy, EnemyKind};
use crate::entity::Position;
use crate::grid::GRID_SIZE;

/// Difficulty tier, chosen on the difficulty overlay. Governs how often
/// enemies spawn and which variants are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Spawn cadence, evaluated once per food consumption with the updated
    /// food counter: Easy never spawns, Medium spawns on every 2nd food,
    /// Hard on every food.
    pub fn should_spawn(self, food_eaten: u32) -> bool {
        match self {
            Difficulty::Easy => false,
            Difficulty::Medium => food_eaten % 2 == 0,
            Difficulty::Hard => true,
        }
    }

    /// Variant restriction: Medium forces the slowest variant no matter
    /// what the random draw would have given.
    fn pick_kind(self, rng: &mut impl Rng) -> EnemyKind {
        match self {
            Difficulty::Medium => EnemyKind::Circle,
            _ => EnemyKind::random(rng),
        }
    }
}

/// An enemy never spawns within this many grid cells of the snake head on
/// both axes at once.
pub const SPAWN_CLEARANCE_CELLS: i32 = 10;

/// Rejection sampling terminates almost surely, but a near-full grid could
/// make it spin; cap the attempts rather than hang.
const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Place a new enemy for `difficulty`, rejection-sampling grid positions
/// until one clears the snake head by more than [`SPAWN_CLEARANCE_CELLS`]
/// on at least one axis. Returns `None` (and logs) if the cap is hit.
pub fn spawn_enemy(head: Position, difficulty: Difficulty, rng: &mut impl Rng) -> Option<Enemy> {
    let clearance = SPAWN_CLEARANCE_CELLS * GRID_SIZE;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position::random_cell(rng);
        let dx = (candidate.x - head.x).abs();
        let dy = (candidate.y - head.y).abs();
        if dx > clearance || dy > clearance {
            return Some(Enemy::new(candidate, difficulty.pick_kind(rng)));
        }
    }
    warn!(
        attempts = MAX_SPAWN_ATTEMPTS,
        "no enemy position cleared the snake head; grid too saturated, skipping spawn"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn easy_never_spawns() {
        for eaten in 1..100 {
            assert!(!Difficulty::Easy.should_spawn(eaten));
        }
    }

    #[test]
    fn medium_spawns_on_every_second_food() {
        let spawns: Vec<u32> = (1..=10)
            .filter(|&eaten| Difficulty::Medium.should_spawn(eaten))
            .collect();
        assert_eq!(spawns, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn hard_spawns_on_every_food() {
        for eaten in 1..=10 {
            assert!(Difficulty::Hard.should_spawn(eaten));
        }
    }

    #[test]
    fn medium_forces_the_slowest_variant() {
        let mut rng = StdRng::seed_from_u64(21);
        let head = Position::new(0, 0);
        for _ in 0..50 {
            let enemy = spawn_enemy(head, Difficulty::Medium, &mut rng).unwrap();
            assert_eq!(enemy.kind, EnemyKind::Circle);
        }
    }

    #[test]
    fn hard_draws_from_all_variants() {
        let mut rng = StdRng::seed_from_u64(22);
        let head = Position::new(0, 0);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let enemy = spawn_enemy(head, Difficulty::Hard, &mut rng).unwrap();
            match enemy.kind {
                EnemyKind::Circle => seen[0] = true,
                EnemyKind::Square => seen[1] = true,
                EnemyKind::Triangle => seen[2] = true,
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    proptest! {
        #[test]
        fn spawn_always_clears_the_snake_head(seed in any::<u64>(), cell_x in 0i32..40, cell_y in 0i32..40) {
            let mut rng = StdRng::seed_from_u64(seed);
            let head = Position::new(cell_x * GRID_SIZE, cell_y * GRID_SIZE);
            let enemy = spawn_enemy(head, Difficulty::Hard, &mut rng).unwrap();
            let dx = (enemy.x as i32 - head.x).abs();
            let dy = (enemy.y as i32 - head.y).abs();
            let clearance = SPAWN_CLEARANCE_CELLS * GRID_SIZE;
            prop_assert!(
                dx > clearance || dy > clearance,
                "enemy at ({}, {}) crowds head at ({}, {})",
                enemy.x, enemy.y, head.x, head.y
            );
        }
    }
}
