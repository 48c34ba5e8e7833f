use rand::Rng;

use crate::entity::Position;

/// Food shapes with their fixed draw weight and point value. Sampling
/// walks the variants in declared order, so a sample landing exactly on
/// a cumulative boundary resolves to the earlier shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Square,
    Triangle,
    Circle,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Square, FoodKind::Triangle, FoodKind::Circle];

    pub fn weight(self) -> f32 {
        match self {
            FoodKind::Square => 0.5,
            FoodKind::Triangle => 0.3,
            FoodKind::Circle => 0.2,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            FoodKind::Square => 1,
            FoodKind::Triangle => 2,
            FoodKind::Circle => 3,
        }
    }

    fn sample(rng: &mut impl Rng) -> FoodKind {
        let roll: f32 = rng.gen();
        let mut cumulative = 0.0;
        for kind in FoodKind::ALL {
            cumulative += kind.weight();
            if roll <= cumulative {
                return kind;
            }
        }
        // Unreachable short of float accumulation error.
        FoodKind::Circle
    }
}

#[derive(Debug, Clone)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            position: Position::random_cell(rng),
            kind: FoodKind::sample(rng),
        }
    }

    /// Uniform-random grid cell, independent of every other entity. Food is
    /// allowed to land on the snake body or an enemy.
    pub fn randomize_position(&mut self, rng: &mut impl Rng) {
        self.position = Position::random_cell(rng);
    }

    pub fn randomize_kind(&mut self, rng: &mut impl Rng) {
        self.kind = FoodKind::sample(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GRID_SIZE, WINDOW_SIZE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn points_follow_the_fixed_table() {
        assert_eq!(FoodKind::Square.points(), 1);
        assert_eq!(FoodKind::Triangle.points(), 2);
        assert_eq!(FoodKind::Circle.points(), 3);
    }

    #[test]
    fn positions_are_grid_aligned_and_in_window() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut food = Food::new(&mut rng);
        for _ in 0..1000 {
            food.randomize_position(&mut rng);
            assert_eq!(food.position.x % GRID_SIZE, 0);
            assert_eq!(food.position.y % GRID_SIZE, 0);
            assert!((0..WINDOW_SIZE).contains(&food.position.x));
            assert!((0..WINDOW_SIZE).contains(&food.position.y));
        }
    }

    #[test]
    fn kind_frequencies_converge_to_the_weight_table() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 3];
        const SAMPLES: u32 = 100_000;
        for _ in 0..SAMPLES {
            match FoodKind::sample(&mut rng) {
                FoodKind::Square => counts[0] += 1,
                FoodKind::Triangle => counts[1] += 1,
                FoodKind::Circle => counts[2] += 1,
            }
        }
        let expected = [0.5, 0.3, 0.2];
        for (count, want) in counts.iter().zip(expected) {
            let freq = *count as f32 / SAMPLES as f32;
            assert!(
                (freq - want).abs() < 0.01,
                "frequency {freq} strayed from {want}"
            );
        }
    }
}
