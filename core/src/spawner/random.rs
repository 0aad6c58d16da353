use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::TileSpawner;
use crate::{Color, Tile};

/// Spawner drawing uniformly from the five base colors, seeded so a whole
/// session replays from its seed.
#[derive(Clone, Debug)]
pub struct RandomSpawner {
    rng: SmallRng,
}

impl RandomSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl TileSpawner for RandomSpawner {
    fn spawn_base(&mut self, overheating: bool) -> Tile {
        if overheating {
            return Tile::EMPTY;
        }

        let color = Color::BASE[self.rng.random_range(0..Color::BASE.len())];
        Tile::new(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_only_base_colors() {
        let mut spawner = RandomSpawner::new(1);

        for _ in 0..200 {
            assert!(spawner.spawn_base(false).color().is_base());
        }
    }

    #[test]
    fn every_base_color_shows_up() {
        let mut spawner = RandomSpawner::new(7);

        let mut seen = [false; Color::BASE.len()];
        for _ in 0..500 {
            let color = spawner.spawn_base(false).color();
            let slot = Color::BASE.iter().position(|&c| c == color).unwrap();
            seen[slot] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn overheat_yields_empty_and_leaves_rng_untouched() {
        let mut plain = RandomSpawner::new(42);
        let mut interleaved = RandomSpawner::new(42);

        for _ in 0..5 {
            assert!(interleaved.spawn_base(true).is_empty());
        }

        for _ in 0..10 {
            assert_eq!(plain.spawn_base(false), interleaved.spawn_base(false));
        }
    }

    #[test]
    fn upgrade_wraps_the_given_color() {
        let spawner = RandomSpawner::new(0);

        assert_eq!(spawner.spawn_upgrade(Color::Timer).color(), Color::Timer);
        assert_eq!(
            spawner.spawn_upgrade(Color::Spanner).color(),
            Color::Spanner
        );
    }
}
