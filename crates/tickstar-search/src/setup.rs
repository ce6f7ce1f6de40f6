//! Random board setup: endpoint placement and obstacle scattering.
//!
//! All randomness flows through an explicit RNG so a seed reproduces a
//! board exactly.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use tickstar_core::{CellState, Grid, GridError, Point, Range};

use crate::report::CellSink;

/// Build a seeded RNG. Without a seed, one is drawn from the thread RNG and
/// returned so the caller can log or persist it.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (StdRng::seed_from_u64(seed), seed)
}

/// Obstacle generator operating on a [`Grid`].
pub struct ObstacleGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> ObstacleGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A uniformly random point inside `bounds`. `bounds` must be non-empty.
    pub fn random_point(&mut self, bounds: Range) -> Point {
        Point::new(
            self.rng.random_range(bounds.min.x..bounds.max.x),
            self.rng.random_range(bounds.min.y..bounds.max.y),
        )
    }

    /// Roll once per cell and block it when the roll (`0..100`) is below
    /// `percent`. Only `Empty` cells are blocked, so start and finish
    /// survive. Each new obstacle is reported to `sink`.
    ///
    /// Returns the number of cells blocked.
    pub fn scatter<S: CellSink>(
        &mut self,
        grid: &mut Grid,
        percent: u8,
        sink: &mut S,
    ) -> Result<usize, GridError> {
        let mut blocked = 0;
        for p in grid.bounds().iter() {
            let roll: u8 = self.rng.random_range(0..100);
            if roll < percent && grid.set_blocked(p)? {
                sink.on_cell_updated(p, CellState::Blocked, None);
                blocked += 1;
            }
        }
        Ok(blocked)
    }
}
