use rand::Rng;

use crate::Cell;
use crate::grid::Grid;

/// Source of food positions.
pub trait FoodSpawner {
    fn spawn(&mut self, grid: &Grid) -> Cell;
}

/// Draws each coordinate uniformly over the grid. The snake's body is not
/// consulted, so food may land under it until the snake moves away.
pub struct RandomFood<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomFood<R> {
    pub fn new(rng: R) -> Self {
        RandomFood { rng }
    }
}

impl<R: Rng> FoodSpawner for RandomFood<R> {
    fn spawn(&mut self, grid: &Grid) -> Cell {
        // Grid extent is validated as non-empty at startup.
        (self.rng.gen_range(0..grid.cols()), self.rng.gen_range(0..grid.rows()))
    }
}
