use crate::Cell;
use crate::food::FoodSpawner;
use crate::grid::Grid;
use crate::snake::{Snake, Direction::{self, *}};

const DEFAULT_DIRECTION: Direction = Right;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Over,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened because no session is running.
    Skipped,
    /// The head moved to `new_head`. `old_tail` is the freed cell, or `None`
    /// when the snake ate and grew instead.
    Moved { new_head: Cell, old_tail: Option<Cell> },
    Crashed { score: u32 },
}

/// Everything one session needs. Only [`GameState::tick`] moves the snake,
/// input goes through [`GameState::request_direction`].
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Cell,
    current: Direction,
    pending: Direction,
    score: u32,
    phase: Phase,
}

impl GameState {
    pub fn new(grid: Grid, spawner: &mut impl FoodSpawner) -> Self {
        let origin = grid.origin();
        GameState {
            grid,
            snake: Snake::new(origin),
            food: spawner.spawn(&grid),
            current: DEFAULT_DIRECTION,
            pending: DEFAULT_DIRECTION,
            score: 0,
            phase: Phase::Idle,
        }
    }

    /// Back to a one-segment snake at the origin, idle.
    pub fn reset(&mut self, spawner: &mut impl FoodSpawner) {
        *self = GameState::new(self.grid, spawner);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Queues `dir` for the next tick. Reversing into the body and steering
    /// outside a running session are both ignored.
    pub fn request_direction(&mut self, dir: Direction) -> bool {
        if self.phase != Phase::Running || dir == self.current.opposite() {
            return false;
        }

        self.pending = dir;
        true
    }

    pub fn tick(&mut self, spawner: &mut impl FoodSpawner) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Skipped;
        }

        let Some(old_head) = self.snake.head() else {
            return TickOutcome::Skipped;
        };

        self.current = self.pending;
        let new_head = self.current.step(old_head);

        let old_tail = if new_head == self.food {
            self.score += 1;
            self.food = spawner.spawn(&self.grid);
            None
        } else {
            self.snake.pop_tail()
        };

        if !self.grid.contains(new_head) || self.snake.hits_body(new_head) {
            self.phase = Phase::Over;
            return TickOutcome::Crashed { score: self.score };
        }

        self.snake.push_head(new_head);
        TickOutcome::Moved { new_head, old_tail }
    }

    #[cfg(test)]
    pub fn with_snake(grid: Grid, cells: &[Cell], dir: Direction, food: Cell) -> Self {
        GameState {
            grid,
            snake: Snake::from_cells(cells),
            food,
            current: dir,
            pending: dir,
            score: 0,
            phase: Phase::Running,
        }
    }
}
