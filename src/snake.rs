use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn step(self, from: Cell) -> Cell {
        let (dx, dy) = self.offset();
        (from.0 + dx, from.1 + dy)
    }
}

/// The snake body, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(pos: Cell) -> Self {
        Snake { body: VecDeque::from(vec![pos]) }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell]) -> Self {
        Snake { body: cells.iter().copied().collect() }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }

    /// Whether `cell` lands on the body, ignoring the segment at index 0.
    pub fn hits_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }
}
