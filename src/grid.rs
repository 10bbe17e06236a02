use crate::Cell;

const PREFERRED_ORIGIN: Cell = (10, 10);

/// A rectangle in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// The play field: how many cells fit on each axis and how big a cell is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cell_size: u32,
}

impl Grid {
    /// Cells that only partially fit at the right or bottom edge are dropped.
    pub fn from_pixels(width: u32, height: u32, cell_size: u32) -> Self {
        let (cols, rows) = if cell_size == 0 {
            (0, 0)
        } else {
            (width / cell_size, height / cell_size)
        };

        Grid { cols: cols as i32, rows: rows as i32, cell_size }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cols <= 0 || self.rows <= 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.1 >= 0 && cell.0 < self.cols && cell.1 < self.rows
    }

    pub fn cell_at(&self, px: i32, py: i32) -> Cell {
        let size = self.cell_size.max(1) as i32;
        (px.div_euclid(size), py.div_euclid(size))
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let size = self.cell_size as i32;
        Rect { x: cell.0 * size, y: cell.1 * size, w: self.cell_size, h: self.cell_size }
    }

    /// Where a fresh snake is placed: (10, 10) if the grid is big enough,
    /// the centre otherwise.
    pub fn origin(&self) -> Cell {
        if self.contains(PREFERRED_ORIGIN) {
            PREFERRED_ORIGIN
        } else {
            (self.cols / 2, self.rows / 2)
        }
    }
}
