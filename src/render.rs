use std::io;

use crate::state::GameState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Paint {
    Head,
    Body,
    Food,
}

/// A 2D drawing target measured in pixels.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self) -> io::Result<()>;
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, paint: Paint) -> io::Result<()>;
}

/// Redraws the whole play field. Food goes down first so a head sitting on
/// it stays visible.
pub fn render(surface: &mut impl Surface, state: &GameState) -> io::Result<()> {
    let grid = state.grid();
    surface.clear()?;

    let food = grid.cell_rect(state.food());
    surface.fill_rect(food.x, food.y, food.w, food.h, Paint::Food)?;

    for (i, cell) in state.snake().body().iter().enumerate() {
        let rect = grid.cell_rect(*cell);
        let paint = if i == 0 { Paint::Head } else { Paint::Body };
        surface.fill_rect(rect.x, rect.y, rect.w, rect.h, paint)?;
    }

    Ok(())
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}
