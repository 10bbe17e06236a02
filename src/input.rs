use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    Quit,
}

pub fn command_for_key(ev: &KeyEvent) -> Option<Command> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Dominant-axis direction of a drag. Ties go to the vertical axis, and drags
/// shorter than `threshold` on their dominant axis resolve to nothing.
pub fn swipe_direction(dx: i32, dy: i32, threshold: u32) -> Option<Direction> {
    let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());

    if ax.max(ay) == 0 || ax.max(ay) < threshold {
        return None;
    }

    if ax > ay {
        Some(if dx > 0 { Right } else { Left })
    } else {
        Some(if dy > 0 { Down } else { Up })
    }
}

/// Turns pointer press/drag events into at most one direction per press.
pub struct SwipeTracker {
    start: Option<(i32, i32)>,
    threshold: u32,
}

impl SwipeTracker {
    pub fn new(threshold: u32) -> Self {
        SwipeTracker { start: None, threshold }
    }

    pub fn press(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    pub fn drag(&mut self, x: i32, y: i32) -> Option<Direction> {
        let (sx, sy) = self.start?;
        let dir = swipe_direction(x - sx, y - sy, self.threshold);

        if dir.is_some() {
            self.start = None;
        }

        dir
    }

    pub fn release(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers, kind: KeyEventKind::Press, state: KeyEventState::NONE }
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        assert_eq!(command_for_key(&key(KeyCode::Up, KeyModifiers::NONE)), Some(Command::Steer(Up)));
        assert_eq!(command_for_key(&key(KeyCode::Char('a'), KeyModifiers::NONE)), Some(Command::Steer(Left)));
        assert_eq!(command_for_key(&key(KeyCode::Char('s'), KeyModifiers::NONE)), Some(Command::Steer(Down)));
        assert_eq!(command_for_key(&key(KeyCode::Right, KeyModifiers::NONE)), Some(Command::Steer(Right)));
        assert_eq!(command_for_key(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_start_and_quit_keys() {
        assert_eq!(command_for_key(&key(KeyCode::Enter, KeyModifiers::NONE)), Some(Command::Start));
        assert_eq!(command_for_key(&key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Command::Start));
        assert_eq!(command_for_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Command::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut ev = key(KeyCode::Up, KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(&ev), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        assert_eq!(swipe_direction(5, 2, 1), Some(Right));
        assert_eq!(swipe_direction(-5, 2, 1), Some(Left));
        assert_eq!(swipe_direction(1, 4, 1), Some(Down));
        assert_eq!(swipe_direction(1, -4, 1), Some(Up));
        assert_eq!(swipe_direction(3, 3, 1), Some(Down));
    }

    #[test]
    fn test_swipe_ignores_zero_and_short_drags() {
        assert_eq!(swipe_direction(0, 0, 0), None);
        assert_eq!(swipe_direction(0, 0, 1), None);
        assert_eq!(swipe_direction(2, 1, 3), None);
        assert_eq!(swipe_direction(3, 1, 3), Some(Right));
    }

    #[test]
    fn test_tracker_needs_a_press() {
        let mut tracker = SwipeTracker::new(1);
        assert_eq!(tracker.drag(10, 10), None);

        tracker.press(10, 10);
        assert_eq!(tracker.drag(10, 10), None);
        assert_eq!(tracker.drag(14, 11), Some(Right));
        // Consumed until the next press.
        assert_eq!(tracker.drag(20, 11), None);

        tracker.press(5, 5);
        tracker.release();
        assert_eq!(tracker.drag(5, 0), None);
    }
}
