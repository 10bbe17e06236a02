use std::time::{Duration, Instant};

use log::{debug, info};

use crate::clock::Clock;
use crate::food::FoodSpawner;
use crate::grid::Grid;
use crate::snake::Direction;
use crate::state::{GameState, Phase, TickOutcome};

/// Owns the run/stop/reset lifecycle around a [`GameState`].
pub struct Session<S: FoodSpawner> {
    state: GameState,
    spawner: S,
    clock: Clock,
}

impl<S: FoodSpawner> Session<S> {
    pub fn new(grid: Grid, mut spawner: S, tick: Duration) -> Self {
        let state = GameState::new(grid, &mut spawner);
        Session { state, spawner, clock: Clock::new(tick) }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Starts ticking. Restarting after a game over resets first; starting a
    /// running session does nothing and returns `false`.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.state.phase() {
            Phase::Running => return false,
            Phase::Over => self.reset(),
            Phase::Idle => {}
        }

        self.state.set_phase(Phase::Running);
        self.clock.start(now);
        info!("Session started, food at {:?}", self.state.food());
        true
    }

    pub fn reset(&mut self) {
        self.clock.stop();
        self.state.reset(&mut self.spawner);
        debug!("Session reset, snake at {:?}", self.state.snake().head());
    }

    pub fn steer(&mut self, dir: Direction) -> bool {
        self.state.request_direction(dir)
    }

    /// Runs one tick if the clock says one is due.
    pub fn update(&mut self, now: Instant) -> TickOutcome {
        if !self.clock.poll(now) {
            return TickOutcome::Skipped;
        }

        let outcome = self.state.tick(&mut self.spawner);
        match outcome {
            TickOutcome::Crashed { score } => {
                self.clock.stop();
                info!("Game over, score {}", score);
            }
            TickOutcome::Moved { old_tail: None, .. } => {
                debug!("Food eaten, score {}, next food at {:?}", self.state.score(), self.state.food());
            }
            _ => {}
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::tests::ScriptedFood;

    const TICK: Duration = Duration::from_millis(150);

    fn session(food: &[(i32, i32)]) -> Session<ScriptedFood> {
        Session::new(Grid::from_pixels(400, 400, 20), ScriptedFood::new(food), TICK)
    }

    #[test]
    fn test_new_session_is_idle() {
        let mut session = session(&[(0, 0)]);
        let t0 = Instant::now();

        assert_eq!(session.state().phase(), Phase::Idle);
        assert!(!session.clock().is_running());
        assert_eq!(session.update(t0 + TICK), TickOutcome::Skipped);
        assert_eq!(session.state().snake().head(), Some((10, 10)));
    }

    #[test]
    fn test_start_runs_and_is_idempotent() {
        let mut session = session(&[(0, 0)]);
        let t0 = Instant::now();

        assert!(session.start(t0));
        assert!(!session.start(t0 + TICK / 2));
        assert_eq!(session.state().phase(), Phase::Running);

        // The second start did not push the deadline back.
        assert_eq!(
            session.update(t0 + TICK),
            TickOutcome::Moved { new_head: (11, 10), old_tail: Some((10, 10)) }
        );
    }

    #[test]
    fn test_eats_food_on_the_way() {
        let mut session = session(&[(11, 10), (0, 0)]);
        let t0 = Instant::now();
        session.start(t0);

        assert_eq!(session.update(t0 + TICK), TickOutcome::Moved { new_head: (11, 10), old_tail: None });
        assert_eq!(session.state().score(), 1);
        assert_eq!(session.state().snake().body().len(), 2);
        assert_eq!(session.state().food(), (0, 0));
    }

    #[test]
    fn test_crash_stops_clock_and_restart_resets() {
        let mut session = session(&[(0, 0), (5, 5)]);
        let mut now = Instant::now();
        session.start(now);
        session.steer(Direction::Up);

        let mut outcome = TickOutcome::Skipped;
        for _ in 0..20 {
            now += TICK;
            outcome = session.update(now);
            if matches!(outcome, TickOutcome::Crashed { .. }) {
                break;
            }
        }

        assert_eq!(outcome, TickOutcome::Crashed { score: 0 });
        assert_eq!(session.state().phase(), Phase::Over);
        assert!(!session.clock().is_running());
        assert_eq!(session.update(now + TICK), TickOutcome::Skipped);

        assert!(session.start(now));
        assert_eq!(session.state().phase(), Phase::Running);
        assert_eq!(session.state().snake().head(), Some((10, 10)));
        assert_eq!(session.state().current(), Direction::Right);
        assert_eq!(session.state().food(), (5, 5));
    }

    #[test]
    fn test_steering_before_start_is_ignored() {
        let mut session = session(&[(0, 0)]);
        assert!(!session.steer(Direction::Down));

        let t0 = Instant::now();
        session.start(t0);
        assert!(session.steer(Direction::Down));
        assert!(!session.steer(Direction::Left));
        assert_eq!(session.state().pending(), Direction::Down);
    }
}
