use std::{io::{Stdout, Write}, thread::sleep, time::{Duration, Instant}};

use anyhow::{Context, Result};
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};

use crate::food::FoodSpawner;
use crate::input::{Command, SwipeTracker, command_for_key};
use crate::render::{render, score_text};
use crate::session::Session;
use crate::state::TickOutcome;
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

/// Drives a [`Session`] from terminal events and wall-clock time, and draws
/// it on the terminal.
pub struct SnakeGame<S: FoodSpawner, W: Write = Stdout> {
    term: TermManager<W>,
    session: Session<S>,
    swipes: SwipeTracker,
}

impl<S: FoodSpawner, W: Write> SnakeGame<S, W> {
    /// `swipe_threshold` is measured in grid cells.
    pub fn new(term: TermManager<W>, session: Session<S>, swipe_threshold: u32) -> Self {
        SnakeGame { term, session, swipes: SwipeTracker::new(swipe_threshold) }
    }

    pub fn term_mut(&mut self) -> &mut TermManager<W> {
        &mut self.term
    }

    /// Runs until the player quits.
    pub fn run(&mut self) -> Result<()> {
        self.redraw()?;
        self.term.show_message(&[
            "Arrow keys, WASD or mouse drags to steer",
            "CTRL+C to quit",
            "",
            "Press Enter to begin"
        ])?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for event in self.term.read_events_queue().context("Error reading terminal events")? {
                match self.command_for_event(event) {
                    Some(Command::Quit) => {
                        info!("Quit with score {}", self.session.state().score());
                        return Ok(());
                    }
                    Some(Command::Start) => self.start(Instant::now())?,
                    Some(Command::Steer(dir)) => {
                        self.session.steer(dir);
                    }
                    None => {}
                }
            }

            self.advance(Instant::now())?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn command_for_event(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) => command_for_key(&key),
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let (x, y) = self.term.pixel_at(column, row);
                let cell = self.session.state().grid().cell_at(x, y);
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        debug!("Pointer down over cell {:?}", cell);
                        self.swipes.press(cell.0, cell.1);
                        None
                    }
                    MouseEventKind::Drag(MouseButton::Left) => self.swipes.drag(cell.0, cell.1).map(Command::Steer),
                    MouseEventKind::Up(_) => {
                        self.swipes.release();
                        None
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn start(&mut self, now: Instant) -> Result<()> {
        if !self.session.start(now) {
            return Ok(());
        }

        self.term.hide_message()?;
        self.term.set_status(&score_text(self.session.state().score()))?;
        self.redraw()
    }

    fn advance(&mut self, now: Instant) -> Result<()> {
        match self.session.update(now) {
            TickOutcome::Skipped => {}
            TickOutcome::Moved { old_tail, .. } => {
                if old_tail.is_none() {
                    self.term.set_status(&score_text(self.session.state().score()))?;
                }
                self.redraw()?;
            }
            TickOutcome::Crashed { score } => {
                // Food eaten on the crashing step still shows up in the score.
                self.term.set_status(&score_text(score))?;
                self.game_over(score)?;
            }
        }

        Ok(())
    }

    fn game_over(&mut self, score: u32) -> Result<()> {
        self.term.show_message(&[
            "Game over!",
            &score_text(score),
            "",
            "Press Enter to play again,",
            "or CTRL+C to quit."
        ])?;
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        render(&mut self.term, self.session.state())?;
        self.term.present()?;
        Ok(())
    }
}
