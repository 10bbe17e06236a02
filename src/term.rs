use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, poll, read};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::TermCoords;
use crate::render::{Paint, Surface};

const PIXEL_CHAR: char = '█';
/// Terminal columns per surface pixel, so cells come out roughly square.
const PIXEL_COLUMNS: u16 = 2;

type Glyph = (char, Option<Color>);
const BLANK: Glyph = (' ', None);

pub struct TermManager<W: Write = Stdout> {
    width: u16,
    height: u16,
    stdout: W,
    screen: Vec<Glyph>,
    frame: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager::with_size(width, height, stdout()))
    }
}

impl<W: Write> TermManager<W> {
    /// A `width` x `height` character screen written to `out`.
    pub fn with_size(width: u16, height: u16, out: W) -> Self {
        let cells = width as usize * height as usize;
        TermManager {
            width,
            height,
            stdout: out,
            screen: vec![BLANK; cells],
            frame: vec![BLANK; cells],
            current_msg: None,
        }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, DisableMouseCapture, LeaveAlternateScreen)
    }

    pub fn read_events_queue(&self) -> io::Result<Vec<Event>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            events.push(read()?);
        }

        Ok(events)
    }

    /// Surface pixel under a terminal cell.
    pub fn pixel_at(&self, column: u16, row: u16) -> (i32, i32) {
        ((column / PIXEL_COLUMNS) as i32, row as i32)
    }

    pub fn set_status(&mut self, text: &str) -> io::Result<()> {
        let row = self.height.saturating_sub(1);
        let line = format!("{:<width$}", text, width = self.width as usize);

        for (x, ch) in line.chars().take(self.width as usize).enumerate() {
            self.print_at((x as u16, row), (ch, None))?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), BLANK)?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), (ch, None))?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let Some(msg) = self.current_msg.take() else {
            return Ok(());
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(glyph) = self.index(pos).map(|i| self.screen[i]) {
                    self.print_at_no_save(pos, glyph)?;
                }
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    /// Writes the cells of the drawn frame that differ from what is on
    /// screen. Cells under an open message are left for `hide_message`.
    pub fn present(&mut self) -> io::Result<()> {
        for i in 0..self.frame.len() {
            if self.frame[i] == self.screen[i] {
                continue;
            }

            let pos = ((i % self.width as usize) as u16, (i / self.width as usize) as u16);
            let glyph = self.frame[i];
            self.screen[i] = glyph;

            if !self.is_under_message(pos) {
                self.print_at_no_save(pos, glyph)?;
            }
        }

        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: TermCoords, glyph: Glyph) -> io::Result<()> {
        if let Some(i) = self.index(pos) {
            self.screen[i] = glyph;
            self.frame[i] = glyph;
        }
        self.print_at_no_save(pos, glyph)
    }

    fn print_at_no_save(&mut self, pos: TermCoords, glyph: Glyph) -> io::Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        let (ch, color) = glyph;
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;
        match color {
            Some(color) => queue!(self.stdout, style::SetForegroundColor(color), style::Print(ch), style::ResetColor),
            None => queue!(self.stdout, style::Print(ch)),
        }
    }

    fn index(&self, pos: TermCoords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn play_rows(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    fn is_under_message(&self, pos: TermCoords) -> bool {
        self.current_msg.as_ref().is_some_and(|msg| {
            pos.0 >= msg.top_left.0 && pos.0 < msg.top_left.0 + msg.width &&
            pos.1 >= msg.top_left.1 && pos.1 < msg.top_left.1 + msg.height
        })
    }
}

impl<W: Write> Surface for TermManager<W> {
    /// Everything above the status line, two columns per pixel.
    fn size(&self) -> (u32, u32) {
        ((self.width / PIXEL_COLUMNS) as u32, self.play_rows() as u32)
    }

    fn clear(&mut self) -> io::Result<()> {
        let play_cells = self.width as usize * self.play_rows() as usize;
        self.frame[..play_cells].fill(BLANK);
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, paint: Paint) -> io::Result<()> {
        let (max_x, max_y) = self.size();
        let glyph = (PIXEL_CHAR, Some(paint_color(paint)));

        for py in y.max(0)..(y + h as i32).min(max_y as i32) {
            for px in x.max(0)..(x + w as i32).min(max_x as i32) {
                for col in 0..PIXEL_COLUMNS {
                    let pos = (px as u16 * PIXEL_COLUMNS + col, py as u16);
                    if let Some(i) = self.index(pos) {
                        self.frame[i] = glyph;
                    }
                }
            }
        }

        Ok(())
    }
}

impl Message {
    pub fn new(width: u16, height: u16, top_left: TermCoords) -> Self {
        Message { width, height, top_left }
    }
}

fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Head => Color::DarkGreen,
        Paint::Body => Color::Green,
        Paint::Food => Color::Red,
    }
}
