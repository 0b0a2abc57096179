//! Terminal UI showing the greeting as it is typed.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};
use typist_config::Config;
use typist_core::{ColorTheme, Emphasis, Glyph};
use typist_engine::{RunOutcome, Status};

use crate::player::Player;
use crate::surface::{SharedSurface, Snapshot};

/// Half period of the cursor blink.
const BLINK_MS: u64 = 530;

/// Frame interval; short enough for the fastest typing delays.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current color theme.
    color_theme: ColorTheme,
    /// Cursor text drawn after the last glyph.
    cursor: String,
    cursor_blink: bool,
    /// Surface written by the playback thread.
    surface: SharedSurface,
    /// Last snapshot read from the surface.
    snapshot: Snapshot,
    player: Player,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, surface: SharedSurface, player: Player) -> Self {
        Self {
            running: false,
            color_theme: config.display.color_theme,
            cursor: config.display.cursor.clone(),
            cursor_blink: config.display.cursor_blink,
            surface,
            snapshot: Snapshot::default(),
            player,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop, then stop playback.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<RunOutcome> {
        let looped = self.event_loop(&mut terminal);
        shut_down(looped, self.player)
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if let Some(snapshot) = self.surface.try_snapshot() {
                self.snapshot = snapshot;
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let color = self.color_theme.color();
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let cursor = cursor_visible(elapsed_ms, self.cursor_blink).then_some(self.cursor.as_str());

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Greeting
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Status
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        let greeting = greeting_line(&self.snapshot.glyphs, color, cursor).centered();
        frame.render_widget(greeting, chunks[1]);

        let status = Line::from(status_label(self.snapshot.status).dark_gray()).centered();
        frame.render_widget(status, chunks[3]);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[5]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Stop and join playback however the UI loop ended. A UI error wins over
/// the playback outcome.
fn shut_down(looped: color_eyre::Result<()>, player: Player) -> color_eyre::Result<RunOutcome> {
    let stopped = player.stop();
    looped.and(stopped)
}

/// Whether the cursor is drawn at `elapsed_ms`.
fn cursor_visible(elapsed_ms: u64, blink: bool) -> bool {
    !blink || (elapsed_ms / BLINK_MS) % 2 == 0
}

fn status_label(status: Option<Status>) -> &'static str {
    match status {
        None | Some(Status::Idle) | Some(Status::Running) => "typing…",
        Some(Status::Completed) => "done",
        Some(Status::Cancelled) => "cancelled",
        Some(Status::Failed) => "failed",
    }
}

/// Build the greeting line, merging runs of equally emphasized glyphs.
fn greeting_line(glyphs: &[Glyph], color: Color, cursor: Option<&str>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_emphasis = Emphasis::PLAIN;

    for glyph in glyphs {
        if glyph.emphasis != run_emphasis && !run.is_empty() {
            spans.push(Span::styled(
                std::mem::take(&mut run),
                run_emphasis.style().fg(color),
            ));
        }
        run_emphasis = glyph.emphasis;
        run.push(glyph.ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_emphasis.style().fg(color)));
    }

    if let Some(cursor) = cursor {
        spans.push(Span::styled(cursor.to_string(), Style::new().fg(color)));
    }

    Line::from(spans)
}
