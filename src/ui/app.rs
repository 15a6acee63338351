//! Main TUI application state and logic

use crate::counter::{Advance, Generation, GridConfig, PathCounter};
use crate::snapshot::Snapshot;
use crate::ui::panes::{
    render_grid_pane, render_legend, render_stack_pane, render_status_bar, GridRenderData,
    StackRenderData, StackScrollState, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Step applied by the `[` and `]` keys
const DELAY_STEP_MS: u64 = 100;

/// Longest a continuation is ever scheduled ahead
const MAX_SCHEDULE_AHEAD: Duration = Duration::from_secs(24 * 60 * 60);

/// Instant `pause` after `now`, capped so the addition cannot overflow
fn due_after(now: Instant, pause: Duration) -> Instant {
    now + pause.min(MAX_SCHEDULE_AHEAD)
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Grid,
    Stack,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Grid,
        }
    }
}

/// What typed characters are collected for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    GridSize(String),
    StepDelay(String),
}

/// A suspended run waiting to be resumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    pub generation: Generation,
    pub due: Instant,
}

/// The main application state
pub struct App {
    /// The path counter driving the visualization
    pub counter: PathCounter,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index of the snapshot on display; may equal the history length when
    /// recording stopped and the live snapshot is shown instead
    pub view_position: usize,

    /// Most recent snapshot produced by the counter
    pub live: Option<Snapshot>,

    /// Pending resumptions. Continuations from superseded runs stay queued and
    /// are discarded by the counter when they fire.
    pub continuations: Vec<Continuation>,

    /// When the next history replay step is due while playing
    pub replay_due: Instant,

    pub stack_scroll: StackScrollState,

    /// Typed size/delay input state
    pub input_mode: InputMode,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the last status message reports an error
    pub has_error: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(counter: PathCounter) -> Self {
        let now = Instant::now();
        App {
            counter,
            focused_pane: FocusedPane::Grid,
            view_position: 0,
            live: None,
            continuations: Vec::new(),
            replay_due: now,
            stack_scroll: StackScrollState::default(),
            input_mode: InputMode::Normal,
            should_quit: false,
            status_message: String::from("Ready! Press Enter to start"),
            has_error: false,
            is_playing: false,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick(Instant::now());

            // Use poll with timeout so playback keeps moving
            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance playback: replay recorded history, then fire due continuations
    pub fn tick(&mut self, now: Instant) {
        if !self.is_playing {
            return;
        }

        if self.view_position + 1 < self.counter.history().len() {
            if now >= self.replay_due {
                self.view_position += 1;
                self.replay_due = due_after(now, self.pause_of_view());
            }
            return;
        }

        let (due, pending): (Vec<Continuation>, Vec<Continuation>) = self
            .continuations
            .drain(..)
            .partition(|c| c.due <= now);
        self.continuations = pending;

        for continuation in due {
            self.fire(continuation, now);
        }
    }

    /// Resume one continuation and schedule the next if the run continues
    fn fire(&mut self, continuation: Continuation, now: Instant) {
        match self.counter.resume(continuation.generation) {
            Advance::Step(step) => {
                self.live = Some(step.snapshot);
                self.follow_live();
                self.continuations.push(Continuation {
                    generation: continuation.generation,
                    due: due_after(now, step.pause),
                });
                self.set_status("Playing...");
            }
            Advance::Finished(total) => {
                self.is_playing = false;
                self.follow_live();
                self.set_status(&format!("Done: {} paths", total));
            }
            Advance::Stale => {
                debug!(
                    "dropped continuation from generation {}",
                    continuation.generation.id()
                );
            }
            Advance::Idle => {}
        }
    }

    /// Point the view at the newest snapshot
    fn follow_live(&mut self) {
        let len = self.counter.history().len();
        self.view_position = if self.counter.history_error().is_some() {
            len
        } else {
            len.saturating_sub(1)
        };
    }

    fn pause_of_view(&self) -> Duration {
        let delay = self.counter.config().step_delay();
        self.displayed_snapshot()
            .map_or(delay, |s| delay.saturating_mul(s.kind.pause_units()))
    }

    /// The snapshot currently on display
    pub fn displayed_snapshot(&self) -> Option<&Snapshot> {
        displayed(&self.counter, &self.live, self.view_position)
    }

    fn set_status(&mut self, message: &str) {
        self.status_message = message.to_string();
        self.has_error = false;
    }

    fn set_error(&mut self, message: String) {
        self.status_message = message;
        self.has_error = true;
    }

    /// Begin a new run; any queued continuation becomes stale
    pub fn start(&mut self, now: Instant) {
        let generation = self.counter.start();
        self.live = None;
        self.view_position = 0;
        self.is_playing = true;
        self.continuations.push(Continuation {
            generation,
            due: now,
        });
        self.set_status("Started");
    }

    /// Clear all run state without starting
    pub fn reset(&mut self) {
        self.counter.reset();
        self.live = None;
        self.view_position = 0;
        self.is_playing = false;
        self.set_status("Reset");
    }

    /// Apply a new configuration; this also resets
    pub fn configure(&mut self, config: GridConfig) {
        self.counter.configure(config);
        self.live = None;
        self.view_position = 0;
        self.is_playing = false;
        self.set_status(&format!(
            "Grid {}×{}, delay {}ms",
            config.grid_size(),
            config.grid_size(),
            config.step_delay_ms()
        ));
    }

    /// Step forward through history, advancing the live run at the end
    pub fn step_forward(&mut self, now: Instant) {
        self.is_playing = false;
        if self.view_position + 1 < self.counter.history().len() {
            self.view_position += 1;
            self.set_status("Stepped forward");
            return;
        }
        if !self.counter.is_running() {
            self.set_status("Cannot step forward: no active run");
            return;
        }
        let generation = self.counter.generation();
        // Outstanding timers for this run would double-step on resume
        self.continuations.retain(|c| c.generation != generation);
        self.fire(Continuation { generation, due: now }, now);
        self.continuations.retain(|c| c.generation != generation);
        if self.counter.is_running() {
            self.set_status("Stepped forward");
        }
    }

    pub fn step_backward(&mut self) {
        self.is_playing = false;
        if self.view_position == 0 {
            self.set_status("Cannot step backward: already at the first snapshot");
        } else {
            self.view_position -= 1;
            self.set_status("Stepped backward");
        }
    }

    /// Toggle auto-play
    pub fn toggle_play(&mut self, now: Instant) {
        self.is_playing = !self.is_playing;
        if !self.is_playing {
            self.set_status("Paused");
            return;
        }

        let generation = self.counter.generation();
        let behind = self.view_position + 1 < self.counter.history().len();
        if behind {
            self.replay_due = now;
        } else if self.counter.is_running() {
            if !self.continuations.iter().any(|c| c.generation == generation) {
                self.continuations.push(Continuation {
                    generation,
                    due: now,
                });
            }
        } else if self.counter.history().is_empty() {
            self.is_playing = false;
            self.start(now);
            return;
        } else {
            self.is_playing = false;
            self.set_status("Playback complete");
            return;
        }
        self.set_status("Playing...");
    }

    fn adjust(&mut self, size_delta: isize, delay_delta: i64) {
        let current = self.counter.config();
        let size = current.grid_size().saturating_add_signed(size_delta);
        let delay = current.step_delay_ms().saturating_add_signed(delay_delta);
        let config = GridConfig::clamped(size, delay);
        if config != current {
            self.configure(config);
        }
    }

    /// Apply a typed size or delay
    fn submit_input(&mut self, mode: InputMode) {
        let current = self.counter.config();
        let result = match mode {
            InputMode::GridSize(text) => GridConfig::parse_size(&text)
                .and_then(|size| GridConfig::from_input(size, current.step_delay_ms())),
            InputMode::StepDelay(text) => GridConfig::parse_delay(&text)
                .and_then(|delay| GridConfig::from_input(current.grid_size(), delay)),
            InputMode::Normal => return,
        };
        match result {
            Ok(config) => self.configure(config),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Legend on top, panes in the middle, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[1]);

        let config = self.counter.config();
        let snapshot = displayed(&self.counter, &self.live, self.view_position);
        let grid_size = snapshot.map_or(config.grid_size(), |s| s.grid_size);

        render_legend(frame, main_chunks[0]);

        render_grid_pane(
            frame,
            columns[0],
            GridRenderData {
                snapshot,
                grid_size,
                total: self.counter.total(),
            },
            self.focused_pane == FocusedPane::Grid,
        );

        render_stack_pane(
            frame,
            columns[1],
            StackRenderData { snapshot },
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        let input_prompt = match &self.input_mode {
            InputMode::Normal => None,
            InputMode::GridSize(text) => Some(format!("Grid size: {}_", text)),
            InputMode::StepDelay(text) => Some(format!("Step delay (ms): {}_", text)),
        };

        render_status_bar(
            frame,
            main_chunks[2],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.view_position,
                total_steps: self.counter.history().len(),
                grid_size: config.grid_size(),
                step_delay_ms: config.step_delay_ms(),
                history_bytes: self.counter.history().memory_usage(),
                history_limit: self.counter.history().memory_limit(),
                is_playing: self.is_playing,
                is_running: self.counter.is_running(),
                is_finished: self.counter.total().is_some(),
                input_prompt,
                has_error: self.has_error,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let now = Instant::now();

        if self.input_mode != InputMode::Normal {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.start(now),
            KeyCode::Backspace | KeyCode::Char('r') => self.reset(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => self.step_backward(),
            KeyCode::Right => self.step_forward(now),
            KeyCode::Home => {
                self.is_playing = false;
                self.view_position = 0;
                self.set_status("Jumped to start");
            }
            KeyCode::End => {
                self.is_playing = false;
                self.follow_live();
                self.set_status("Jumped to latest");
            }
            KeyCode::Up => {
                if self.focused_pane == FocusedPane::Stack {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.focused_pane == FocusedPane::Stack {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_add(1);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust(1, 0),
            KeyCode::Char('-') => self.adjust(-1, 0),
            KeyCode::Char(']') => self.adjust(0, DELAY_STEP_MS as i64),
            KeyCode::Char('[') => self.adjust(0, -(DELAY_STEP_MS as i64)),
            KeyCode::Char('s') => {
                self.is_playing = false;
                self.input_mode = InputMode::GridSize(String::new());
            }
            KeyCode::Char('d') => {
                self.is_playing = false;
                self.input_mode = InputMode::StepDelay(String::new());
            }
            KeyCode::Char(' ') => {
                // 200ms debounce to prevent key repeat spam
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play(now);
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status("Input cancelled");
            }
            KeyCode::Enter => {
                let mode = std::mem::replace(&mut self.input_mode, InputMode::Normal);
                self.submit_input(mode);
            }
            KeyCode::Backspace => {
                if let InputMode::GridSize(text) | InputMode::StepDelay(text) =
                    &mut self.input_mode
                {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let InputMode::GridSize(text) | InputMode::StepDelay(text) =
                    &mut self.input_mode
                {
                    text.push(c);
                }
            }
            _ => {}
        }
    }
}

// Borrows only the fields it reads, so panes can take `&mut` scroll state alongside
fn displayed<'a>(
    counter: &'a PathCounter,
    live: &'a Option<Snapshot>,
    view_position: usize,
) -> Option<&'a Snapshot> {
    counter.history().get(view_position).or(live.as_ref())
}
