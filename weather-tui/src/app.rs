//! App — terminal event loop around the dashboard controller.
//!
//! - `App::new` builds the controller once; `App::run` mounts it, drives it
//!   and always tears it down before returning.
//! - Terminal input is read on a blocking task and forwarded over a channel.
//! - Controller events (clock ticks, fetch settlements) arrive on their own
//!   channel; both are multiplexed with `tokio::select!`.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_input::{Input, backend::crossterm::EventHandler};
use weather_core::{DashboardController, DashboardEvents, WeatherProvider};

use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(200);

pub struct App {
    controller: DashboardController,
    events: DashboardEvents,
    search: Input,
    should_quit: bool,
}

impl App {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_location: impl Into<String>) -> Self {
        let (controller, events) = DashboardController::new(provider, default_location);
        Self { controller, events, search: Input::default(), should_quit: false }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = TerminalGuard::enter()?;
        let (input_tx, mut input_rx) = mpsc::channel::<Event>(256);

        // ── Background task: keyboard/resize events ─────────────────────────
        // Polls with a timeout so the task notices when the loop has exited.
        tokio::task::spawn_blocking(move || {
            while !input_tx.is_closed() {
                match event::poll(INPUT_POLL) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if input_tx.blocking_send(ev).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        self.controller.mount();

        let mut needs_redraw = true;
        let result = loop {
            if needs_redraw {
                let state = self.controller.state();
                if let Err(e) = terminal.draw(|f| ui::draw(f, state, &self.search)) {
                    break Err(e.into());
                }
            }

            if self.should_quit {
                break Ok(());
            }

            needs_redraw = tokio::select! {
                Some(ev) = input_rx.recv() => self.handle_event(ev),
                Some(ev) = self.events.recv() => self.controller.apply(ev),
                else => break Ok(()),
            };
        };

        self.controller.teardown();
        info!("dashboard closed");
        result
    }

    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => true,
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                if self.controller.submit() {
                    let location = self.controller.state().active_location();
                    debug!(%location, "search submitted");
                    self.search = Input::default();
                }
            }
            _ => {
                if self.search.handle_event(&Event::Key(key)).is_some() {
                    self.controller.set_query(self.search.value());
                }
            }
        }
        true
    }
}

type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode until dropped.
struct RawMode {
    disable: fn() -> io::Result<()>,
}

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { disable: disable_raw_mode })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = (self.disable)();
    }
}

/// Raw mode + alternate screen for as long as the guard lives.
struct TerminalGuard {
    terminal: TuiTerminal,
    // Dropped after `terminal`, once the alternate screen is gone.
    _raw_mode: RawMode,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        Self::with_raw_mode(RawMode::enable()?, open_alternate_screen)
    }

    /// A failing `open` drops `raw_mode`, so the shell gets a cooked terminal back.
    fn with_raw_mode(
        raw_mode: RawMode,
        open: impl FnOnce() -> io::Result<TuiTerminal>,
    ) -> anyhow::Result<Self> {
        let terminal = open()?;
        Ok(Self { terminal, _raw_mode: raw_mode })
    }
}

fn open_alternate_screen() -> io::Result<TuiTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })
}

impl Deref for TerminalGuard {
    type Target = TuiTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
