//! Application struct and event loop for the continuous mode.
//!
//! Owns the terminal, the display state, the host collector, and the NVML
//! gateway. The loop is single-threaded and cooperative: one redraw per
//! tick, with a polled keypress check in between. `c` suspends the
//! full-screen display, hands the terminal to the configuration session,
//! and resumes afterwards.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::monitor::{self, NvmlGateway, SystemCollector};
use crate::session;
use crate::ui::{self, AppState};

pub struct App {
    state: AppState,
    collector: SystemCollector,
    /// None when the driver is unavailable; the display then runs in
    /// degraded, system-facts-only mode.
    gateway: Option<NvmlGateway>,
    tick_interval: Duration,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let collector = SystemCollector::new();
        let mut state = AppState::new(collector.facts());

        let gateway = match NvmlGateway::init() {
            Ok(gw) => Some(gw),
            Err(e) => {
                state.gpu_error = Some(e.to_string());
                None
            }
        };

        Self {
            state,
            collector,
            gateway,
            tick_interval: Duration::from_millis(config.refresh_interval_ms),
        }
    }

    /// Run the main event loop. Returns when the operator quits.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal before propagating any loop error, or the
        // operator's shell is left in raw mode on the alternate screen.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result?;

        println!("\nrigmon stopped.\n");
        Ok(())
    }

    /// Redraw-and-poll loop. Returns when the operator quits.
    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        self.refresh();
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            let timeout = self.tick_interval.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            self.configure(terminal)?;
                            last_tick = Instant::now();
                        }
                        _ => {}
                    }
                }
            }

            if last_tick.elapsed() >= self.tick_interval {
                self.refresh();
                last_tick = Instant::now();
            }
        }
    }

    /// One tick: re-sample CPU/RAM and capture a fresh GPU snapshot.
    fn refresh(&mut self) {
        self.state.usage = self.collector.usage();

        if let Some(gateway) = self.gateway.as_mut() {
            let result = monitor::capture(gateway).map_err(|e| e.to_string());
            self.state.update_snapshot(result);
        }

        self.state.tick_count += 1;
    }

    /// Suspend the display, run the blocking configuration dialogue on the
    /// cooked terminal, then restore the full-screen surface.
    fn configure(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let Some(gateway) = self.gateway.as_mut() else {
            self.state
                .set_status("Configuration unavailable: GPU driver not loaded".to_string());
            return Ok(());
        };

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let result = session::run(gateway, &mut input, &mut output);

        match result {
            Ok(outcome) => self.state.set_status(format!(
                "{}: memory clock {}; power limit {}",
                outcome.device_name, outcome.memory_clock, outcome.power_limit
            )),
            Err(e) => self.state.set_status(format!("Configuration aborted: {}", e)),
        }

        enable_raw_mode()?;
        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
        terminal.clear()?;
        Ok(())
    }
}
