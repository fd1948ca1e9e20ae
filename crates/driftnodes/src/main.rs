use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use driftnodes_background::{
    AnimationClock, AnimatorSettings, FloatingBackground, MonotonicSource,
};
use driftnodes_config::Config;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{debug, info};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();
    let config = Config::load()?;
    info!(log = ?log_path, "driftnodes starting");

    let terminal = ratatui::init();
    run_session(
        || Ok(execute!(stdout(), EnableFocusChange)?),
        || App::new(&config).run(terminal),
        || {
            let _ = execute!(stdout(), DisableFocusChange);
            ratatui::restore();
        },
    )
}

/// Run `setup` then `body`. `teardown` runs afterwards whether either failed.
fn run_session<T>(
    setup: impl FnOnce() -> color_eyre::Result<()>,
    body: impl FnOnce() -> color_eyre::Result<T>,
    teardown: impl FnOnce(),
) -> color_eyre::Result<T> {
    let result = setup().and_then(|()| body());
    teardown();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Floating node background.
    background: FloatingBackground,
    /// Animation time, frozen while paused.
    clock: AnimationClock<MonotonicSource>,
    /// Time between frames.
    frame_interval: Duration,
    /// Pause when the terminal loses focus.
    pause_on_focus_loss: bool,
    /// Paused by the user rather than by focus loss.
    user_paused: bool,
    /// Show the key help line.
    show_help: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let settings = AnimatorSettings {
            burst_count: config.spawn.burst_count,
            burst_stagger_ms: config.spawn.burst_stagger_ms,
            interval_ms: config.spawn.interval_ms,
            max_live_nodes: config.spawn.max_live_nodes,
            seed: config.behavior.seed,
        };
        Self {
            running: false,
            background: FloatingBackground::new(
                settings,
                config.render.cell_width_px,
                config.render.cell_height_px,
                config.render.background_rgb(),
            ),
            clock: AnimationClock::start(),
            frame_interval: Duration::from_millis(config.render.frame_interval_ms),
            pause_on_focus_loss: config.behavior.pause_on_focus_loss,
            user_paused: false,
            show_help: config.behavior.show_help,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!(
            live = self.background.animator().live_count(),
            "driftnodes exiting"
        );
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let now_ms = self.clock.now_ms();
        let report = self.background.render(frame, now_ms);
        if report.spawned > 0 || report.expired > 0 {
            debug!(
                spawned = report.spawned,
                expired = report.expired,
                skipped = report.skipped,
                live = report.live,
                "tick"
            );
        }

        if !self.show_help {
            return;
        }

        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let accent = Color::Rgb(0, 212, 255);
        let status = if self.clock.is_paused() {
            " paused"
        } else {
            ""
        };
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "space".bold().fg(accent),
            " pause  ".dark_gray(),
            "n".bold().fg(accent),
            " spawn  ".dark_gray(),
            "h".bold().fg(accent),
            " hide help".dark_gray(),
            status.yellow(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::FocusLost => self.on_focus_change(false),
                Event::FocusGained => self.on_focus_change(true),
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
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('n')) => self.spawn_now(),
            (_, KeyCode::Char('h')) => self.toggle_help(),
            _ => {}
        }
    }

    /// Pause while unfocused, unless the user paused explicitly.
    fn on_focus_change(&mut self, focused: bool) {
        if !self.pause_on_focus_loss || self.user_paused {
            return;
        }
        if focused {
            self.clock.resume();
        } else {
            self.clock.pause();
        }
        debug!(focused, "focus changed");
    }

    /// Toggle the animation pause.
    fn toggle_pause(&mut self) {
        self.clock.toggle();
        self.user_paused = self.clock.is_paused();
    }

    /// Spawn one node right away.
    fn spawn_now(&mut self) {
        if self.clock.is_paused() {
            return;
        }
        let now_ms = self.clock.now_ms();
        if let Some(id) = self.background.spawn_now(now_ms) {
            debug!(id = id.0, "manual spawn");
        }
    }

    /// Show or hide the help line.
    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&Config::default());
        app.running = true;
        app.on_key_event(key(KeyCode::Char('q')));
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut app = App::new(&Config::default());
        app.on_key_event(key(KeyCode::Char(' ')));
        assert!(app.clock.is_paused());
        assert!(app.user_paused);
        app.on_key_event(key(KeyCode::Char(' ')));
        assert!(!app.clock.is_paused());
        assert!(!app.user_paused);
    }

    #[test]
    fn test_n_spawns_once_a_frame_is_drawn() {
        let mut app = App::new(&Config::default());
        app.on_key_event(key(KeyCode::Char('n')));
        assert_eq!(app.background.animator().live_count(), 0);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let live = app.background.animator().live_count();
        app.on_key_event(key(KeyCode::Char('n')));
        assert_eq!(app.background.animator().live_count(), live + 1);
    }

    #[test]
    fn test_n_ignored_while_paused() {
        let mut app = App::new(&Config::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let live = app.background.animator().live_count();

        app.on_key_event(key(KeyCode::Char(' ')));
        app.on_key_event(key(KeyCode::Char('n')));
        assert_eq!(app.background.animator().live_count(), live);

        app.on_key_event(key(KeyCode::Char(' ')));
        app.on_key_event(key(KeyCode::Char('n')));
        assert_eq!(app.background.animator().live_count(), live + 1);
    }

    #[test]
    fn test_session_tears_down_after_failed_setup() {
        let mut ran = false;
        let mut torn_down = false;
        let result = run_session(
            || Err(eyre!("focus reporting unavailable")),
            || {
                ran = true;
                Ok(())
            },
            || torn_down = true,
        );
        assert!(result.is_err());
        assert!(!ran);
        assert!(torn_down);
    }

    #[test]
    fn test_session_tears_down_after_body() {
        let mut torn_down = false;
        let result = run_session(|| Ok(()), || Ok(7), || torn_down = true);
        assert_eq!(result.unwrap(), 7);
        assert!(torn_down);

        let mut torn_down = false;
        let result: color_eyre::Result<()> =
            run_session(|| Ok(()), || Err(eyre!("draw failed")), || torn_down = true);
        assert!(result.is_err());
        assert!(torn_down);
    }

    #[test]
    fn test_focus_loss_pauses_unless_user_paused() {
        let mut app = App::new(&Config::default());
        app.on_focus_change(false);
        assert!(app.clock.is_paused());
        app.on_focus_change(true);
        assert!(!app.clock.is_paused());

        app.toggle_pause();
        app.on_focus_change(true);
        assert!(app.clock.is_paused());
    }

    #[test]
    fn test_focus_loss_ignored_when_disabled() {
        let mut config = Config::default();
        config.behavior.pause_on_focus_loss = false;
        let mut app = App::new(&config);
        app.on_focus_change(false);
        assert!(!app.clock.is_paused());
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::new(&Config::default());
        assert!(app.show_help);
        app.on_key_event(key(KeyCode::Char('h')));
        assert!(!app.show_help);
    }
}
