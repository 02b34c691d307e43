use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use lumen_background::{
    AnimatedBackground, BackgroundSession, HostEvent, Raster, StaticBackground,
};
use lumen_config::Config;
use lumen_core::{Capabilities, Point, Rgb, Theme};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};

mod host;
mod logging;
mod platform;

use host::TerminalHost;

/// Event poll timeout while no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut config = Config::load()?;
    config.apply_env()?;
    config.validate()?;

    if let Some(path) = logging::init()? {
        log::info!("logging to {}", path.display());
    }
    let capabilities = platform::detect(&config);

    let terminal = ratatui::init();
    let result = App::new(config, capabilities).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    capabilities: Capabilities,
    host: TerminalHost,
    /// Background session, started once the terminal size is known.
    session: Option<BackgroundSession<StdRng>>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, capabilities: Capabilities) -> Self {
        Self {
            running: false,
            host: TerminalHost::new(config.display.fps),
            config,
            capabilities,
            session: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.start_session(size.width, size.height);
        self.with_session(|app| {
            app.running = true;
            while app.running {
                terminal.draw(|frame| app.render(frame))?;
                app.handle_crossterm_events()?;
                app.dispatch_frame();
            }
            Ok(())
        })
    }

    /// Run `body`, then end the session however `body` finished.
    fn with_session(
        &mut self,
        body: impl FnOnce(&mut Self) -> color_eyre::Result<()>,
    ) -> color_eyre::Result<()> {
        let result = body(self);
        self.end_session();
        result
    }

    fn start_session(&mut self, cols: u16, rows: u16) {
        let scale = self.config.display.pixel_scale;
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.session = Some(BackgroundSession::start(
            &mut self.host,
            self.capabilities,
            self.config.animator_settings(),
            Raster::viewport_for_cells(cols, rows, scale),
            scale,
            self.config.theme,
            rng,
        ));
    }

    fn end_session(&mut self) {
        if let Some(session) = &mut self.session {
            session.end(&mut self.host);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let theme = self.config.theme;

        match self.session.as_ref().and_then(|s| s.raster()) {
            Some(raster) => frame.render_widget(AnimatedBackground::new(raster, theme), area),
            None => frame.render_widget(StaticBackground::new(theme), area),
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Background
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let accent: Color = theme.palette().link.into();
        let muted: Color = match theme {
            Theme::Dark => Rgb::new(100, 116, 139).into(),
            Theme::Light => Rgb::new(71, 85, 105).into(),
        };
        let next_theme = theme.toggle().name();
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".fg(muted),
            "t".bold().fg(accent),
            Span::styled(format!(" {next_theme} theme"), Style::new().fg(muted)),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next scheduled frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.host.time_until_frame().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Run the frame callback once its deadline has passed.
    fn dispatch_frame(&mut self) {
        if let Some(handle) = self.host.take_due_frame() {
            if let Some(session) = &mut self.session {
                session.on_frame(&mut self.host, handle);
            }
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            _ => {}
        }
    }

    /// Forward pointer motion to the background, in viewport units.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !self.host.is_subscribed(HostEvent::PointerMove) {
            return;
        }
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let scale = self.config.display.pixel_scale;
        let position = Point::new(
            (mouse.column as f32 + 0.5) * scale,
            (mouse.row as f32 + 0.5) * 2.0 * scale,
        );
        if let Some(session) = &mut self.session {
            session.on_pointer_move(position);
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        if !self.host.is_subscribed(HostEvent::Resize) {
            return;
        }
        let viewport = Raster::viewport_for_cells(cols, rows, self.config.display.pixel_scale);
        if let Some(session) = &mut self.session {
            session.on_resize(viewport);
        }
    }

    /// Switch between light and dark, remembering the choice.
    fn toggle_theme(&mut self) {
        let theme = self.config.theme.toggle();
        self.config.theme = theme;
        if let Some(session) = &mut self.session {
            session.set_theme(theme);
        }
        log::info!("theme switched to {}", theme.name());
        if let Err(err) = Config::save_theme(theme) {
            log::warn!("failed to save theme: {err:#}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    fn app() -> App {
        let mut app = App::new(Config::default(), Capabilities::default());
        app.host = TerminalHost::detached(60);
        app.start_session(40, 12);
        app
    }

    #[test]
    fn test_session_starts_animated() {
        let app = app();
        assert!(app.session.as_ref().is_some_and(|s| s.is_animated()));
        assert!(app.host.is_subscribed(HostEvent::PointerMove));
        assert!(app.host.time_until_frame().is_some());
    }

    #[test]
    fn test_failed_loop_still_ends_session() {
        let mut app = app();
        let result = app.with_session(|_| Err(eyre!("terminal went away")));

        assert!(result.is_err());
        assert!(!app.host.is_subscribed(HostEvent::PointerMove));
        assert!(!app.host.is_subscribed(HostEvent::Resize));
        assert!(app.host.time_until_frame().is_none());
        assert!(app.session.as_ref().is_some_and(|s| !s.is_animated()));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
