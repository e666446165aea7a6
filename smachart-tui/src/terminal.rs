//! Blocking terminal surface for [`ChartSpec`]s.

use std::io::{self, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use smachart_core::{ChartError, ChartRenderer, ChartSpec};

use crate::chart_panel;
use crate::theme::Theme;

/// Draws the chart full-screen and waits for the user to dismiss it.
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    theme: Theme,
}

impl ChartRenderer for TerminalRenderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), ChartError> {
        let mut session = TerminalSession::enter().map_err(render_error)?;
        let result = session.show(spec, &self.theme);
        session.leave().map_err(render_error)?;
        result.map_err(render_error)
    }
}

fn render_error(e: io::Error) -> ChartError {
    ChartError::Render(e.to_string())
}

/// True for the keys that close the chart.
pub fn is_dismiss_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => true,
        // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Raw mode plus alternate screen, undone on drop so an early return or
/// unwinding panic still hands the terminal back.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e);
            }
        };
        let mut session = Self {
            terminal,
            active: true,
        };
        session.terminal.clear()?;
        Ok(session)
    }

    /// Draw until a dismiss key arrives. Any other event (resize included)
    /// triggers a redraw.
    fn show(&mut self, spec: &ChartSpec, theme: &Theme) -> io::Result<()> {
        loop {
            self.terminal
                .draw(|f| chart_panel::render(f, f.area(), spec, theme))?;

            if let Event::Key(key) = event::read()? {
                if is_dismiss_key(&key) {
                    tracing::debug!(code = ?key.code, "chart dismissed");
                    return Ok(());
                }
            }
        }
    }

    fn leave(mut self) -> io::Result<()> {
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
            let _ = self.terminal.show_cursor();
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
