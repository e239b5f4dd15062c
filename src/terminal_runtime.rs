use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal handle the renderer draws into.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Drawing surface for the game loop.
///
/// The driver creates exactly one before its first tick and keeps it for
/// the whole run; `render` calls only borrow it through
/// [`RenderContext::terminal_mut`]. The raw-mode alternate screen lives as
/// long as the context. Dropping it, returning an error out of the loop, or
/// panicking all leave the user's shell as it was.
pub struct RenderContext {
    terminal: AppTerminal,
}

impl RenderContext {
    /// Takes over the terminal for the game.
    ///
    /// A partially initialised terminal is restored before the error is
    /// returned.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        Terminal::new(CrosstermBackend::new(stdout))
            .map(|terminal| Self { terminal })
            .inspect_err(|_| {
                let _ = restore_terminal();
            })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Panic messages would otherwise land on the alternate screen and vanish.
fn install_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
