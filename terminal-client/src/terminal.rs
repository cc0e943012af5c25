use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

use snake_common::log_error;

/// Raw mode on an alternate screen with mouse capture, for as long as the
/// guard lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture, Show, LeaveAlternateScreen) {
            log_error!("Failed to restore terminal screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            log_error!("Failed to leave raw mode: {}", e);
        }
    }
}
