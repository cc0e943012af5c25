use std::io;
use std::ops::ControlFlow;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use futures_util::{Stream, StreamExt};

use snake_common::input::{Joystick, Operation, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
use snake_common::{log, log_debug, log_error};

/// Maps a key to the code space of `KeyBindings`: arrows are 37..=40,
/// letters and digits their uppercase ASCII value.
pub fn key_code(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Left => Some(KEY_LEFT),
        KeyCode::Up => Some(KEY_UP),
        KeyCode::Right => Some(KEY_RIGHT),
        KeyCode::Down => Some(KEY_DOWN),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase() as u32),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}

/// Raw terminal events to joystick presses and touches. Esc, `q` and
/// Ctrl+C end the input.
pub struct TerminalInput {
    joystick: Joystick,
    width: u16,
    height: u16,
}

impl TerminalInput {
    pub fn new(joystick: Joystick, (width, height): (u16, u16)) -> Self {
        Self {
            joystick,
            width,
            height,
        }
    }

    pub fn handle(&mut self, event: Event) -> ControlFlow<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    log!("Quit requested");
                    return ControlFlow::Break(());
                }
                match key_code(key.code) {
                    Some(code) => {
                        self.joystick.press(code);
                    }
                    None => log_debug!("Ignoring key {:?}", key.code),
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                self.joystick
                    .touch(column as f64, row as f64, self.width as f64, self.height as f64);
            }
            Event::Resize(width, height) => {
                self.width = width;
                self.height = height;
            }
            _ => {}
        }

        if self.joystick.is_closed() {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// Drains `events` until a quit key, an error or the end of the stream.
/// Dropping the joystick afterwards closes the operation channel, which
/// stops the controller.
pub async fn read_terminal<S>(mut events: S, mut input: TerminalInput)
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    while let Some(event) = events.next().await {
        match event {
            Ok(event) => {
                if input.handle(event).is_break() {
                    break;
                }
            }
            Err(e) => {
                log_error!("Failed to read terminal event: {}", e);
                break;
            }
        }
    }
}
