mod joystick;
mod key_bindings;
mod operation;
mod touch;

pub use joystick::Joystick;
pub use key_bindings::{KeyBindings, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
pub use operation::Operation;
pub use touch::touch_operation;
