use tokio::sync::mpsc;

use crate::log_debug;
use super::key_bindings::KeyBindings;
use super::operation::Operation;
use super::touch::touch_operation;

/// Turns raw key presses and touches into operations for the controller.
pub struct Joystick {
    bindings: KeyBindings,
    operation_tx: mpsc::UnboundedSender<Operation>,
}

impl Joystick {
    pub fn new(bindings: KeyBindings, operation_tx: mpsc::UnboundedSender<Operation>) -> Self {
        Self {
            bindings,
            operation_tx,
        }
    }

    /// Returns the forwarded operation, `None` for unbound keys or a closed channel.
    pub fn press(&self, key_code: u32) -> Option<Operation> {
        let operation = self.bindings.operation(key_code)?;
        log_debug!("valid keystrike {} -> {}", key_code, operation);
        self.emit(operation)
    }

    pub fn touch(&self, x: f64, y: f64, width: f64, height: f64) -> Option<Operation> {
        let operation = touch_operation(x, y, width, height)?;
        log_debug!("touch at ({:.0}, {:.0}) -> {}", x, y, operation);
        self.emit(operation)
    }

    pub fn is_closed(&self) -> bool {
        self.operation_tx.is_closed()
    }

    fn emit(&self, operation: Operation) -> Option<Operation> {
        self.operation_tx.send(operation).ok().map(|_| operation)
    }
}
