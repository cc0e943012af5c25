use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::operation::Operation;

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;

/// Key code to operation. Codes follow the browser `keyCode` numbering:
/// letters are their uppercase ASCII value, arrows are 37..=40.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    mapping: BTreeMap<u32, Operation>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mapping = [
            (b'R' as u32, Operation::Restart),
            (KEY_UP, Operation::Up),
            (KEY_DOWN, Operation::Down),
            (KEY_LEFT, Operation::Left),
            (KEY_RIGHT, Operation::Right),
            (b'J' as u32, Operation::Down),
            (b'K' as u32, Operation::Up),
            (b'H' as u32, Operation::Left),
            (b'L' as u32, Operation::Right),
        ]
        .into_iter()
        .collect();
        Self { mapping }
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            mapping: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key_code: u32, operation: Operation) {
        self.mapping.insert(key_code, operation);
    }

    pub fn operation(&self, key_code: u32) -> Option<Operation> {
        self.mapping.get(&key_code).copied()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Validate for KeyBindings {
    fn validate(&self) -> Result<(), String> {
        let required = [
            Operation::Up,
            Operation::Down,
            Operation::Left,
            Operation::Right,
            Operation::Restart,
        ];
        for operation in required {
            if !self.mapping.values().any(|bound| *bound == operation) {
                return Err(format!("No key bound to {}", operation));
            }
        }
        Ok(())
    }
}
