mod error;
mod game_state;
mod settings;
mod types;

pub use error::GameError;
pub use game_state::GameState;
pub use settings::{GameSettings, MAX_BOARD_SIDE};
pub use types::{Direction, GameStatus, Grid, MoveResult, Seed};
