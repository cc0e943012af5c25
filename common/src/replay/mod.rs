pub mod file_io;
pub mod messages;
pub mod player;
pub mod recorder;

pub use file_io::{
    generate_replay_filename, load_replay, load_replay_from_bytes, save_replay,
    save_replay_to_bytes, ReplayError,
};
pub use messages::{ReplayDirection, ReplayMetadata, ReplayV1, TickRecord};
pub use player::ReplayPlayer;
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;
