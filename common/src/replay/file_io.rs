use std::path::Path;
use std::io::{Read, Write};
use prost::Message;

use crate::game::GameError;
use super::messages::ReplayV1;
use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    DecodeError(prost::DecodeError),
    UnsupportedVersion { found: u8, expected: u8 },
    EmptyFile,
    MissingMetadata,
    InvalidDirection(i32),
    Game(GameError),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::DecodeError(e) => write!(f, "Decode error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
            ReplayError::EmptyFile => write!(f, "Empty replay file"),
            ReplayError::MissingMetadata => write!(f, "Replay has no metadata"),
            ReplayError::InvalidDirection(value) => write!(f, "Invalid direction in replay: {}", value),
            ReplayError::Game(e) => write!(f, "Replay cannot be played: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

impl From<prost::DecodeError> for ReplayError {
    fn from(e: prost::DecodeError) -> Self {
        ReplayError::DecodeError(e)
    }
}

impl From<GameError> for ReplayError {
    fn from(e: GameError) -> Self {
        ReplayError::Game(e)
    }
}

pub fn save_replay(path: &Path, replay: &ReplayV1) -> Result<(), ReplayError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(&save_replay_to_bytes(replay))?;
    Ok(())
}

pub fn save_replay_to_bytes(replay: &ReplayV1) -> Vec<u8> {
    let mut result = vec![REPLAY_VERSION];
    result.extend(replay.encode_to_vec());
    result
}

pub fn load_replay(path: &Path) -> Result<ReplayV1, ReplayError> {
    let mut file = std::fs::File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    load_replay_from_bytes(&buffer)
}

pub fn load_replay_from_bytes(bytes: &[u8]) -> Result<ReplayV1, ReplayError> {
    let Some((&version, payload)) = bytes.split_first() else {
        return Err(ReplayError::EmptyFile);
    };

    if version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: version,
            expected: REPLAY_VERSION,
        });
    }

    Ok(ReplayV1::decode(payload)?)
}

/// `<timestamp>_SNAKE_<version>_<index>.snakereplay`; the index keeps
/// several games finished in the same second apart.
pub fn generate_replay_filename(version: &str, index: usize) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let sanitized_version = version.replace('.', "_");

    format!(
        "{}_SNAKE_{}_{}.{}",
        timestamp, sanitized_version, index, REPLAY_FILE_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::messages::{ReplayMetadata, TickRecord};

    fn create_test_replay() -> ReplayV1 {
        ReplayV1 {
            metadata: Some(ReplayMetadata {
                engine_version: "1.0.0".to_string(),
                game_started_timestamp_ms: 1234567890,
                init_seed: 42,
                width: 20,
                height: 15,
                initial_snake: 5,
                score_step: 5,
                initial_direction: 2,
            }),
            ticks: vec![TickRecord { index: 0, seed: Some(7), direction: 1 }],
        }
    }

    #[test]
    fn test_save_load_replay_bytes() {
        let replay = create_test_replay();

        let bytes = save_replay_to_bytes(&replay);
        assert_eq!(bytes[0], REPLAY_VERSION);

        let loaded = load_replay_from_bytes(&bytes).unwrap();
        assert_eq!(loaded, replay);
    }

    #[test]
    fn test_save_load_replay_file() {
        let replay = create_test_replay();
        let random_number: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("temp_snake_replay_{}.{}", random_number, REPLAY_FILE_EXTENSION));

        save_replay(&path, &replay).unwrap();
        let loaded = load_replay(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.ticks.len(), 1);
        assert_eq!(loaded.metadata.unwrap().init_seed, 42);
    }

    #[test]
    fn test_generate_replay_filename() {
        let filename = generate_replay_filename("1.2.3", 4);
        assert!(filename.ends_with(".snakereplay"));
        assert!(filename.contains("SNAKE"));
        assert!(filename.contains("1_2_3_4"));
    }

    #[test]
    fn test_load_empty_file_error() {
        let result = load_replay_from_bytes(&[]);
        assert!(matches!(result, Err(ReplayError::EmptyFile)));
    }

    #[test]
    fn test_load_unsupported_version_error() {
        let result = load_replay_from_bytes(&[99]);
        assert!(matches!(result, Err(ReplayError::UnsupportedVersion { found: 99, .. })));
    }

    #[test]
    fn test_load_missing_file_error() {
        let result = load_replay(Path::new("/definitely/not/here.snakereplay"));
        assert!(matches!(result, Err(ReplayError::IoError(_))));
    }
}
