#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidConfig(String),
    MissingSeed,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidConfig(reason) => write!(f, "Invalid game config: {}", reason),
            GameError::MissingSeed => write!(f, "Seed not given"),
        }
    }
}

impl std::error::Error for GameError {}
