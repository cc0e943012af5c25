use crate::game::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ReplayDirection {
    Unspecified = 0,
    Up = 1,
    Right = 2,
    Down = 3,
    Left = 4,
}

impl From<Direction> for ReplayDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => ReplayDirection::Up,
            Direction::Right => ReplayDirection::Right,
            Direction::Down => ReplayDirection::Down,
            Direction::Left => ReplayDirection::Left,
        }
    }
}

impl ReplayDirection {
    pub fn to_direction(self) -> Option<Direction> {
        match self {
            ReplayDirection::Up => Some(Direction::Up),
            ReplayDirection::Right => Some(Direction::Right),
            ReplayDirection::Down => Some(Direction::Down),
            ReplayDirection::Left => Some(Direction::Left),
            ReplayDirection::Unspecified => None,
        }
    }
}

pub fn direction_from_proto(value: i32) -> Option<Direction> {
    ReplayDirection::try_from(value).ok().and_then(ReplayDirection::to_direction)
}

pub fn direction_to_proto(direction: Direction) -> i32 {
    ReplayDirection::from(direction) as i32
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReplayMetadata {
    #[prost(string, tag = "1")]
    pub engine_version: String,
    #[prost(int64, tag = "2")]
    pub game_started_timestamp_ms: i64,
    #[prost(uint64, tag = "3")]
    pub init_seed: u64,
    #[prost(uint32, tag = "4")]
    pub width: u32,
    #[prost(uint32, tag = "5")]
    pub height: u32,
    #[prost(uint32, tag = "6")]
    pub initial_snake: u32,
    #[prost(uint32, tag = "7")]
    pub score_step: u32,
    #[prost(enumeration = "ReplayDirection", tag = "8")]
    pub initial_direction: i32,
}

/// One driver tick. The seed is optional on the wire; a tick without one
/// cannot be replayed.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TickRecord {
    #[prost(uint64, tag = "1")]
    pub index: u64,
    #[prost(uint64, optional, tag = "2")]
    pub seed: Option<u64>,
    #[prost(enumeration = "ReplayDirection", tag = "3")]
    pub direction: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReplayV1 {
    #[prost(message, optional, tag = "1")]
    pub metadata: Option<ReplayMetadata>,
    #[prost(message, repeated, tag = "2")]
    pub ticks: Vec<TickRecord>,
}
