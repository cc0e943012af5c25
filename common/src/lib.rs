pub mod config;
pub mod controller;
pub mod driver;
pub mod game;
pub mod input;
pub mod logger;
pub mod replay;
pub mod version;
