mod config;
mod playback;
mod terminal;
mod terminal_input;
mod text_view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use crossterm::event::EventStream;
use tokio::sync::mpsc;

use snake_common::config::Validate;
use snake_common::controller::{Controller, View};
use snake_common::driver::{Driver, SystemClock};
use snake_common::game::{Direction, GameState};
use snake_common::input::Joystick;
use snake_common::logger::{self, LogLevel};
use snake_common::replay::{generate_replay_filename, save_replay, ReplayV1};
use snake_common::version::VERSION;
use snake_common::{log, log_error};

use config::{get_config_manager, Config, ReplayConfig};
use playback::play_back;
use terminal::TerminalGuard;
use terminal_input::{read_terminal, TerminalInput};
use text_view::TextView;

#[derive(Parser)]
#[command(name = "snake_terminal", version)]
struct Args {
    /// Config file; defaults to snake_terminal_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    interval_ms: Option<u64>,

    /// Starting direction: up, down, left or right.
    #[arg(long)]
    direction: Option<Direction>,

    /// Play back a saved replay instead of starting a game.
    #[arg(long)]
    replay: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let config = load_config(&args)?;

    if let Some(replay_path) = &args.replay {
        let mut view = TextView::stdout();
        let game = play_back(replay_path, &mut view, config.driver.interval()).await?;
        log!("Replay finished: {} with score {}", game.status(), game.score());
        return Ok(());
    }

    run_game(config).await
}

fn load_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = get_config_manager(args.config.as_deref()).get_config()?;

    if let Some(width) = args.width {
        config.game.width = width;
    }
    if let Some(height) = args.height {
        config.game.height = height;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.driver.interval_ms = interval_ms;
    }
    if let Some(direction) = args.direction {
        config.game.direction = direction;
    }
    config.validate()?;

    Ok(config)
}

async fn run_game(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    log!(
        "Snake {} on a {}x{} board, tick every {}ms",
        VERSION,
        config.game.width,
        config.game.height,
        config.driver.interval_ms
    );
    log!("Steer with the arrows or hjkl, or click a side of the window; r or a click in the middle restarts, Esc, q or Ctrl+C quits");

    let game = GameState::new(config.game.clone())?;
    let (driver, tick_rx) = Driver::new(
        config.driver.clone(),
        config.game.direction,
        Arc::new(SystemClock),
    );

    let guard = TerminalGuard::enter()?;
    let views: Vec<Box<dyn View>> = vec![Box::new(TextView::stdout())];
    let mut controller = Controller::new(game, driver, views, config.replays.save).await?;

    let (operation_tx, operation_rx) = mpsc::unbounded_channel();
    let joystick = Joystick::new(config.keys.clone(), operation_tx);
    let input = TerminalInput::new(joystick, crossterm::terminal::size()?);
    tokio::spawn(read_terminal(EventStream::new(), input));

    let replays = controller.run(operation_rx, tick_rx).await;
    drop(guard);
    if config.replays.save {
        save_replays(&config.replays, &replays);
    }

    log!("Bye, last score {}", controller.game().score());
    Ok(())
}

fn save_replays(replay_config: &ReplayConfig, replays: &[ReplayV1]) {
    if replays.is_empty() {
        return;
    }

    let replay_dir = Path::new(&replay_config.location);
    if let Err(e) = std::fs::create_dir_all(replay_dir) {
        log_error!("Failed to create replay directory: {}", e);
        return;
    }

    for (index, replay) in replays.iter().enumerate() {
        let file_path = replay_dir.join(generate_replay_filename(VERSION, index));
        match save_replay(&file_path, replay) {
            Ok(()) => log!("Replay saved to: {}", file_path.display()),
            Err(e) => log_error!("Failed to save replay: {}", e),
        }
    }
}
