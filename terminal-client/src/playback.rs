use std::path::Path;
use std::time::Duration;

use snake_common::controller::View;
use snake_common::game::GameState;
use snake_common::log;
use snake_common::replay::{load_replay, ReplayError, ReplayPlayer};
use snake_common::version::VERSION;

/// Plays a saved game back through `view`, one frame per `frame_delay`.
pub async fn play_back(
    path: &Path,
    view: &mut dyn View,
    frame_delay: Duration,
) -> Result<GameState, ReplayError> {
    let mut player = ReplayPlayer::new(load_replay(path)?)?;
    if player.engine_version() != VERSION {
        log!(
            "Replay was recorded with version {}, running {}; playback may differ",
            player.engine_version(),
            VERSION
        );
    }
    log!(
        "Playing {} ticks on a {}x{} board",
        player.total_ticks(),
        player.settings().width,
        player.settings().height
    );

    let mut game = player.new_game()?;
    view.render(&game);
    while player.step(&mut game)? {
        tokio::time::sleep(frame_delay).await;
        view.render(&game);
    }
    Ok(game)
}
