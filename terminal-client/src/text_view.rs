use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use ringbuffer::{AllocRingBuffer, RingBuffer};
use snake_common::controller::View;
use snake_common::game::{GameState, GameStatus, Grid};
use snake_common::log_error;

pub const EVENT_LOG_SIZE: usize = 5;

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = ' ';

/// Draws the board as text, followed by the score line and recent events.
/// With `redraw` set every frame replaces the previous one in place, which
/// raw mode needs since a bare newline no longer returns the cursor.
pub struct TextView<W: Write + Send = Stdout> {
    out: W,
    redraw: bool,
    event_log: AllocRingBuffer<String>,
    last_status: GameStatus,
    last_score: u32,
}

impl TextView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), true)
    }
}

impl<W: Write + Send> TextView<W> {
    pub fn new(out: W, redraw: bool) -> Self {
        Self {
            out,
            redraw,
            event_log: AllocRingBuffer::new(EVENT_LOG_SIZE),
            last_status: GameStatus::New,
            last_score: 0,
        }
    }

    #[cfg(test)]
    pub fn events(&self) -> Vec<String> {
        self.event_log.iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn track_events(&mut self, game: &GameState) {
        let status = game.status();
        let score = game.score();

        if status != self.last_status {
            let event = match status {
                GameStatus::New => None,
                GameStatus::Inited => Some("new game, press a direction to start".to_string()),
                GameStatus::Playing => Some("game started".to_string()),
                GameStatus::Ended => Some(format!("game over with score {}, press r to restart", score)),
                GameStatus::Win => Some(format!("board filled, you win with score {}", score)),
            };
            if let Some(event) = event {
                self.push_event(event);
            }
        } else if status == GameStatus::Playing && score > self.last_score {
            self.push_event(format!("ate food, score {}", score));
        }

        self.last_status = status;
        self.last_score = score;
    }

    fn push_event(&mut self, event: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.event_log.enqueue(format!("[{}] {}", timestamp, event));
    }

    fn frame(&self, game: &GameState) -> String {
        let mut frame = render_board(game);
        frame.push_str(&format!(
            "score: {}  status: {}  direction: {}\n",
            game.score(),
            game.status(),
            game.direction()
        ));
        for event in self.event_log.iter() {
            frame.push_str(event);
            frame.push('\n');
        }
        frame
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.redraw {
            queue!(self.out, Clear(ClearType::All))?;
            for (row, line) in frame.lines().enumerate() {
                queue!(self.out, MoveTo(0, row as u16), Print(line))?;
            }
        } else {
            self.out.write_all(frame.as_bytes())?;
        }
        self.out.flush()
    }
}

impl<W: Write + Send> View for TextView<W> {
    fn render(&mut self, game: &GameState) {
        self.track_events(game);
        let frame = self.frame(game);
        if let Err(e) = self.draw(&frame) {
            log_error!("Failed to draw board: {}", e);
        }
    }
}

/// Row 0 is the top line; the board is framed by `+`, `-` and `|`.
pub fn render_board(game: &GameState) -> String {
    let width = game.width();
    let height = game.height();
    let mut cells = vec![vec![EMPTY; width]; height];

    let mut put = |grid: Grid, symbol: char| {
        if game.is_inside(grid) {
            cells[grid.y as usize][grid.x as usize] = symbol;
        }
    };
    if let Some(food) = game.food() {
        put(food, FOOD);
    }
    for &part in game.snake() {
        put(part, BODY);
    }
    if let Some(head) = game.head() {
        put(head, HEAD);
    }

    let border = format!("+{}+\n", "-".repeat(width));
    let mut board = border.clone();
    for row in cells {
        board.push('|');
        board.extend(row);
        board.push_str("|\n");
    }
    board.push_str(&border);
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::game::{Direction, GameSettings};

    fn create_game() -> GameState {
        let mut game = GameState::new(GameSettings::new(5, 3, 4)).unwrap();
        game.init(Some(10)).unwrap();
        game
    }

    #[test]
    fn test_render_board_draws_snake_and_food() {
        let game = create_game();

        let expected = "\
+-----+
|     |
|ooo@ |
|    *|
+-----+
";
        assert_eq!(render_board(&game), expected);
    }

    #[test]
    fn test_render_empty_game_draws_frame_only() {
        let game = GameState::new(GameSettings::new(3, 1, 1)).unwrap();
        assert_eq!(render_board(&game), "+---+\n|   |\n+---+\n");
    }

    #[test]
    fn test_render_writes_frame_and_score_line() {
        let game = create_game();
        let mut view = TextView::new(Vec::new(), false);

        view.render(&game);

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.starts_with("+-----+\n"));
        assert!(output.contains("score: 0  status: inited  direction: right"));
        assert!(output.contains("new game"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_redraw_positions_each_line() {
        let game = create_game();
        let mut view = TextView::new(Vec::new(), true);

        view.render(&game);

        let output = view.into_inner();
        let mut expected = Vec::new();
        queue!(
            expected,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print("+-----+"),
            MoveTo(0, 1),
            Print("|     |"),
            MoveTo(0, 2),
            Print("|ooo@ |"),
        )
        .unwrap();
        assert!(output.starts_with(&expected));
        assert!(!output.contains(&b'\n'));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("score: 0  status: inited  direction: right"));
    }

    #[test]
    fn test_event_log_tracks_game_progress() {
        let mut game = create_game();
        let mut view = TextView::new(Vec::new(), false);
        view.render(&game);

        game.apply_move(Direction::Down, Some(0)).unwrap();
        view.render(&game);
        game.apply_move(Direction::Right, Some(0)).unwrap();
        view.render(&game);
        game.apply_move(Direction::Down, Some(0)).unwrap();
        view.render(&game);

        let events = view.events();
        assert_eq!(events.len(), 4);
        assert!(events[0].ends_with("new game, press a direction to start"));
        assert!(events[1].ends_with("game started"));
        assert!(events[2].ends_with("ate food, score 5"));
        assert!(events[3].ends_with("game over with score 5, press r to restart"));
    }

    #[test]
    fn test_event_log_keeps_latest_entries() {
        let game = create_game();
        let mut view = TextView::new(Vec::new(), false);

        for index in 0..EVENT_LOG_SIZE + 3 {
            view.push_event(format!("event {}", index));
        }
        view.render(&game);

        let events = view.events();
        assert_eq!(events.len(), EVENT_LOG_SIZE);
        assert!(events[0].ends_with("event 4"));
        assert!(events.last().unwrap().ends_with("new game, press a direction to start"));
    }
}
