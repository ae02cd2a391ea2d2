//! Line-oriented text front end
//!
//! One command per line; every response starts with `=` on success or `?` on
//! failure, followed by the message. The board is redrawn after each move.
//!
//! ## Commands
//!
//! - `play <row> <col>` - Place the current side's stone
//! - `undo` / `redo` - Step through the move history
//! - `new` - Start a new game
//! - `hint` - Ask the computer for a move for the side to play
//! - `save <name>` / `load <name>` / `delete <name>` / `list` - Saved boards
//! - `stats` - Running totals
//! - `show` - Redraw the board
//! - `help` - List commands
//! - `quit` - Exit
//!
//! In PvE the computer answers each accepted human move on its own, and
//! `undo`/`redo` step over the computer's reply together with the human move.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::board::Stone;
use crate::config::GameConfig;
use crate::engine::AIEngine;
use crate::error::GameError;
use crate::rules::{Game, GameStatus};
use crate::stats::GameStatistics;
use crate::storage::BoardStore;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "delete", "help", "hint", "list", "load", "new", "play", "quit", "redo", "save", "show",
    "stats", "undo",
];

type Reply = Result<String, String>;

/// Text front end over any line reader and writer.
pub struct TextFrontEnd<R, W> {
    input: R,
    output: W,
    game: Game,
    engine: AIEngine,
    computer: Option<Stone>,
    store: BoardStore,
    stats: GameStatistics,
    stats_path: PathBuf,
}

impl TextFrontEnd<io::StdinLock<'static>, io::Stdout> {
    /// Front end on the process's stdin and stdout.
    pub fn stdio(config: &GameConfig) -> Result<Self, GameError> {
        Self::new(config, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TextFrontEnd<R, W> {
    pub fn new(config: &GameConfig, input: R, output: W) -> Result<Self, GameError> {
        Ok(Self {
            input,
            output,
            game: config.new_game()?,
            engine: AIEngine::new(),
            computer: config.computer_side(),
            store: BoardStore::new(&config.storage.save_dir),
            stats: GameStatistics::load_or_default(&config.storage.stats_file),
            stats_path: config.storage.stats_file.clone(),
        })
    }

    /// Use a different computer player, e.g. a shallower one.
    pub fn with_engine(mut self, engine: AIEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn stats(&self) -> &GameStatistics {
        &self.stats
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Gomoku: {} in a row wins. Type 'help' for commands.",
            self.game.board().win_length()
        )?;
        let opening = self.start_game();
        self.respond(Ok(opening))?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            // Skip empty lines and comments
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parts: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
            let command = parts[0].to_lowercase();
            let args: Vec<&str> = parts[1..].iter().map(String::as_str).collect();

            let reply = self.execute(&command, &args);
            self.respond(reply)?;

            if command == "quit" {
                break;
            }
        }
        self.output.flush()
    }

    fn respond(&mut self, reply: Reply) -> io::Result<()> {
        let (prefix, message) = match reply {
            Ok(message) => ('=', message),
            Err(message) => ('?', message),
        };
        writeln!(self.output, "{prefix} {}", message.trim_end())?;
        self.output.flush()
    }

    /// Execute one command.
    fn execute(&mut self, command: &str, args: &[&str]) -> Reply {
        debug!(command, ?args, "text command");
        match command {
            "play" => {
                let [row, col] = args else {
                    return Err("usage: play <row> <col>".to_string());
                };
                let row = row.parse::<i32>().map_err(|_| format!("invalid row '{row}'"))?;
                let col = col.parse::<i32>().map_err(|_| format!("invalid col '{col}'"))?;
                self.play(row, col)
            }

            "undo" => self.undo(),

            "redo" => self.redo(),

            "new" => Ok(self.start_game()),

            "hint" => {
                if self.game.is_game_over() {
                    return Err("game is over".to_string());
                }
                let side = self.game.current_side();
                match self.engine.get_move(self.game.board(), side) {
                    Some(pos) => Ok(format!("hint for {side}: {pos}")),
                    None => Err("no move available".to_string()),
                }
            }

            "save" => {
                let [name] = args else {
                    return Err("usage: save <name>".to_string());
                };
                self.store
                    .save_board(name, self.game.board())
                    .map(|()| format!("saved '{name}'"))
                    .map_err(|e| e.to_string())
            }

            "load" => {
                let [name] = args else {
                    return Err("usage: load <name>".to_string());
                };
                let board = self.store.load_board(name).map_err(|e| e.to_string())?;
                self.game.load_board(board);
                // A finished position is not a game played here
                if self.game.is_game_over() {
                    self.stats.cancel_game();
                } else {
                    self.stats.start_game();
                }
                let mut message = format!("loaded '{name}'\n{}", self.game.board());
                message.push_str(&self.after_move());
                Ok(message)
            }

            "list" => {
                let names = self.store.list_boards().map_err(|e| e.to_string())?;
                if names.is_empty() {
                    Ok("no saved boards".to_string())
                } else {
                    Ok(names.join("\n"))
                }
            }

            "delete" => {
                let [name] = args else {
                    return Err("usage: delete <name>".to_string());
                };
                match self.store.delete_board(name) {
                    Ok(true) => Ok(format!("deleted '{name}'")),
                    Ok(false) => Err(format!("no saved board named '{name}'")),
                    Err(e) => Err(e.to_string()),
                }
            }

            "stats" => Ok(self.stats.summary()),

            "show" => Ok(format!("{}\n{}", self.game.board(), self.status_line())),

            "help" => Ok(format!("commands: {}", KNOWN_COMMANDS.join(", "))),

            "quit" => Ok("bye".to_string()),

            _ => Err(format!("unknown command '{command}'")),
        }
    }

    /// Reset the game and let the computer open if it plays Black.
    fn start_game(&mut self) -> String {
        self.game.reset();
        self.stats.start_game();
        let mut message = format!("new game\n{}", self.game.board());
        message.push_str(&self.after_move());
        message
    }

    fn play(&mut self, row: i32, col: i32) -> Reply {
        self.game.apply_move(row, col).map_err(|e| e.to_string())?;
        let mut message = format!("{}", self.game.board());
        message.push_str(&self.after_move());
        Ok(message)
    }

    /// Let the computer reply if it is on move, then report the status.
    fn after_move(&mut self) -> String {
        let mut message = String::new();
        if !self.game.is_game_over() && Some(self.game.current_side()) == self.computer {
            if let Some(pos) = self.engine.get_move(self.game.board(), self.game.current_side()) {
                match self.game.play(pos) {
                    Ok(_) => {
                        message.push_str(&format!("computer plays {pos}\n{}", self.game.board()));
                    }
                    Err(e) => warn!(error = %e, "computer move rejected"),
                }
            }
        }
        if self.game.is_game_over() && self.stats.is_game_active() {
            self.stats.end_game(self.game.winner());
            if let Err(e) = self.stats.save(&self.stats_path) {
                warn!(error = %e, "failed to save statistics");
            }
        }
        message.push_str(&self.status_line());
        message
    }

    fn undo(&mut self) -> Reply {
        let last_by_computer = self.game.last_move().map(|m| Some(m.stone)) == Some(self.computer);
        if last_by_computer && self.game.history().len() < 2 {
            return Err("nothing to undo".to_string());
        }
        if !self.game.undo().map_err(|e| e.to_string())? {
            return Err("nothing to undo".to_string());
        }
        if last_by_computer {
            self.game.undo().map_err(|e| e.to_string())?;
        }
        Ok(format!("{}\n{}", self.game.board(), self.status_line()))
    }

    fn redo(&mut self) -> Reply {
        if !self.game.redo().map_err(|e| e.to_string())? {
            return Err("nothing to redo".to_string());
        }
        if !self.game.is_game_over() && Some(self.game.current_side()) == self.computer {
            // Replay the computer's reply too if it was undone with the human move
            self.game.redo().map_err(|e| e.to_string())?;
        }
        let mut message = format!("{}", self.game.board());
        message.push_str(&self.after_move());
        Ok(message)
    }

    fn status_line(&self) -> String {
        match self.game.status() {
            GameStatus::InProgress => format!(
                "{} to move (move {})",
                self.game.current_side(),
                self.game.history().len() + 1
            ),
            GameStatus::Won(side) => format!("game over: {side} wins"),
            GameStatus::Draw => "game over: draw".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use crate::config::GameMode;
    use std::io::Cursor;

    fn config_in(dir: &std::path::Path, mode: GameMode) -> GameConfig {
        let mut config = GameConfig::default();
        config.board.rows = 9;
        config.board.cols = 9;
        config.game.mode = mode;
        config.storage.save_dir = dir.join("saves");
        config.storage.stats_file = dir.join("stats.json");
        config
    }

    fn run_script(config: &GameConfig, script: &str) -> (String, Game, GameStatistics) {
        let mut out = Vec::new();
        let (game, stats) = {
            let mut ui = TextFrontEnd::new(config, Cursor::new(script.to_string()), &mut out)
                .unwrap()
                .with_engine(AIEngine::with_depth(2));
            ui.run().unwrap();
            (ui.game().clone(), ui.stats().clone())
        };
        (String::from_utf8(out).unwrap(), game, stats)
    }

    #[test]
    fn test_pvp_win_is_reported_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pvp);
        let script = "play 4 0\nplay 5 0\nplay 4 1\nplay 5 1\nplay 4 2\nplay 5 2\nplay 4 3\nplay 5 3\nplay 4 4\nquit\n";
        let (out, game, stats) = run_script(&config, script);

        assert_eq!(game.winner(), Some(Stone::Black));
        assert!(out.contains("game over: black wins"));
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.black_wins, 1);
        assert!(config.storage.stats_file.exists());
    }

    #[test]
    fn test_rejected_moves() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pvp);
        let (out, game, _) = run_script(&config, "play 4 4\nplay 4 4\nplay 9 0\nplay x 1\nplay 1\nfrobnicate\n");

        assert_eq!(game.history().len(), 1);
        assert!(out.contains("? invalid move"));
        assert!(out.contains("? invalid row 'x'"));
        assert!(out.contains("? usage: play <row> <col>"));
        assert!(out.contains("? unknown command 'frobnicate'"));
    }

    #[test]
    fn test_pve_computer_replies() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pve);
        let (out, game, _) = run_script(&config, "play 4 4\n");

        assert!(out.contains("computer plays"));
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[1].stone, Stone::White);
        assert_eq!(game.current_side(), Stone::Black);
    }

    #[test]
    fn test_pve_computer_opens_as_black() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), GameMode::Pve);
        config.game.human_side = Stone::White;
        let (_, game, _) = run_script(&config, "");

        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].pos, Pos::new(4, 4));
        assert_eq!(game.current_side(), Stone::White);
    }

    #[test]
    fn test_pve_undo_takes_back_both_moves() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pve);
        let (_, game, _) = run_script(&config, "play 4 4\nundo\n");
        assert!(game.history().is_empty());
        assert_eq!(game.current_side(), Stone::Black);

        let (_, game, _) = run_script(&config, "play 4 4\nundo\nredo\n");
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.current_side(), Stone::Black);
    }

    #[test]
    fn test_pvp_undo_redo() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pvp);
        let (out, game, _) = run_script(&config, "undo\nplay 1 1\nplay 2 2\nundo\nundo\nredo\n");

        assert!(out.contains("? nothing to undo"));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.board().get(Pos::new(1, 1)), Stone::Black);
        assert!(game.can_redo());
    }

    #[test]
    fn test_save_list_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pvp);
        let script = "play 0 0\nplay 1 1\nsave first\nnew\nlist\nload first\ndelete first\ndelete first\nlist\n";
        let (out, game, _) = run_script(&config, script);

        assert!(out.contains("= saved 'first'"));
        assert!(out.contains("= first"));
        assert!(out.contains("= loaded 'first'"));
        assert!(out.contains("= deleted 'first'"));
        assert!(out.contains("? no saved board named 'first'"));
        assert!(out.contains("= no saved boards"));
        assert_eq!(game.board().stone_count(), 2);
        assert_eq!(game.current_side(), Stone::Black);
    }

    #[test]
    fn test_hint_and_help() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), GameMode::Pvp);
        let (out, game, _) = run_script(&config, "hint\nhelp\nstats\nquit\nplay 0 0\n");

        assert!(out.contains("= hint for black: (4, 4)"));
        assert!(out.contains("commands: delete"));
        assert!(out.contains("Total games: 0"));
        // Nothing after quit is read
        assert!(game.history().is_empty());
    }
}
