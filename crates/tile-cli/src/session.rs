use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tile_engine::{Direction, Engine, EngineError};

use crate::config::Config;

pub const PROMPT: &str = "2048> ";
pub const END_MESSAGE: &str = "THE END. Type \"new\" to play another one, and \"quit\" to quit";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One line of user input, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    New,
    Quit,
    Ignore,
}

impl Command {
    /// Direction names plus the usual `wasd` / `hjkl` keys.
    pub fn parse(line: &str) -> Command {
        match line.trim().to_ascii_lowercase().as_str() {
            "new" => Command::New,
            "quit" | "exit" | "q" => Command::Quit,
            "w" | "k" => Command::Move(Direction::Up),
            "s" | "j" => Command::Move(Direction::Down),
            "a" | "h" => Command::Move(Direction::Left),
            "d" | "l" => Command::Move(Direction::Right),
            other => other.parse().map_or(Command::Ignore, Command::Move),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented play loop: owns the current game and redraws after every
/// accepted command.
pub struct Session<W: Write> {
    config: Config,
    out: W,
    engine: Engine,
    games: u64,
}

impl<W: Write> Session<W> {
    /// Start the first game and draw it.
    pub fn new(config: Config, out: W) -> Result<Self> {
        let engine = new_engine(&config, 0)?;
        let mut session = Session { config, out, engine, games: 0 };
        session.start_game()?;
        Ok(session)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn games_started(&self) -> u64 {
        self.games
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Feed every input line through [`Session::handle`] until EOF or `quit`.
    pub fn run<B: BufRead>(&mut self, input: B) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if self.handle(Command::parse(&line))? == Flow::Quit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::New => {
                self.engine = new_engine(&self.config, self.games)?;
                self.start_game()?;
            }
            Command::Move(_) if self.engine.is_ended() => {}
            Command::Move(direction) => match self.engine.move_tiles(direction, true) {
                Ok(moves) => {
                    debug!("{direction}: {} tile(s) moved", moves.len());
                    self.draw()?;
                }
                Err(EngineError::GameEnded) => {
                    self.clear()?;
                    self.announce_end()?;
                }
                Err(e) => return Err(e).context("move failed"),
            },
            Command::Ignore => {}
        }
        Ok(Flow::Continue)
    }

    fn start_game(&mut self) -> Result<()> {
        self.engine
            .fill_random_tiles(None)
            .context("failed to place opening tiles")?;
        self.games += 1;
        info!(
            "game {} started on {}x{} board",
            self.games,
            self.engine.width(),
            self.engine.height()
        );
        self.draw()
    }

    fn clear(&mut self) -> Result<()> {
        if self.config.display.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.clear()?;
        writeln!(self.out, "{}", self.engine.board().render(self.config.display.padding))?;
        if self.engine.is_ended() {
            return self.announce_end();
        }
        self.prompt()
    }

    /// Printed once per game, whether the last move succeeded or not.
    fn announce_end(&mut self) -> Result<()> {
        info!("game {} over", self.games);
        writeln!(self.out, "{END_MESSAGE}")?;
        self.prompt()
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Game `index` of a seeded session uses `seed + index`, so replays of a
/// whole session are reproducible.
fn new_engine(config: &Config, index: u64) -> Result<Engine> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index)),
        None => StdRng::from_entropy(),
    };
    Engine::from_config(&config.engine(), rng).context("invalid board configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tile_engine::SpawnConfig;

    fn quiet_config(seed: u64) -> Config {
        let mut cfg = Config { seed: Some(seed), ..Config::default() };
        cfg.display.clear_screen = false;
        cfg
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_inner()).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("up"), Command::Move(Direction::Up));
        assert_eq!(Command::parse(" LEFT "), Command::Move(Direction::Left));
        assert_eq!(Command::parse("d"), Command::Move(Direction::Right));
        assert_eq!(Command::parse("j"), Command::Move(Direction::Down));
        assert_eq!(Command::parse("new"), Command::New);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("jump"), Command::Ignore);
        assert_eq!(Command::parse(""), Command::Ignore);
    }

    #[test]
    fn first_game_is_drawn_on_start() {
        let session = Session::new(quiet_config(1), Vec::new()).unwrap();
        assert_eq!(session.games_started(), 1);
        let tiles = session.engine().occupied_cells().len();
        assert!((1..=2).contains(&tiles));
        let text = output(session);
        assert_eq!(text.matches('\n').count(), 4);
        assert!(text.ends_with(PROMPT));
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = Session::new(quiet_config(2), Vec::new()).unwrap();
        session.run(Cursor::new("quit\nnew\nnew\n")).unwrap();
        assert_eq!(session.games_started(), 1);
    }

    #[test]
    fn new_restarts_with_fresh_board() {
        let mut session = Session::new(quiet_config(3), Vec::new()).unwrap();
        session.run(Cursor::new("left\nup\nnew\n")).unwrap();
        assert_eq!(session.games_started(), 2);
        assert!(!session.engine().is_ended());
        assert!(session.engine().occupied_cells().len() <= 2);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let script = "left\nup\nright\ndown\nleft\nleft\nup\n";
        let mut a = Session::new(quiet_config(77), Vec::new()).unwrap();
        let mut b = Session::new(quiet_config(77), Vec::new()).unwrap();
        a.run(Cursor::new(script)).unwrap();
        b.run(Cursor::new(script)).unwrap();
        assert_eq!(a.engine().board(), b.engine().board());
        assert_eq!(output(a), output(b));
    }

    #[test]
    fn ended_game_prints_message_and_ignores_moves() {
        let mut cfg = quiet_config(4);
        cfg.width = 2;
        cfg.height = 2;
        let mut session = Session::new(cfg, Vec::new()).unwrap();
        // Replace the opening board with a stuck one.
        session.engine = {
            let mut engine = new_engine(&session.config, 9).unwrap();
            engine
                .set_value(0, 0, Some(2))
                .and_then(|e| e.set_value(1, 0, Some(4)))
                .and_then(|e| e.set_value(0, 1, Some(4)))
                .and_then(|e| e.set_value(1, 1, Some(2)))
                .unwrap();
            engine
        };
        assert_eq!(session.handle(Command::Move(Direction::Left)).unwrap(), Flow::Continue);
        assert!(session.engine().is_ended());
        let board = session.engine().board().clone();
        session.handle(Command::Move(Direction::Up)).unwrap();
        assert_eq!(session.engine().board(), &board);

        let text = output(session);
        assert_eq!(text.matches(END_MESSAGE).count(), 1);
    }

    #[test]
    fn successful_last_move_prints_end_message() {
        let mut cfg = quiet_config(5);
        cfg.width = 2;
        cfg.height = 2;
        cfg.display.padding = 2;
        cfg.spawn = SpawnConfig { four_probability: 1.0, two_tiles_probability: 0.0 };
        let mut session = Session::new(cfg, Vec::new()).unwrap();
        // [8, 16] / [16, 16]: left merges the bottom row, the spawned 4 leaves
        // [8, 16] / [32, 4] with nothing left to slide.
        session.engine = {
            let mut engine = new_engine(&session.config, 9).unwrap();
            engine
                .set_value(0, 0, Some(8))
                .and_then(|e| e.set_value(1, 0, Some(16)))
                .and_then(|e| e.set_value(0, 1, Some(16)))
                .and_then(|e| e.set_value(1, 1, Some(16)))
                .unwrap();
            engine
        };
        session.handle(Command::Move(Direction::Left)).unwrap();
        assert!(session.engine().is_ended());
        assert_eq!(session.engine().board().render(2), "[ 8][16]\n[32][ 4]");

        let board = session.engine().board().clone();
        for dir in Direction::ALL {
            assert_eq!(session.handle(Command::Move(dir)).unwrap(), Flow::Continue);
        }
        assert_eq!(session.engine().board(), &board);

        let text = output(session);
        assert_eq!(text.matches(END_MESSAGE).count(), 1);
        assert!(text.ends_with(&format!("[ 8][16]\n[32][ 4]\n{END_MESSAGE}\n{PROMPT}")));
    }
}
