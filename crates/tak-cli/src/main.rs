//! Terminal host for the Tak rules engine.
//!
//! Reads one command per line from stdin, forwards game commands to a
//! `GameState`, and prints the board after every accepted command. Logs go
//! to stderr so the board on stdout stays readable.

use std::io::{self, BufRead, Write};

use tak_core::{GameAction, GameState, Player};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod config;
mod render;

use command::Command;
use config::Config;

/// Whether the read loop should keep going
enum Flow {
    Continue,
    Quit,
}

struct Session {
    game: GameState,
    config: Config,
}

impl Session {
    fn new(config: Config) -> anyhow::Result<Self> {
        let game = GameState::new(config.board_size)?;
        Ok(Self { game, config })
    }

    fn handle(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            Command::Action(action) => self.apply(action, out)?,
            Command::Moves => {
                if self.game.hand().is_empty() {
                    writeln!(out, "Nothing picked up")?;
                } else {
                    write!(out, "{}", render::legal_moves(&self.game.legal_moves()))?;
                }
            }
            Command::State => match serde_json::to_string_pretty(&self.game.snapshot()) {
                Ok(json) => writeln!(out, "{json}")?,
                Err(e) => warn!(error = %e, "failed to serialize snapshot"),
            },
            Command::Help => writeln!(out, "{}", command::HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, action: GameAction, out: &mut impl Write) -> io::Result<()> {
        match self.game.apply_action(action) {
            Ok(events) => {
                for event in &events {
                    writeln!(out, "{}", render::event(event))?;
                }
                self.show(out)
            }
            Err(e) => writeln!(out, "Rejected: {e}"),
        }
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", render::board(&self.game.snapshot()))?;
        if self.config.show_roads {
            let links: Vec<_> = Player::ALL
                .into_iter()
                .map(|player| (player, self.game.road_connections(player)))
                .collect();
            write!(out, "{}", render::road_links(&links))?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    info!(size = config.board_size, show_roads = config.show_roads, "starting tak");

    let mut session = Session::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Type 'help' for commands.")?;
    session.show(&mut stdout)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                continue;
            }
        };

        if let Flow::Quit = session.handle(command, &mut stdout)? {
            break;
        }
    }

    info!("goodbye");
    Ok(())
}
