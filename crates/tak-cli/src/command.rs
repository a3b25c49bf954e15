//! Text commands typed at the prompt.

use tak_core::{Coord, GameAction, StoneType};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  new <size>                 start a new game on a size x size board (3-9)
  place <row> <col> [kind]   place a piece; kind is flat (default), wall or cap
  pick <row> <col> <count>   lift pieces from a stack (0 only selects the cell)
  move <row> <col> <drops>   carry the hand to a cell, e.g. move 2 4 1,1
  cancel                     put the hand back
  moves                      list legal destinations for the hand
  state                      print the full state as JSON
  help                       show this text
  quit                       leave";

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forwarded to the game session
    Action(GameAction),
    Moves,
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("unknown piece kind '{0}', expected flat, wall or cap")]
    InvalidStone(String),

    #[error("unexpected extra input '{0}'")]
    TrailingInput(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "new" => Command::Action(GameAction::NewGame {
            size: number(words.next(), "board size")?,
        }),
        "place" | "p" => {
            let at = coord(&mut words)?;
            let stone = match words.next() {
                Some(kind) => stone(kind)?,
                None => StoneType::Flat,
            };
            Command::Action(GameAction::Place { at, stone })
        }
        "pick" | "pickup" => {
            let at = coord(&mut words)?;
            let count = number(words.next(), "count")?;
            Command::Action(GameAction::Pickup { at, count })
        }
        "move" | "m" => {
            let destination = coord(&mut words)?;
            let drops = drops(words.next())?;
            Command::Action(GameAction::Move { destination, drops })
        }
        "cancel" | "c" => Command::Action(GameAction::Cancel),
        "moves" => Command::Moves,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    match words.next() {
        Some(extra) => Err(ParseError::TrailingInput(extra.to_string())),
        None => Ok(Some(command)),
    }
}

fn number(word: Option<&str>, what: &'static str) -> Result<usize, ParseError> {
    let word = word.ok_or(ParseError::MissingArgument(what))?;
    word.parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_string()))
}

fn coord<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord, ParseError> {
    let row = number(words.next(), "row")?;
    let col = number(words.next(), "column")?;
    Ok(Coord::new(row, col))
}

fn stone(word: &str) -> Result<StoneType, ParseError> {
    match word.to_ascii_lowercase().as_str() {
        "flat" | "f" => Ok(StoneType::Flat),
        "wall" | "standing" | "s" | "w" => Ok(StoneType::Standing),
        "cap" | "capstone" | "c" => Ok(StoneType::Capstone),
        _ => Err(ParseError::InvalidStone(word.to_string())),
    }
}

fn drops(word: Option<&str>) -> Result<Vec<usize>, ParseError> {
    let word = word.ok_or(ParseError::MissingArgument("drop counts"))?;
    word.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| ParseError::InvalidNumber(part.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> GameAction {
        match parse(line) {
            Ok(Some(Command::Action(action))) => action,
            other => panic!("expected an action from {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_place_defaults_to_flat() {
        assert_eq!(
            action("place 1 2"),
            GameAction::Place { at: Coord::new(1, 2), stone: StoneType::Flat }
        );
        assert_eq!(
            action("PLACE 0 0 wall"),
            GameAction::Place { at: Coord::new(0, 0), stone: StoneType::Standing }
        );
        assert_eq!(
            action("p 3 3 cap"),
            GameAction::Place { at: Coord::new(3, 3), stone: StoneType::Capstone }
        );
    }

    #[test]
    fn test_pick_and_move() {
        assert_eq!(
            action("pick 4 4 2"),
            GameAction::Pickup { at: Coord::new(4, 4), count: 2 }
        );
        assert_eq!(
            action("move 4 2 1,1"),
            GameAction::Move { destination: Coord::new(4, 2), drops: vec![1, 1] }
        );
        assert_eq!(action("new 6"), GameAction::NewGame { size: 6 });
        assert_eq!(action("cancel"), GameAction::Cancel);
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(parse("moves"), Ok(Some(Command::Moves)));
        assert_eq!(parse("state"), Ok(Some(Command::State)));
        assert_eq!(parse("help"), Ok(Some(Command::Help)));
        assert_eq!(parse("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("jump"), Err(ParseError::UnknownCommand("jump".into())));
        assert_eq!(parse("place 1"), Err(ParseError::MissingArgument("column")));
        assert_eq!(parse("pick a 1 1"), Err(ParseError::InvalidNumber("a".into())));
        assert_eq!(parse("place 1 1 tower"), Err(ParseError::InvalidStone("tower".into())));
        assert_eq!(parse("move 1 1 1,x"), Err(ParseError::InvalidNumber("x".into())));
        assert_eq!(parse("move 1 1"), Err(ParseError::MissingArgument("drop counts")));
        assert_eq!(parse("cancel now"), Err(ParseError::TrailingInput("now".into())));
    }
}
