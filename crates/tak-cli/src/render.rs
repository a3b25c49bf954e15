//! Plain-text rendering of snapshots, events and legal moves.

use std::fmt::Write;

use tak_core::{
    GameEvent, GamePhase, GameSnapshot, LegalMoves, Piece, Player, RoadLink, StoneType, WinReason,
    Winner,
};

fn player_digit(player: Player) -> char {
    match player {
        Player::One => '1',
        Player::Two => '2',
    }
}

/// `1`, `1S` or `1C` for the top piece, followed by `/h` for taller stacks
fn cell_label(stack: &[Piece]) -> String {
    let Some(top) = stack.last() else {
        return ".".to_string();
    };
    let mut label = String::new();
    label.push(player_digit(top.owner));
    match top.stone {
        StoneType::Flat => {}
        StoneType::Standing => label.push('S'),
        StoneType::Capstone => label.push('C'),
    }
    if stack.len() > 1 {
        let _ = write!(label, "/{}", stack.len());
    }
    label
}

/// The board grid followed by turn, reserve and hand lines.
pub fn board(snapshot: &GameSnapshot) -> String {
    let width = snapshot
        .board
        .iter()
        .flatten()
        .map(|stack| cell_label(stack).len())
        .max()
        .unwrap_or(1)
        .max(2);

    let mut out = String::new();
    out.push_str("   ");
    for col in 0..snapshot.size {
        let _ = write!(out, " {col:>width$}");
    }
    out.push('\n');

    for (row, cells) in snapshot.board.iter().enumerate() {
        let _ = write!(out, "{row:>2} ");
        for stack in cells {
            let _ = write!(out, " {:>width$}", cell_label(stack));
        }
        out.push('\n');
    }

    let phase = match snapshot.phase {
        GamePhase::InitialPlacement => "opening",
        GamePhase::Playing => "playing",
        GamePhase::GameOver => "game over",
    };
    let _ = writeln!(
        out,
        "Turn {} ({phase}), {} to move",
        snapshot.turn, snapshot.active_player
    );
    for player in Player::ALL {
        let reserve = snapshot.inventories[player.index()];
        let _ = writeln!(
            out,
            "{player}: {} stones, {} capstones in reserve",
            reserve.stones, reserve.capstones
        );
    }
    if let Some(at) = snapshot.selected_cell {
        let _ = writeln!(out, "Selected {at}, holding {} piece(s)", snapshot.hand.len());
    }
    match snapshot.winner {
        Some(Winner::Player(player)) => {
            let _ = writeln!(out, "{player} wins");
        }
        Some(Winner::Draw) => out.push_str("Draw\n"),
        None => {}
    }
    out
}

/// One line per road link, grouped by player. Empty when nobody has any.
pub fn road_links(links: &[(Player, Vec<RoadLink>)]) -> String {
    let mut out = String::new();
    for (player, links) in links {
        if links.is_empty() {
            continue;
        }
        let _ = write!(out, "{player} links:");
        for link in links {
            let _ = write!(out, " {}-{}", link.from, link.to);
        }
        out.push('\n');
    }
    out
}

/// Destinations and their drop sequences, e.g. `(2, 4): 1,1`
pub fn legal_moves(moves: &LegalMoves) -> String {
    if moves.is_empty() {
        return "No legal moves\n".to_string();
    }
    let mut out = String::new();
    for (destination, sequences) in moves {
        let sequences: Vec<String> = sequences
            .iter()
            .map(|seq| {
                seq.iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        let _ = writeln!(out, "{destination}: {}", sequences.join("  "));
    }
    out
}

/// A short human sentence for an event
pub fn event(event: &GameEvent) -> String {
    match event {
        GameEvent::NewGameStarted { size } => format!("New {size}x{size} game"),
        GameEvent::PiecePlaced { by, owner, at, stone } if by != owner => {
            format!("{by} placed {owner}'s {} at {at}", stone_name(*stone))
        }
        GameEvent::PiecePlaced { by, at, stone, .. } => {
            format!("{by} placed a {} at {at}", stone_name(*stone))
        }
        GameEvent::CellSelected { player, at } => format!("{player} selected {at}"),
        GameEvent::StackPickedUp { player, from, count } => {
            format!("{player} picked up {count} from {from}")
        }
        GameEvent::WallFlattened { at } => format!("Wall at {at} flattened"),
        GameEvent::StackMoved { player, from, destination, drops } => {
            format!("{player} moved {from} -> {destination} dropping {drops:?}")
        }
        GameEvent::MoveCancelled { player, at } => format!("{player} put the stack back on {at}"),
        GameEvent::TurnEnded { next_player, turn, .. } => {
            format!("Turn {turn}: {next_player} to move")
        }
        GameEvent::GameWon { player, reason } => match reason {
            WinReason::Road => format!("{player} wins by road"),
            WinReason::Flats => format!("{player} wins on flats"),
        },
        GameEvent::GameDrawn { flats } => format!("Draw, {flats} flats each"),
    }
}

fn stone_name(stone: StoneType) -> &'static str {
    match stone {
        StoneType::Flat => "flat",
        StoneType::Standing => "wall",
        StoneType::Capstone => "capstone",
    }
}
