//! Road detection.
//!
//! A road is an orthogonally connected chain of a player's road-eligible
//! stack tops (flat or capstone) touching both of that player's edges.
//! Player One connects row 0 to the last row, Player Two connects column 0
//! to the last column.

use crate::board::{Board, Coord, Direction};
use crate::piece::Player;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A link between two adjacent road cells of the same player.
///
/// `from` is always the upper (or left) cell of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoadLink {
    pub from: Coord,
    pub to: Coord,
}

fn is_start_edge(coord: Coord, player: Player) -> bool {
    match player {
        Player::One => coord.row == 0,
        Player::Two => coord.col == 0,
    }
}

fn is_goal_edge(coord: Coord, player: Player, size: usize) -> bool {
    match player {
        Player::One => coord.row == size - 1,
        Player::Two => coord.col == size - 1,
    }
}

/// Breadth-first search from every road cell on `player`'s starting edge.
pub fn has_road(board: &Board, player: Player) -> bool {
    let size = board.size();
    if size == 0 {
        return false;
    }

    let mut visited = vec![false; size * size];
    let mut queue = VecDeque::new();

    for coord in board.coords().filter(|&c| is_start_edge(c, player)) {
        if board.is_road_cell(coord, player) {
            visited[coord.row * size + coord.col] = true;
            queue.push_back(coord);
        }
    }

    while let Some(coord) = queue.pop_front() {
        if is_goal_edge(coord, player, size) {
            return true;
        }
        for next in coord.neighbors(size) {
            let idx = next.row * size + next.col;
            if !visited[idx] && board.is_road_cell(next, player) {
                visited[idx] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

/// Which player, if any, has a road.
///
/// When both do, `mover` wins: the player who made the move completing the
/// position takes the game.
pub fn road_winner(board: &Board, mover: Player) -> Option<Player> {
    [mover, mover.opponent()]
        .into_iter()
        .find(|&player| has_road(board, player))
}

/// Every adjacent pair of `player`'s road cells, each pair once.
pub fn road_connections(board: &Board, player: Player) -> Vec<RoadLink> {
    let size = board.size();
    let mut links = Vec::new();

    for from in board.coords().filter(|&c| board.is_road_cell(c, player)) {
        for direction in [Direction::East, Direction::South] {
            if let Some(to) = from.step(direction, size) {
                if board.is_road_cell(to, player) {
                    links.push(RoadLink { from, to });
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn place(board: &mut Board, row: usize, col: usize, piece: Piece) {
        board.push(Coord::new(row, col), [piece]).unwrap();
    }

    #[test]
    fn test_full_column_is_road_for_player_one() {
        let mut board = Board::new(5);
        for row in 0..5 {
            place(&mut board, row, 2, Piece::flat(Player::One));
        }
        assert!(has_road(&board, Player::One));
        assert!(!has_road(&board, Player::Two));
    }

    #[test]
    fn test_full_row_is_road_for_player_two() {
        let mut board = Board::new(5);
        for col in 0..5 {
            place(&mut board, 3, col, Piece::flat(Player::Two));
        }
        assert!(has_road(&board, Player::Two));
        assert!(!has_road(&board, Player::One));
    }

    #[test]
    fn test_row_does_not_count_for_player_one() {
        let mut board = Board::new(4);
        for col in 0..4 {
            place(&mut board, 0, col, Piece::flat(Player::One));
        }
        assert!(!has_road(&board, Player::One));
    }

    #[test]
    fn test_capstone_joins_road_and_wall_breaks_it() {
        let mut board = Board::new(3);
        place(&mut board, 0, 0, Piece::flat(Player::One));
        place(&mut board, 1, 0, Piece::capstone(Player::One));
        place(&mut board, 2, 0, Piece::flat(Player::One));
        assert!(has_road(&board, Player::One));

        let mut walled = Board::new(3);
        place(&mut walled, 0, 0, Piece::flat(Player::One));
        place(&mut walled, 1, 0, Piece::standing(Player::One));
        place(&mut walled, 2, 0, Piece::flat(Player::One));
        assert!(!has_road(&walled, Player::One));
    }

    #[test]
    fn test_winding_road() {
        // 1 . .
        // 1 1 .
        // . 1 .
        // . 1 1  <- goal row reached at (3,1)
        let mut board = Board::new(4);
        for (r, c) in [(0, 0), (1, 0), (1, 1), (2, 1), (3, 1), (3, 2)] {
            place(&mut board, r, c, Piece::flat(Player::One));
        }
        assert!(has_road(&board, Player::One));
    }

    #[test]
    fn test_diagonal_does_not_connect() {
        let mut board = Board::new(3);
        place(&mut board, 0, 0, Piece::flat(Player::One));
        place(&mut board, 1, 1, Piece::flat(Player::One));
        place(&mut board, 2, 2, Piece::flat(Player::One));
        assert!(!has_road(&board, Player::One));
    }

    #[test]
    fn test_top_piece_decides_ownership() {
        let mut board = Board::new(3);
        for row in 0..3 {
            place(&mut board, row, 1, Piece::flat(Player::One));
        }
        place(&mut board, 1, 1, Piece::flat(Player::Two));
        assert!(!has_road(&board, Player::One));
    }

    #[test]
    fn test_road_winner_reports_opponent_road() {
        let mut board = Board::new(3);
        for col in 0..3 {
            place(&mut board, 1, col, Piece::flat(Player::Two));
        }
        assert_eq!(road_winner(&board, Player::One), Some(Player::Two));
        assert_eq!(road_winner(&board, Player::Two), Some(Player::Two));
        assert_eq!(road_winner(&Board::new(3), Player::One), None);
    }

    #[test]
    fn test_road_connections_report_each_pair_once() {
        let mut board = Board::new(3);
        place(&mut board, 0, 0, Piece::flat(Player::Two));
        place(&mut board, 0, 1, Piece::flat(Player::Two));
        place(&mut board, 1, 1, Piece::capstone(Player::Two));
        place(&mut board, 1, 2, Piece::standing(Player::Two));

        let links = road_connections(&board, Player::Two);
        assert_eq!(
            links,
            vec![
                RoadLink { from: Coord::new(0, 0), to: Coord::new(0, 1) },
                RoadLink { from: Coord::new(0, 1), to: Coord::new(1, 1) },
            ]
        );
        assert!(road_connections(&board, Player::One).is_empty());
    }
}
