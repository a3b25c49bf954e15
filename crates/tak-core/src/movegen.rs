//! Drop distributions for a carried stack.
//!
//! A carried hand of `n` pieces travels in a straight line, leaving at least
//! one piece on every cell it crosses. Which cells it may cross is decided
//! by their tops:
//!
//! ```text
//! empty / flat top      always enterable
//! standing top          blocks, unless a lone capstone is the final drop
//! capstone top          always blocks
//! ```
//!
//! Both the validator (`plan_drops`) and the enumerator (`legal_moves`) use
//! the same rule, so every sequence returned by `legal_moves` is accepted by
//! `plan_drops` and nothing else is.

use crate::board::{Board, Coord, Direction};
use crate::game::GameError;
use crate::piece::{Piece, StoneType};
use std::collections::BTreeMap;

/// Destination cell -> every drop-count sequence that ends there
pub type LegalMoves = BTreeMap<Coord, Vec<Vec<usize>>>;

/// How a carried stack may treat a cell along its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Open,
    Flatten,
    Blocked,
}

/// Decide whether the hand may drop onto a cell topped by `top`.
///
/// `lone_capstone` is true when exactly one piece lands here, it is the
/// last piece of the hand, and it is a capstone.
fn entry(top: Option<Piece>, lone_capstone: bool) -> Entry {
    match top {
        None => Entry::Open,
        Some(top) if !top.stone.blocks_movement() => Entry::Open,
        Some(top) if top.stone.is_flattenable() && lone_capstone => Entry::Flatten,
        Some(_) => Entry::Blocked,
    }
}

fn ends_with_capstone(hand: &[Piece]) -> bool {
    matches!(hand.last(), Some(p) if p.stone == StoneType::Capstone)
}

/// Every ordered way to split `total` into exactly `parts` positive parts.
pub fn compositions(total: usize, parts: usize) -> Vec<Vec<usize>> {
    fn build(remaining: usize, parts: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if parts == 1 {
            current.push(remaining);
            out.push(current.clone());
            current.pop();
            return;
        }
        // Leave at least one piece for each of the remaining cells
        for first in 1..=remaining - (parts - 1) {
            current.push(first);
            build(remaining - first, parts - 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if parts == 0 || total < parts {
        return out;
    }
    build(total, parts, &mut Vec::with_capacity(parts), &mut out);
    out
}

/// A validated drop sequence, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPlan {
    /// Cells visited, nearest first; `path[i]` receives `drops[i]` pieces
    pub path: Vec<Coord>,
    pub drops: Vec<usize>,
    /// Whether the final cell's wall is flattened before the capstone lands
    pub flattens: bool,
}

impl DropPlan {
    /// The cell the last piece lands on
    pub fn destination(&self) -> Option<Coord> {
        self.path.last().copied()
    }
}

/// Check a drop sequence for `hand` lifted from `from` toward `destination`.
///
/// The destination must lie exactly `drops.len()` steps away in a straight
/// line. Nothing is mutated.
pub fn plan_drops(
    board: &Board,
    from: Coord,
    hand: &[Piece],
    destination: Coord,
    drops: &[usize],
) -> Result<DropPlan, GameError> {
    if !board.contains(destination) {
        return Err(GameError::OutOfBounds);
    }
    let (direction, distance) =
        Direction::between(from, destination).ok_or(GameError::InvalidDirection)?;

    if drops.is_empty()
        || drops.contains(&0)
        || drops.iter().sum::<usize>() != hand.len()
        || distance != drops.len()
    {
        return Err(GameError::DropCountMismatch);
    }

    let last = drops.len() - 1;
    let mut path = Vec::with_capacity(drops.len());
    let mut flattens = false;
    let mut cell = from;

    for (i, &count) in drops.iter().enumerate() {
        cell = cell
            .step(direction, board.size())
            .ok_or(GameError::OutOfBounds)?;
        let lone_capstone = i == last && count == 1 && ends_with_capstone(hand);
        match entry(board.top_piece(cell)?, lone_capstone) {
            Entry::Open => {}
            Entry::Flatten => flattens = true,
            Entry::Blocked => return Err(GameError::PathBlocked),
        }
        path.push(cell);
    }

    Ok(DropPlan {
        path,
        drops: drops.to_vec(),
        flattens,
    })
}

/// Every legal destination and drop sequence for `hand` lifted from `from`.
///
/// A wall is listed at any distance, with exactly the sequences whose last
/// drop is the capstone alone (`[2, 1]` as well as `[1, 1, 1]`), the same
/// sequences `plan_drops` accepts.
pub fn legal_moves(board: &Board, from: Coord, hand: &[Piece]) -> LegalMoves {
    let mut moves = LegalMoves::new();
    let n = hand.len();
    if n == 0 || !board.contains(from) {
        return moves;
    }
    let capstone_last = ends_with_capstone(hand);

    for direction in Direction::ALL {
        let mut cell = from;
        for distance in 1..=n {
            cell = match cell.step(direction, board.size()) {
                Some(next) => next,
                None => break,
            };
            let top = board.top_piece(cell).ok().flatten();

            match entry(top, capstone_last) {
                Entry::Open => {
                    moves.insert(cell, compositions(n, distance));
                }
                Entry::Flatten => {
                    // Only sequences whose final drop is the capstone alone
                    let sequences: Vec<Vec<usize>> = compositions(n, distance)
                        .into_iter()
                        .filter(|seq| seq.last() == Some(&1))
                        .collect();
                    if !sequences.is_empty() {
                        moves.insert(cell, sequences);
                    }
                    break;
                }
                Entry::Blocked => break,
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Player;

    fn flats(n: usize) -> Vec<Piece> {
        vec![Piece::flat(Player::One); n]
    }

    #[test]
    fn test_compositions_small() {
        assert_eq!(compositions(3, 1), vec![vec![3]]);
        assert_eq!(compositions(3, 2), vec![vec![1, 2], vec![2, 1]]);
        assert_eq!(compositions(3, 3), vec![vec![1, 1, 1]]);
        assert!(compositions(2, 3).is_empty());
        assert!(compositions(2, 0).is_empty());
    }

    #[test]
    fn test_composition_counts_are_binomial() {
        // C(n-1, k-1)
        assert_eq!(compositions(5, 2).len(), 4);
        assert_eq!(compositions(5, 3).len(), 6);
        assert_eq!(compositions(6, 3).len(), 10);
        for seq in compositions(6, 3) {
            assert_eq!(seq.iter().sum::<usize>(), 6);
            assert!(seq.iter().all(|&c| c >= 1));
        }
    }

    #[test]
    fn test_legal_moves_open_board() {
        let board = Board::new(5);
        let moves = legal_moves(&board, Coord::new(2, 2), &flats(2));

        // Two steps in every direction fit on a 5x5 board from the centre
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[&Coord::new(2, 3)], vec![vec![2]]);
        assert_eq!(moves[&Coord::new(2, 4)], vec![vec![1, 1]]);
        assert_eq!(moves[&Coord::new(0, 2)], vec![vec![1, 1]]);
    }

    #[test]
    fn test_legal_moves_stop_at_edge() {
        let board = Board::new(3);
        let moves = legal_moves(&board, Coord::new(0, 0), &flats(3));
        let keys: Vec<Coord> = moves.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(1, 0),
                Coord::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_wall_blocks_without_capstone() {
        let mut board = Board::new(5);
        board.push(Coord::new(2, 4), [Piece::standing(Player::Two)]).unwrap();
        let moves = legal_moves(&board, Coord::new(2, 2), &flats(2));
        assert!(moves.contains_key(&Coord::new(2, 3)));
        assert!(!moves.contains_key(&Coord::new(2, 4)));
    }

    #[test]
    fn test_capstone_flattens_only_as_lone_final_drop() {
        let mut board = Board::new(5);
        board.push(Coord::new(2, 4), [Piece::standing(Player::Two)]).unwrap();
        let hand = vec![Piece::flat(Player::One), Piece::capstone(Player::One)];
        let moves = legal_moves(&board, Coord::new(2, 2), &hand);
        assert_eq!(moves[&Coord::new(2, 4)], vec![vec![1, 1]]);

        // Adjacent wall with two pieces in hand: the capstone cannot land alone
        let mut near = Board::new(5);
        near.push(Coord::new(2, 3), [Piece::standing(Player::Two)]).unwrap();
        let moves = legal_moves(&near, Coord::new(2, 2), &hand);
        assert!(!moves.contains_key(&Coord::new(2, 3)));
        assert!(!moves.contains_key(&Coord::new(2, 4)));
    }

    #[test]
    fn test_flatten_allows_shorter_paths_ending_in_one() {
        let mut board = Board::new(5);
        board.push(Coord::new(2, 4), [Piece::standing(Player::Two)]).unwrap();
        let hand = vec![
            Piece::flat(Player::One),
            Piece::flat(Player::One),
            Piece::capstone(Player::One),
        ];
        let moves = legal_moves(&board, Coord::new(2, 2), &hand);
        assert_eq!(moves[&Coord::new(2, 4)], vec![vec![2, 1]]);
    }

    #[test]
    fn test_capstone_never_enters_capstone() {
        let mut board = Board::new(5);
        board.push(Coord::new(2, 3), [Piece::capstone(Player::Two)]).unwrap();
        let hand = vec![Piece::capstone(Player::One)];
        let moves = legal_moves(&board, Coord::new(2, 2), &hand);
        assert!(!moves.contains_key(&Coord::new(2, 3)));
        assert_eq!(
            plan_drops(&board, Coord::new(2, 2), &hand, Coord::new(2, 3), &[1]),
            Err(GameError::PathBlocked)
        );
    }

    #[test]
    fn test_plan_drops_rejects_bad_sequences() {
        let board = Board::new(5);
        let from = Coord::new(2, 2);
        let hand = flats(3);

        assert_eq!(
            plan_drops(&board, from, &hand, Coord::new(3, 3), &[3]),
            Err(GameError::InvalidDirection)
        );
        assert_eq!(
            plan_drops(&board, from, &hand, from, &[3]),
            Err(GameError::InvalidDirection)
        );
        assert_eq!(
            plan_drops(&board, from, &hand, Coord::new(2, 4), &[1, 1]),
            Err(GameError::DropCountMismatch)
        );
        assert_eq!(
            plan_drops(&board, from, &hand, Coord::new(2, 4), &[3, 0]),
            Err(GameError::DropCountMismatch)
        );
        assert_eq!(
            plan_drops(&board, from, &hand, Coord::new(2, 3), &[1, 2]),
            Err(GameError::DropCountMismatch)
        );
        assert_eq!(
            plan_drops(&board, from, &hand, Coord::new(2, 9), &[3]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn test_plan_drops_matches_enumeration() {
        let mut board = Board::new(5);
        board.push(Coord::new(0, 2), [Piece::standing(Player::Two)]).unwrap();
        board.push(Coord::new(2, 0), [Piece::capstone(Player::Two)]).unwrap();
        let from = Coord::new(2, 2);
        let hand = vec![
            Piece::flat(Player::One),
            Piece::flat(Player::Two),
            Piece::capstone(Player::One),
        ];

        let moves = legal_moves(&board, from, &hand);
        for (dest, sequences) in &moves {
            for seq in sequences {
                assert!(plan_drops(&board, from, &hand, *dest, seq).is_ok(), "{dest} {seq:?}");
            }
        }
        // Every composition toward a listed destination that is not listed is rejected
        for dest in [Coord::new(0, 2), Coord::new(1, 2)] {
            let (_, distance) = Direction::between(from, dest).unwrap();
            for seq in compositions(3, distance) {
                let listed = moves.get(&dest).map_or(false, |s| s.contains(&seq));
                assert_eq!(plan_drops(&board, from, &hand, dest, &seq).is_ok(), listed);
            }
        }
    }

    #[test]
    fn test_plan_reports_flatten() {
        let mut board = Board::new(4);
        board.push(Coord::new(0, 1), [Piece::standing(Player::Two)]).unwrap();
        let hand = vec![Piece::capstone(Player::One)];
        let plan = plan_drops(&board, Coord::new(0, 0), &hand, Coord::new(0, 1), &[1]).unwrap();
        assert!(plan.flattens);
        assert_eq!(plan.destination(), Some(Coord::new(0, 1)));
    }
}
