//! Tak - a rules engine for the stacking board game
//!
//! This crate provides the core game logic for Tak, including:
//! - Pieces, stacks, and the N×N board they live on
//! - Road detection for both players
//! - Drop-distribution enumeration for carried stacks
//! - Game state machine with full rule enforcement
//!
//! # Architecture
//!
//! The game engine is platform-agnostic and has no notion of rendering or
//! input. A host (terminal, browser, anything else) owns one `GameState`,
//! issues commands through it, and renders from `GameSnapshot`. It can be
//! compiled to:
//! - Native Rust for terminal or server hosts
//! - WebAssembly for a browser front end (`wasm` feature)
//!
//! # Modules
//!
//! - [`piece`]: Players, stone types, pieces and stacks
//! - [`inventory`]: Per-player reserves and the board-size table
//! - [`board`]: Coordinates, directions and the grid of stacks
//! - [`road`]: Road search and road links
//! - [`movegen`]: Drop sequences for a carried stack
//! - [`game`]: Game state machine
//! - [`actions`]: Serializable commands and events

pub mod actions;
pub mod board;
pub mod game;
pub mod inventory;
pub mod movegen;
pub mod piece;
pub mod road;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, WinReason};
pub use board::{Board, Coord, Direction};
pub use game::{GameError, GamePhase, GameSnapshot, GameState, Winner};
pub use inventory::{Inventory, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use movegen::LegalMoves;
pub use piece::{Piece, Player, Stack, StoneType};
pub use road::RoadLink;
