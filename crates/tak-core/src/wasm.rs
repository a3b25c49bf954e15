//! WebAssembly bindings for the Tak engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.
//! Everything crosses the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::actions::GameAction;
use crate::board::Coord;
use crate::game::{GamePhase, GameState, Winner};
use crate::piece::Player;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game on a board of `size` (3 to 9)
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> Result<WasmGame, JsValue> {
        let state = GameState::new(size).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { state })
    }

    /// Start over, discarding any move in progress
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self, size: usize) -> Result<String, JsValue> {
        let snapshot = self
            .state
            .new_game(size)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string()))
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Legal moves for the current hand as a JSON array of
    /// `{ "destination": {row, col}, "drops": [[..], ..] }`
    #[wasm_bindgen(js_name = getLegalMoves)]
    pub fn get_legal_moves(&self) -> String {
        let moves: Vec<serde_json::Value> = self
            .state
            .legal_moves()
            .into_iter()
            .map(|(destination, drops)| {
                serde_json::json!({ "destination": destination, "drops": drops })
            })
            .collect();
        serde_json::to_string(&moves).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply an action from JSON, returns events JSON or error JSON
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.state.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(
                &serde_json::to_string(&e).unwrap_or_else(|_| e.to_string()),
            )),
        }
    }

    /// Cancel the move in progress, if any; returns the state JSON
    #[wasm_bindgen(js_name = cancelMove)]
    pub fn cancel_move(&mut self) -> String {
        serde_json::to_string(&self.state.cancel()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Most pieces the current player may lift from a cell
    #[wasm_bindgen(js_name = getMaxPickup)]
    pub fn get_max_pickup(&self, row: usize, col: usize) -> usize {
        self.state.max_pickup(Coord::new(row, col))
    }

    /// Road links for a player (1 or 2) as JSON
    #[wasm_bindgen(js_name = getRoadConnections)]
    pub fn get_road_connections(&self, player: u8) -> String {
        let player = if player == 2 { Player::Two } else { Player::One };
        serde_json::to_string(&self.state.road_connections(player))
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.phase() == GamePhase::GameOver
    }

    /// Winner as 1 or 2, 0 for a draw, `undefined` while playing
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.state.winner().map(|winner| match winner {
            Winner::Player(Player::One) => 1,
            Winner::Player(Player::Two) => 2,
            Winner::Draw => 0,
        })
    }
}
