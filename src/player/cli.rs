#![cfg(feature = "std")]

use std::boxed::Box;
use std::io::{self, BufRead, BufReader, Write};
use std::string::String;

use crate::core::{Board, GameState, PlayerId};
use crate::ui;

use super::Player;

/// Human player typing column numbers on a terminal.
pub struct CliPlayer {
    input: Box<dyn BufRead + Send>,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self::with_input(BufReader::new(io::stdin()))
    }

    /// Read answers from `input` instead of stdin.
    pub fn with_input<R: BufRead + Send + 'static>(input: R) -> Self {
        Self {
            input: Box::new(input),
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a column typed by the user and check it can be played.
pub fn parse_column(input: &str, board: &Board) -> Result<usize, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let col: usize = input
        .parse()
        .map_err(|_| format!("Invalid column '{}' - must be a number", input))?;
    if col >= board.cols() {
        return Err(format!(
            "Column {} out of bounds - must be 0-{}",
            col,
            board.cols() - 1
        ));
    }
    if !board.is_valid_move(col) {
        return Err(format!("Column {} is full", col));
    }
    Ok(col)
}

impl Player for CliPlayer {
    fn choose_column(&mut self, state: &GameState, me: &PlayerId) -> Option<usize> {
        ui::print_board(state, me);
        if state.board.is_full() {
            std::println!("No valid moves available.");
            return None;
        }
        loop {
            std::print!("Choose a column (0-{}): ", state.board.cols() - 1);
            let _ = io::stdout().flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            match parse_column(&line, &state.board) {
                Ok(col) => return Some(col),
                Err(e) => std::println!("{}. Try again.", e),
            }
        }
    }

    fn handle_move_result(&mut self, column: usize, accepted: bool) {
        if accepted {
            std::println!("Move successful: Column {}", column);
        }
    }
}
