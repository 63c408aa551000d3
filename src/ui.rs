#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::string::String;

use crate::core::{Board, Cell, GameState, Outcome, PlayerId};

pub const ABOUT_TEXT: &str =
    "===== About 4 in a Row =====\nA strategic game where the first to align 4 blocks in a row wins!";

/// Symbol used for a cell as seen by `me`.
fn cell_symbol(cell: &Cell, me: &PlayerId, opponent: Option<&PlayerId>) -> char {
    match cell.owner() {
        None => '.',
        Some(id) if id == me => 'X',
        Some(id) if Some(id) == opponent => 'O',
        Some(_) => '?',
    }
}

/// Render `board` as text: a column header, then one line per row.
/// `me` is drawn as `X`, `opponent` as `O`, empty cells as `.`.
pub fn render_board(board: &Board, me: &PlayerId, opponent: Option<&PlayerId>) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for c in 0..board.cols() {
        let _ = write!(out, "{:>3}", c);
    }
    out.push('\n');
    for r in 0..board.rows() {
        let _ = write!(out, "{:>2} ", r);
        for c in 0..board.cols() {
            let symbol = board
                .get(r, c)
                .map(|cell| cell_symbol(cell, me, opponent))
                .unwrap_or(' ');
            let _ = write!(out, "{:>3}", symbol);
        }
        out.push('\n');
    }
    out.push_str(&"-".repeat(3 + 3 * board.cols()));
    out
}

pub fn print_board(state: &GameState, me: &PlayerId) {
    std::println!("{}", render_board(&state.board, me, state.opponent_of(me)));
    std::println!("Legend: X=You  O=Opponent  .=Empty");
}

pub fn print_your_turn() {
    std::println!("\n╔════════════════════════════════════╗");
    std::println!("║             YOUR TURN              ║");
    std::println!("╚════════════════════════════════════╝");
}

/// One-line description of how the game ended.
pub fn outcome_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Won => "You won! Four in a row.".to_string(),
        Outcome::Lost => "You lost. Your opponent aligned four.".to_string(),
        Outcome::Draw => "Draw: the board is full.".to_string(),
        Outcome::Ended(msg) => msg.clone(),
    }
}

pub fn print_game_over(state: &GameState, me: &PlayerId, outcome: &Outcome) {
    std::println!("\n╔════════════════════════════════════╗");
    std::println!("║             GAME OVER              ║");
    std::println!("╚════════════════════════════════════╝");
    print_board(state, me);
    if let Some(msg) = &state.message {
        std::println!("Game Over: {}", msg);
    }
    std::println!("{}", outcome_text(outcome));
}
