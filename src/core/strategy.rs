//! Move selection policies.
//!
//! Every policy is a pure function of the board it is handed: no state is
//! kept between calls, so the same board always yields the same column.
//! Ties are always broken towards the leftmost column.

use alloc::boxed::Box;
use core::fmt;
use core::str::FromStr;

use super::board::Board;
use super::common::PlayerId;
use super::simulate::simulate;
use super::win::check_win;

/// Priority level that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// The move wins the game outright.
    Win,
    /// The move takes the cell the opponent needs to win.
    Block,
    /// Nothing better was found; leftmost open column.
    FirstAvailable,
}

/// A chosen column and the reason it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    pub tier: Tier,
}

/// Policy choosing a column for `me` on a board.
pub trait MoveStrategy: Send + Sync {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Pick a column, or `None` when the board is full. `opponent` is `None`
    /// when the opponent could not be identified.
    fn decide(&self, board: &Board, me: &PlayerId, opponent: Option<&PlayerId>)
        -> Option<Decision>;

    fn select_move(
        &self,
        board: &Board,
        me: &PlayerId,
        opponent: Option<&PlayerId>,
    ) -> Option<usize> {
        self.decide(board, me, opponent).map(|d| d.column)
    }
}

/// Leftmost column that still accepts a token.
pub fn first_available(board: &Board) -> Option<usize> {
    board.valid_columns().next()
}

/// Leftmost column where `player` would complete a winning run.
pub fn winning_column(board: &Board, player: &PlayerId) -> Option<usize> {
    board
        .valid_columns()
        .find(|&c| simulate(board, c, player).is_ok_and(|next| check_win(&next, player)))
}

/// Win, then block, then first available.
pub fn select_move(board: &Board, me: &PlayerId, opponent: Option<&PlayerId>) -> Option<usize> {
    WinBlock.select_move(board, me, opponent)
}

/// Always plays the leftmost open column.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl MoveStrategy for FirstAvailable {
    fn name(&self) -> &'static str {
        "first-available"
    }

    fn decide(&self, board: &Board, _me: &PlayerId, _opponent: Option<&PlayerId>) -> Option<Decision> {
        first_available(board).map(|column| Decision {
            column,
            tier: Tier::FirstAvailable,
        })
    }
}

/// One-ply lookahead: take a win, else block the opponent's win, else fall
/// back to the leftmost open column.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinBlock;

impl MoveStrategy for WinBlock {
    fn name(&self) -> &'static str {
        "win-block"
    }

    fn decide(&self, board: &Board, me: &PlayerId, opponent: Option<&PlayerId>) -> Option<Decision> {
        if let Some(column) = winning_column(board, me) {
            return Some(Decision {
                column,
                tier: Tier::Win,
            });
        }
        if let Some(column) = opponent.and_then(|op| winning_column(board, op)) {
            return Some(Decision {
                column,
                tier: Tier::Block,
            });
        }
        FirstAvailable.decide(board, me, opponent)
    }
}

/// Named strategy, for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    FirstAvailable,
    #[default]
    WinBlock,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn MoveStrategy> {
        match self {
            StrategyKind::FirstAvailable => Box::new(FirstAvailable),
            StrategyKind::WinBlock => Box::new(WinBlock),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::FirstAvailable => FirstAvailable.name(),
            StrategyKind::WinBlock => WinBlock.name(),
        };
        f.write_str(name)
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy;

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown strategy (expected `first-available` or `win-block`)")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownStrategy {}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-available" | "first" => Ok(StrategyKind::FirstAvailable),
            "win-block" | "smart" => Ok(StrategyKind::WinBlock),
            _ => Err(UnknownStrategy),
        }
    }
}
