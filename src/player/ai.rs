use alloc::boxed::Box;

use log::debug;

use crate::core::{GameState, MoveStrategy, PlayerId, StrategyKind};

use super::Player;

/// Computer player driven by a [`MoveStrategy`].
pub struct AiPlayer {
    strategy: Box<dyn MoveStrategy>,
}

impl AiPlayer {
    pub fn new(strategy: Box<dyn MoveStrategy>) -> Self {
        Self { strategy }
    }

    pub fn from_kind(kind: StrategyKind) -> Self {
        Self::new(kind.build())
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::from_kind(StrategyKind::default())
    }
}

impl Player for AiPlayer {
    fn choose_column(&mut self, state: &GameState, me: &PlayerId) -> Option<usize> {
        let opponent = state.opponent_of(me);
        if opponent.is_none() {
            debug!("No opponent in lobby, blocking disabled");
        }
        let decision = self.strategy.decide(&state.board, me, opponent)?;
        debug!(
            "{} chose column {} ({:?})",
            self.strategy.name(),
            decision.column,
            decision.tier
        );
        Some(decision.column)
    }
}
