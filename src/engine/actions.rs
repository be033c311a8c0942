use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatId};

/// Тип действия игрока.
///
/// Суммы в `Bet` и `Raise` - итоговая ставка игрока на улице ("raise to"),
/// а не прибавка к ней.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки.
    Bet(Chips),
    /// Raise существующей ставки.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => write!(f, "fold"),
            PlayerActionKind::Check => write!(f, "check"),
            PlayerActionKind::Call => write!(f, "call"),
            PlayerActionKind::Bet(to) => write!(f, "bet {to}"),
            PlayerActionKind::Raise(to) => write!(f, "raise to {to}"),
            PlayerActionKind::AllIn => write!(f, "all-in"),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// В каком месте сидит действующий игрок.
    pub seat: SeatId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(seat: SeatId, kind: PlayerActionKind) -> Self {
        Self { seat, kind }
    }
}
