use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, DeckExhausted, PlayerId, SeatId, TableId};
use crate::eval::EvalError;
use crate::infra::ledger::LedgerError;

/// Класс ошибки: от него зависит, что делает вызывающий код.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorClass {
    /// Отклонённое действие игрока. Состояние не изменилось.
    Rejected,
    /// Нельзя начать/сесть/встать прямо сейчас. Состояние не изменилось.
    Precondition,
    /// Баг движка. Стол переведён в `Faulted` и ждёт ручной сверки.
    Invariant,
}

/// Ошибки движка покера.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    // --- отклонённые действия ---
    #[error("сейчас не ход места {0}")]
    NotYourTurn(SeatId),

    #[error("нельзя check: нужно доплатить {to_call}")]
    IllegalCheck { to_call: Chips },

    #[error("нельзя call: нет ставки для уравнивания")]
    IllegalCall,

    #[error("рейз до {requested} меньше минимального {minimum}")]
    BelowMinimumRaise { minimum: Chips, requested: Chips },

    #[error("место {0} уже сфолдило")]
    AlreadyFolded(SeatId),

    #[error("место {0} уже в all-in")]
    AlreadyAllIn(SeatId),

    #[error("недостаточно фишек: нужно {needed}, в стеке {stack}")]
    NotEnoughChips { needed: Chips, stack: Chips },

    #[error("bet невозможен: на улице уже есть ставка, нужен raise")]
    BetFacingBet,

    #[error("raise невозможен: ставки ещё нет, нужен bet")]
    RaiseWithoutBet,

    #[error("неполный рейз не открыл торговлю заново: доступны только call или fold")]
    RaiseNotReopened,

    #[error("размер ставки должен быть больше нуля")]
    ZeroAmount,

    #[error("раздача не активна")]
    NoActiveHand,

    #[error("место {0} не существует или пустое")]
    UnknownSeat(SeatId),

    // --- предусловия ---
    #[error("стол заполнен")]
    TableFull,

    #[error("идёт раздача")]
    TableInHand,

    #[error("недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("server seed для следующей раздачи не зафиксирован")]
    SeedNotCommitted,

    #[error("место {0} сейчас держит ход")]
    SeatHoldsAction(SeatId),

    #[error("бай-ин {amount} вне лимитов {min}..={max}")]
    InvalidBuyIn { amount: Chips, min: Chips, max: Chips },

    #[error("игрок {0} уже сидит за столом")]
    PlayerAlreadySeated(PlayerId),

    #[error("некорректный конфиг стола: {0}")]
    InvalidConfig(String),

    #[error("стол {0} не найден")]
    TableNotFound(TableId),

    #[error("стол {0} уже существует")]
    TableExists(TableId),

    #[error("кошелёк: {0}")]
    Ledger(#[from] LedgerError),

    // --- нарушения инвариантов ---
    #[error("нарушено сохранение фишек: ожидалось {expected}, фактически {actual}")]
    ChipConservation { expected: Chips, actual: Chips },

    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),

    #[error("ошибка оценки руки: {0}")]
    InvalidHand(#[from] EvalError),

    #[error("внутренняя ошибка: {0}")]
    Internal(&'static str),

    #[error("стол в состоянии faulted ({0}), нужна ручная сверка")]
    TableFaulted(String),
}

impl EngineError {
    pub fn class(&self) -> ErrorClass {
        use EngineError::*;
        match self {
            NotYourTurn(_)
            | IllegalCheck { .. }
            | IllegalCall
            | BelowMinimumRaise { .. }
            | AlreadyFolded(_)
            | AlreadyAllIn(_)
            | NotEnoughChips { .. }
            | BetFacingBet
            | RaiseWithoutBet
            | RaiseNotReopened
            | ZeroAmount
            | NoActiveHand
            | UnknownSeat(_) => ErrorClass::Rejected,

            TableFull
            | TableInHand
            | NotEnoughPlayers
            | SeedNotCommitted
            | SeatHoldsAction(_)
            | InvalidBuyIn { .. }
            | PlayerAlreadySeated(_)
            | InvalidConfig(_)
            | TableNotFound(_)
            | TableExists(_)
            | Ledger(_) => ErrorClass::Precondition,

            ChipConservation { .. }
            | DeckExhausted(_)
            | InvalidHand(_)
            | Internal(_)
            | TableFaulted(_) => ErrorClass::Invariant,
        }
    }

    /// Стабильный машинный код для API.
    pub fn code(&self) -> &'static str {
        use EngineError::*;
        match self {
            NotYourTurn(_) => "NotYourTurn",
            IllegalCheck { .. } => "IllegalCheck",
            IllegalCall => "IllegalCall",
            BelowMinimumRaise { .. } => "BelowMinimumRaise",
            AlreadyFolded(_) => "AlreadyFolded",
            AlreadyAllIn(_) => "AlreadyAllIn",
            NotEnoughChips { .. } => "NotEnoughChips",
            BetFacingBet => "BetFacingBet",
            RaiseWithoutBet => "RaiseWithoutBet",
            RaiseNotReopened => "RaiseNotReopened",
            ZeroAmount => "ZeroAmount",
            NoActiveHand => "NoActiveHand",
            UnknownSeat(_) => "UnknownSeat",
            TableFull => "TableFull",
            TableInHand => "TableInHand",
            NotEnoughPlayers => "NotEnoughPlayers",
            SeedNotCommitted => "SeedNotCommitted",
            SeatHoldsAction(_) => "SeatHoldsAction",
            InvalidBuyIn { .. } => "InvalidBuyIn",
            PlayerAlreadySeated(_) => "PlayerAlreadySeated",
            InvalidConfig(_) => "InvalidConfig",
            TableNotFound(_) => "TableNotFound",
            TableExists(_) => "TableExists",
            Ledger(_) => "Ledger",
            ChipConservation { .. } => "ChipConservation",
            DeckExhausted(_) => "DeckExhausted",
            InvalidHand(_) => "InvalidHand",
            Internal(_) => "Internal",
            TableFaulted(_) => "TableFaulted",
        }
    }

    /// Фатально ли для стола.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Invariant
    }
}
