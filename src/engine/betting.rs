use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatId;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    /// В пределах улицы только растёт.
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Уровень ставки после последнего полного рейза.
    /// Кто уже уравнял этот уровень, не может рейзить после неполного all-in.
    pub last_full_bet: Chips,
    /// Seat последнего агрессора (bet/raise/all-in сверху).
    pub last_aggressor: Option<SeatId>,
}

impl BettingState {
    /// Новая улица без ставки, минимальный бет = большой блайнд.
    pub fn new(street: Street, big_blind: Chips) -> Self {
        Self {
            street,
            current_bet: Chips::ZERO,
            min_raise: big_blind,
            last_full_bet: Chips::ZERO,
            last_aggressor: None,
        }
    }

    /// Префлоп: блайнды уже выставлены, уравнивать нужно до большого блайнда.
    pub fn preflop(big_blind: Chips, big_blind_seat: SeatId) -> Self {
        Self {
            street: Street::Preflop,
            current_bet: big_blind,
            min_raise: big_blind,
            last_full_bet: big_blind,
            last_aggressor: Some(big_blind_seat),
        }
    }

    /// Минимальная итоговая ставка для bet/raise.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.min_raise
    }

    /// Полный рейз: новый уровень, новый минимальный шаг, торговля открыта заново.
    pub fn on_full_raise(&mut self, seat: SeatId, new_bet: Chips) {
        self.min_raise = new_bet.saturating_sub(self.current_bet);
        self.current_bet = new_bet;
        self.last_full_bet = new_bet;
        self.last_aggressor = Some(seat);
    }

    /// Неполный all-in рейз: уровень растёт, минимальный шаг прежний.
    pub fn on_incomplete_raise(&mut self, seat: SeatId, new_bet: Chips) {
        self.current_bet = new_bet;
        self.last_aggressor = Some(seat);
    }
}
