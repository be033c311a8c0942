use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatId;
use crate::domain::PlayerId;

/// Состояние одного места за столом.
///
/// Создаётся при посадке игрока, стек живёт между раздачами;
/// всё остальное сбрасывается в начале каждой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    /// Номер места (он же порядковая позиция по часовой стрелке).
    pub id: SeatId,
    pub player_id: PlayerId,
    pub stack: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Сколько внесено на текущей улице.
    pub street_contribution: Chips,
    /// Сколько внесено за всю раздачу.
    pub hand_contribution: Chips,

    /// Получил карты в текущей раздаче.
    pub in_hand: bool,
    pub folded: bool,
    pub all_in: bool,
    /// Действовал ли с момента последнего полного рейза.
    pub has_acted: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,

    /// Карты открыты на шоудауне (видны всем до следующей раздачи).
    pub shown: bool,
    /// Игрок попросил встать посреди раздачи, место освободится на границе раздачи.
    pub leaving: bool,
}

impl Seat {
    pub fn new(id: SeatId, player_id: PlayerId, stack: Chips) -> Self {
        Self {
            id,
            player_id,
            stack,
            hole_cards: Vec::new(),
            street_contribution: Chips::ZERO,
            hand_contribution: Chips::ZERO,
            in_hand: false,
            folded: false,
            all_in: false,
            has_acted: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            shown: false,
            leaving: false,
        }
    }

    /// Сброс всего per-hand состояния. В раздачу попадает только место с фишками.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.street_contribution = Chips::ZERO;
        self.hand_contribution = Chips::ZERO;
        self.in_hand = !self.stack.is_zero() && !self.leaving;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.shown = false;
    }

    pub fn reset_for_street(&mut self) {
        self.street_contribution = Chips::ZERO;
        self.has_acted = false;
    }

    /// В раздаче и не сфолдил: претендует на банк.
    pub fn is_live(&self) -> bool {
        self.in_hand && !self.folded
    }

    /// Может ещё принимать решения на улице.
    pub fn can_act(&self) -> bool {
        self.is_live() && !self.all_in
    }

    /// Сколько нужно доплатить, чтобы уравнять ставку `current_bet`.
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet.saturating_sub(self.street_contribution)
    }

    /// Перенести из стека не более `amount`. Возвращает фактически внесённое.
    /// Пустой стек после взноса означает all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.street_contribution += paid;
        self.hand_contribution += paid;
        if self.stack.is_zero() && self.in_hand {
            self.all_in = true;
        }
        paid
    }
}
