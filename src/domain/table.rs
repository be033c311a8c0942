use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::seat::Seat;
use crate::domain::{HandId, PlayerId, TableId};

/// Индекс места за столом (0..max_seats-1).
pub type SeatId = u8;

/// Больше 10 мест колоде не хватит: 2·10 карманных + 5 на борд.
pub const MAX_SEATS_LIMIT: u8 = 10;

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

/// Конфиг стола: сколько мест, блайнды, лимиты бай-ина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (2–10).
    pub max_seats: u8,
    pub stakes: TableStakes,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
}

impl TableConfig {
    /// Стол на `max_seats` мест, бай-ин от 20 до 200 больших блайндов.
    pub fn ring(max_seats: u8, sb: Chips, bb: Chips) -> Self {
        Self {
            max_seats,
            stakes: TableStakes::new(sb, bb),
            min_buy_in: Chips(bb.0.saturating_mul(20)),
            max_buy_in: Chips(bb.0.saturating_mul(200)),
        }
    }

    pub fn heads_up(sb: Chips, bb: Chips) -> Self {
        Self::ring(2, sb, bb)
    }

    /// Без ограничений на бай-ин (удобно для тестов и дев-симуляций).
    pub fn with_any_buy_in(mut self) -> Self {
        self.min_buy_in = Chips(1);
        self.max_buy_in = Chips(u64::MAX);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seats < 2 || self.max_seats > MAX_SEATS_LIMIT {
            return Err(format!(
                "max_seats = {}, допустимо 2..={}",
                self.max_seats, MAX_SEATS_LIMIT
            ));
        }
        if self.stakes.small_blind.is_zero() {
            return Err("small_blind = 0".into());
        }
        if self.stakes.big_blind < self.stakes.small_blind {
            return Err(format!(
                "big_blind ({}) < small_blind ({})",
                self.stakes.big_blind, self.stakes.small_blind
            ));
        }
        if self.min_buy_in.is_zero() || self.min_buy_in > self.max_buy_in {
            return Err(format!(
                "некорректные лимиты бай-ина: {}..={}",
                self.min_buy_in, self.max_buy_in
            ));
        }
        Ok(())
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatId.
    /// None – место пустое.
    pub seats: Vec<Option<Seat>>,

    /// Общие карты борда (0/3/4/5 карт, строго по улице).
    pub board: Vec<Card>,

    /// Индекс дилерской кнопки или None, если раздач ещё не было.
    pub dealer_button: Option<SeatId>,

    /// ID текущей (или последней) раздачи.
    pub current_hand_id: Option<HandId>,

    pub street: Street,

    /// Идёт ли сейчас раздача.
    pub hand_in_progress: bool,

    /// Сколько раздач сыграно за этим столом.
    pub hands_played: u64,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            id,
            config,
            seats,
            board: Vec::new(),
            dealer_button: None,
            current_hand_id: None,
            street: Street::Preflop,
            hand_in_progress: false,
            hands_played: 0,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Сколько мест с фишками (кандидаты в следующую раздачу).
    pub fn funded_count(&self) -> usize {
        self.occupied()
            .filter(|s| !s.stack.is_zero() && !s.leaving)
            .count()
    }

    pub fn is_seat_empty(&self, index: SeatId) -> bool {
        self.seat(index).is_none()
    }

    pub fn first_empty_seat(&self) -> Option<SeatId> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|idx| idx as SeatId)
    }

    pub fn seat(&self, index: SeatId) -> Option<&Seat> {
        self.seats.get(index as usize).and_then(|s| s.as_ref())
    }

    pub fn seat_mut(&mut self, index: SeatId) -> Option<&mut Seat> {
        self.seats.get_mut(index as usize).and_then(|s| s.as_mut())
    }

    pub fn seat_of_player(&self, player_id: PlayerId) -> Option<SeatId> {
        self.occupied()
            .find(|s| s.player_id == player_id)
            .map(|s| s.id)
    }

    pub fn occupied(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter_map(|s| s.as_ref())
    }

    pub fn occupied_mut(&mut self) -> impl Iterator<Item = &mut Seat> {
        self.seats.iter_mut().filter_map(|s| s.as_mut())
    }

    /// Сумма стеков всех сидящих.
    pub fn total_stacks(&self) -> Chips {
        self.occupied().map(|s| s.stack).sum()
    }

    pub fn live_count(&self) -> usize {
        self.occupied().filter(|s| s.is_live()).count()
    }

    pub fn actionable_count(&self) -> usize {
        self.occupied().filter(|s| s.can_act()).count()
    }
}
