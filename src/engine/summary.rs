//! Итоги завершённой раздачи: победители, освобождённые места, раскрытие seed.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::table::SeatId;
use crate::domain::{HandId, PlayerId, TableId};
use crate::engine::pot::PotLayer;
use crate::eval::HandResult;
use crate::infra::fairness::FairnessProof;

/// Выигрыш одного места в раздаче (суммарно по всем слоям банка).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Winner {
    pub seat: SeatId,
    pub player_id: PlayerId,
    pub amount: Chips,
    /// Рука победителя; None, если банк забран без вскрытия.
    pub hand: Option<HandResult>,
}

/// Игрок покинул стол на границе раздачи и забрал остаток стека.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Departure {
    pub seat: SeatId,
    pub player_id: PlayerId,
    pub stack: Chips,
}

/// Краткое описание завершённой раздачи. Удобно для истории/кошелька.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub pot_layers: Vec<PotLayer>,
    pub winners: Vec<Winner>,
    /// Места, освобождённые на границе раздачи (обнулившиеся или ушедшие).
    pub departures: Vec<Departure>,
    /// Раскрытие server seed для честной раздачи.
    pub fairness: Option<FairnessProof>,
}

impl HandSummary {
    /// Сколько всего получило место `seat`.
    pub fn amount_won(&self, seat: SeatId) -> Chips {
        self.winners
            .iter()
            .filter(|w| w.seat == seat)
            .map(|w| w.amount)
            .sum()
    }
}
