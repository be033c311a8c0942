use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatId, TableId};
use crate::engine::summary::HandSummary;
use crate::engine::HandStatus;
use crate::infra::fairness::Commitment;

/// DTO места за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatId,
    pub player_id: PlayerId,
    pub stack: Chips,
    pub street_contribution: Chips,
    pub hand_contribution: Chips,
    pub in_hand: bool,
    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub leaving: bool,
    /// Карманные карты – только для владельца или после вскрытия.
    pub hole_cards: Option<Vec<Card>>,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub table_id: TableId,
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub street: Street,
    pub dealer_button: Option<SeatId>,
    pub board: Vec<Card>,
    pub pot_total: Chips,
    /// Ставка, которую нужно уравнять на текущей улице.
    pub current_bet: Chips,
    /// Минимальная итоговая ставка для рейза.
    pub min_raise_to: Option<Chips>,
    pub hand_in_progress: bool,
    pub hand_id: Option<HandId>,
    pub hands_played: u64,
    /// Текущий игрок, чей ход (если раздача идёт).
    pub current_actor: Option<SeatId>,
    /// Причина остановки стола, если он в faulted.
    pub faulted: Option<String>,
    pub seats: Vec<SeatView>,
}

impl TableView {
    pub fn seat(&self, seat: SeatId) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.seat == seat)
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Создан новый стол.
    TableCreated(TableView),

    /// Игрок сел, бай-ин списан.
    Seated { seat: SeatId, table: TableView },

    /// Игрок встал. `credited` – сколько уже вернулось в кошелёк;
    /// `pending` – место освободится после текущей раздачи.
    StoodUp {
        player_id: PlayerId,
        credited: Chips,
        pending: bool,
        table: TableView,
    },

    /// Хэш server seed следующей раздачи.
    SeedCommitted {
        table_id: TableId,
        commitment: Commitment,
    },

    /// Вернуть обновлённое состояние стола.
    TableState(TableView),

    /// Раздача завершилась этим действием.
    HandFinished {
        table: TableView,
        summary: HandSummary,
    },
}

/// Помощник: преобразование HandStatus движка в DTO.
pub fn map_hand_status_to_response(status: HandStatus, table: TableView) -> CommandResponse {
    match status {
        HandStatus::Ongoing => CommandResponse::TableState(table),
        HandStatus::Finished(summary) => CommandResponse::HandFinished { table, summary },
    }
}
