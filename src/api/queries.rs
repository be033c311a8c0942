use serde::{Deserialize, Serialize};

use crate::domain::seat::Seat;
use crate::domain::table::Table;
use crate::domain::{SeatId, TableId};
use crate::engine::{HandEngine, LegalActions, TableRegistry};

use super::dto::{SeatView, TableView};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Получить состояние стола глазами места `viewer` (None – наблюдатель).
    GetTable {
        table_id: TableId,
        viewer: Option<SeatId>,
    },

    /// Получить список столов (для лобби), без карманных карт.
    ListTables,

    /// Что может сделать место, держащее ход.
    LegalActions { table_id: TableId, seat: SeatId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableView),
    Tables(Vec<TableView>),
    LegalActions(LegalActions),
}

/// Ответить на запрос.
pub fn answer(registry: &TableRegistry, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetTable { table_id, viewer } => {
            let table = registry.table(table_id)?;
            Ok(QueryResponse::Table(table.get_state(viewer)))
        }
        Query::ListTables => {
            let mut views = Vec::new();
            for id in registry.table_ids() {
                views.push(registry.table(id)?.get_state(None));
            }
            Ok(QueryResponse::Tables(views))
        }
        Query::LegalActions { table_id, seat } => {
            let legal = registry.table(table_id)?.legal_actions(seat)?;
            Ok(QueryResponse::LegalActions(legal))
        }
    }
}

/// Сформировать DTO стола на основе `Table` + опционального `HandEngine`.
/// `current_actor` и ставки берём из engine, если он есть.
pub fn build_table_view(
    table: &Table,
    engine: Option<&HandEngine>,
    fault: Option<&str>,
    viewer: Option<SeatId>,
) -> TableView {
    let seats = table
        .occupied()
        .map(|seat| build_seat_view(seat, viewer))
        .collect();

    TableView {
        table_id: table.id,
        max_seats: table.config.max_seats,
        small_blind: table.config.stakes.small_blind,
        big_blind: table.config.stakes.big_blind,
        min_buy_in: table.config.min_buy_in,
        max_buy_in: table.config.max_buy_in,
        street: table.street,
        dealer_button: table.dealer_button,
        board: table.board.clone(),
        pot_total: engine.map(|e| e.pot.total()).unwrap_or_default(),
        current_bet: engine.map(|e| e.betting.current_bet).unwrap_or_default(),
        min_raise_to: engine.map(|e| e.betting.min_raise_to()),
        hand_in_progress: table.hand_in_progress,
        hand_id: table.current_hand_id,
        hands_played: table.hands_played,
        current_actor: engine.and_then(|e| e.current_actor),
        faulted: fault.map(str::to_owned),
        seats,
    }
}

/// Чужие карты скрыты, пока их не открыли на шоудауне.
fn build_seat_view(seat: &Seat, viewer: Option<SeatId>) -> SeatView {
    let visible = (viewer == Some(seat.id) || seat.shown) && !seat.hole_cards.is_empty();

    SeatView {
        seat: seat.id,
        player_id: seat.player_id,
        stack: seat.stack,
        street_contribution: seat.street_contribution,
        hand_contribution: seat.hand_contribution,
        in_hand: seat.in_hand,
        folded: seat.folded,
        all_in: seat.all_in,
        is_dealer: seat.is_dealer,
        is_small_blind: seat.is_small_blind,
        is_big_blind: seat.is_big_blind,
        leaving: seat.leaving,
        hole_cards: visible.then(|| seat.hole_cards.clone()),
    }
}
