use std::collections::HashMap;

use crate::domain::chips::Chips;
use crate::domain::table::{SeatId, TableConfig};
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::HandStatus;
use crate::engine::poker_table::{PokerTable, SeatRemoval};
use crate::engine::summary::HandSummary;
use crate::infra::fairness::Commitment;
use crate::infra::ids::IdGenerator;
use crate::infra::ledger::ChipLedger;

/// Реестр столов, которым владеет вызывающий сервис.
///
/// Каждый `PokerTable` самодостаточен: реестр только находит стол по ID
/// и связывает посадку/уход с кошельком.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: HashMap<TableId, PokerTable>,
    ids: IdGenerator,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать стол с новым ID.
    pub fn create_table(&mut self, config: TableConfig) -> Result<TableId, EngineError> {
        let mut id = self.ids.next_table_id();
        while self.tables.contains_key(&id) {
            id = self.ids.next_table_id();
        }
        let table = PokerTable::new(id, config)?;
        self.tables.insert(id, table);
        log::info!("table {} created", id);
        Ok(id)
    }

    /// Добавить готовый стол под его собственным ID.
    pub fn insert_table(&mut self, table: PokerTable) -> Result<(), EngineError> {
        let id = table.id();
        if self.tables.contains_key(&id) {
            return Err(EngineError::TableExists(id));
        }
        self.tables.insert(id, table);
        Ok(())
    }

    /// Убрать стол из реестра (и вернуть его вызывающему).
    pub fn remove_table(&mut self, table_id: TableId) -> Result<PokerTable, EngineError> {
        self.tables
            .remove(&table_id)
            .ok_or(EngineError::TableNotFound(table_id))
    }

    pub fn table(&self, table_id: TableId) -> Result<&PokerTable, EngineError> {
        self.tables
            .get(&table_id)
            .ok_or(EngineError::TableNotFound(table_id))
    }

    pub fn table_mut(&mut self, table_id: TableId) -> Result<&mut PokerTable, EngineError> {
        self.tables
            .get_mut(&table_id)
            .ok_or(EngineError::TableNotFound(table_id))
    }

    /// ID всех столов по возрастанию.
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Посадить игрока: списать бай-ин в кошельке, затем занять место.
    /// Если стол не принял игрока, бай-ин возвращается.
    pub fn sit_down<L: ChipLedger>(
        &mut self,
        table_id: TableId,
        player_id: PlayerId,
        buy_in: Chips,
        ledger: &mut L,
    ) -> Result<SeatId, EngineError> {
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or(EngineError::TableNotFound(table_id))?;

        ledger.debit(player_id, buy_in)?;
        match table.add_seat(player_id, buy_in) {
            Ok(seat) => Ok(seat),
            Err(err) => {
                ledger.credit(player_id, buy_in)?;
                Err(err)
            }
        }
    }

    /// Встать из-за стола. Вне раздачи стек сразу возвращается в кошелёк,
    /// в раздаче – когда место освободится (`settle_departures`).
    pub fn stand_up<L: ChipLedger>(
        &mut self,
        table_id: TableId,
        seat: SeatId,
        ledger: &mut L,
    ) -> Result<SeatRemoval, EngineError> {
        let removal = self.table_mut(table_id)?.remove_seat(seat)?;
        match &removal {
            SeatRemoval::Immediate { player_id, stack } => {
                ledger.credit(*player_id, *stack)?;
            }
            SeatRemoval::AtHandEnd {
                status: HandStatus::Finished(summary),
                ..
            } => {
                settle_departures(summary, ledger)?;
            }
            SeatRemoval::AtHandEnd { .. } => {}
        }
        Ok(removal)
    }

    /// Зафиксировать server seed следующей раздачи на столе `table_id`.
    pub fn commit_seed(&mut self, table_id: TableId) -> Result<Commitment, EngineError> {
        self.table_mut(table_id)?.commit_seed()
    }

    /// Provably-fair раздача на зафиксированном ранее server seed.
    pub fn start_committed_hand(
        &mut self,
        table_id: TableId,
        client_seed: impl Into<String>,
    ) -> Result<HandStatus, EngineError> {
        self.table_mut(table_id)?.start_committed_hand(client_seed)
    }

    pub fn process_action(
        &mut self,
        table_id: TableId,
        seat: SeatId,
        kind: PlayerActionKind,
    ) -> Result<HandStatus, EngineError> {
        self.table_mut(table_id)?.process_action(seat, kind)
    }
}

/// Вернуть в кошелёк стеки мест, освобождённых на границе раздачи.
/// Обнулившиеся места ничего не получают.
pub fn settle_departures<L: ChipLedger>(
    summary: &HandSummary,
    ledger: &mut L,
) -> Result<(), EngineError> {
    for departure in summary.departures.iter().filter(|d| !d.stack.is_zero()) {
        ledger.credit(departure.player_id, departure.stack)?;
    }
    Ok(())
}
