use serde::{Deserialize, Serialize};

use crate::api::dto::TableView;
use crate::api::queries::build_table_view;
use crate::domain::chips::Chips;
use crate::domain::seat::Seat;
use crate::domain::table::{SeatId, Table, TableConfig};
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventQueue, TableEvent, TableEventKind};
use crate::engine::game_loop::{self, HandEngine, HandStatus};
use crate::engine::validation::{legal_actions, LegalActions};
use crate::engine::RandomSource;
use crate::infra::fairness::{Commitment, FairnessProof, HandSeeds, ServerSeed};

/// Фаза стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TablePhase {
    /// Раздачи нет, можно садиться и вставать.
    Idle,
    InHand,
    /// Нарушен инвариант. Любые изменения запрещены до `reconcile`.
    Faulted(String),
}

/// Чем закончился `remove_seat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatRemoval {
    /// Место освобождено сразу, `stack` возвращается игроку.
    Immediate { player_id: PlayerId, stack: Chips },
    /// Идёт раздача: игрок выбыл из неё, место освободится на границе раздачи.
    /// Если уход закончил раздачу, `status` несёт её итог.
    AtHandEnd {
        player_id: PlayerId,
        status: HandStatus,
    },
}

/// Один стол: состояние, текущая раздача и исходящая очередь событий.
///
/// Все операции синхронные и применяются по одной. Общего состояния между
/// столами нет, поэтому стол можно целиком отдать одной задаче/потоку.
#[derive(Clone, Debug)]
pub struct PokerTable {
    table: Table,
    hand: Option<HandEngine>,
    events: EventQueue,
    fault: Option<String>,
    /// Server seed следующей раздачи: хэш уже опубликован, сам seed – ещё нет.
    committed_seed: Option<ServerSeed>,
}

impl PokerTable {
    pub fn new(id: TableId, config: TableConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self {
            table: Table::new(id, config),
            hand: None,
            events: EventQueue::new(id),
            fault: None,
            committed_seed: None,
        })
    }

    pub fn id(&self) -> TableId {
        self.table.id
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &TableConfig {
        &self.table.config
    }

    pub fn hand(&self) -> Option<&HandEngine> {
        self.hand.as_ref()
    }

    pub fn current_actor(&self) -> Option<SeatId> {
        self.hand.as_ref().and_then(|h| h.current_actor)
    }

    pub fn phase(&self) -> TablePhase {
        match (&self.fault, self.table.hand_in_progress) {
            (Some(reason), _) => TablePhase::Faulted(reason.clone()),
            (None, true) => TablePhase::InHand,
            (None, false) => TablePhase::Idle,
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Σ стеков + банк текущей раздачи.
    pub fn total_chips(&self) -> Chips {
        self.table.total_stacks() + self.hand.as_ref().map(|h| h.pot.total()).unwrap_or(Chips::ZERO)
    }

    fn ensure_healthy(&self) -> Result<(), EngineError> {
        match &self.fault {
            Some(reason) => Err(EngineError::TableFaulted(reason.clone())),
            None => Ok(()),
        }
    }

    /// Нарушение инварианта останавливает стол, остальное просто пробрасывается.
    fn guard<T>(&mut self, result: Result<T, EngineError>) -> Result<T, EngineError> {
        if let Err(err) = &result {
            if err.is_fatal() {
                let reason = err.to_string();
                log::error!("table {} faulted: {}", self.table.id, reason);
                self.fault = Some(reason.clone());
                self.events.push(TableEventKind::TableFaulted { reason });
            } else {
                log::debug!("table {}: rejected: {}", self.table.id, err);
            }
        }
        result
    }

    /// Посадить игрока на первое свободное место.
    pub fn add_seat(&mut self, player_id: PlayerId, buy_in: Chips) -> Result<SeatId, EngineError> {
        self.ensure_healthy()?;
        if self.table.hand_in_progress {
            return Err(EngineError::TableInHand);
        }
        if self.table.seat_of_player(player_id).is_some() {
            return Err(EngineError::PlayerAlreadySeated(player_id));
        }
        let config = &self.table.config;
        if buy_in < config.min_buy_in || buy_in > config.max_buy_in {
            return Err(EngineError::InvalidBuyIn {
                amount: buy_in,
                min: config.min_buy_in,
                max: config.max_buy_in,
            });
        }
        let seat_id = self.table.first_empty_seat().ok_or(EngineError::TableFull)?;

        self.table.seats[seat_id as usize] = Some(Seat::new(seat_id, player_id, buy_in));

        log::debug!(
            "table {}: player {} sits at {} with {}",
            self.table.id,
            player_id,
            seat_id,
            buy_in
        );
        self.events.push(TableEventKind::SeatAdded {
            seat: seat_id,
            player_id,
            stack: buy_in,
        });
        Ok(seat_id)
    }

    /// Освободить место.
    ///
    /// Вне раздачи – сразу. В раздаче место не должно держать ход: игрок выбывает
    /// из раздачи, а место освобождается на её границе.
    pub fn remove_seat(&mut self, seat_id: SeatId) -> Result<SeatRemoval, EngineError> {
        self.ensure_healthy()?;
        let seat = self
            .table
            .seat(seat_id)
            .ok_or(EngineError::UnknownSeat(seat_id))?;
        let player_id = seat.player_id;

        if self.table.hand_in_progress && seat.in_hand {
            let hand = self.hand.as_mut().ok_or(EngineError::Internal("раздача без движка"))?;
            let result = game_loop::leave_mid_hand(&mut self.table, hand, seat_id, &mut self.events);
            let status = self.guard(result)?;
            if status.is_finished() {
                self.hand = None;
            }
            return Ok(SeatRemoval::AtHandEnd { player_id, status });
        }

        let stack = self
            .table
            .seats
            .get_mut(seat_id as usize)
            .and_then(Option::take)
            .map(|s| s.stack)
            .unwrap_or(Chips::ZERO);

        log::debug!(
            "table {}: player {} leaves seat {} with {}",
            self.table.id,
            player_id,
            seat_id,
            stack
        );
        self.events.push(TableEventKind::SeatRemoved {
            seat: seat_id,
            player_id,
            stack,
        });
        Ok(SeatRemoval::Immediate { player_id, stack })
    }

    /// Следующий ID раздачи: уникален в пределах стола, даже после `reconcile`.
    fn next_hand_id(&self) -> u64 {
        self.table.current_hand_id.map(|id| id + 1).unwrap_or(1)
    }

    /// Provably-fair раздача: колоду задают server seed и client seed.
    /// Хэш server seed уходит в `HandStarted`, сам seed – в `HandEnded`.
    pub fn start_hand(&mut self, seeds: &HandSeeds) -> Result<HandStatus, EngineError> {
        let hand_id = self.next_hand_id();
        let mut rng = seeds.rng(self.table.id, hand_id);
        let proof = seeds.reveal(self.table.id, hand_id);
        self.begin_hand(&mut rng, Some(proof))
    }

    /// Зафиксировать server seed следующей раздачи и вернуть его хэш.
    ///
    /// Повторный вызов до старта раздачи возвращает тот же хэш: seed не меняется,
    /// пока его не израсходует `start_committed_hand`.
    pub fn commit_seed(&mut self) -> Result<Commitment, EngineError> {
        self.ensure_healthy()?;
        if let Some(seed) = &self.committed_seed {
            return Ok(seed.commitment());
        }

        let seed = ServerSeed::generate();
        let commitment = seed.commitment();
        self.committed_seed = Some(seed);

        let hand_id = self.next_hand_id();
        log::debug!("table {}: seed committed for hand {}: {}", self.table.id, hand_id, commitment);
        self.events.push(TableEventKind::SeedCommitted { hand_id, commitment });
        Ok(commitment)
    }

    /// Хэш зафиксированного, но ещё не использованного server seed.
    pub fn committed_seed(&self) -> Option<Commitment> {
        self.committed_seed.as_ref().map(ServerSeed::commitment)
    }

    /// Раздача на заранее зафиксированном server seed и client seed игроков.
    ///
    /// Seed расходуется, только если раздача действительно началась; отказ
    /// по предусловию оставляет его для следующей попытки.
    pub fn start_committed_hand(
        &mut self,
        client_seed: impl Into<String>,
    ) -> Result<HandStatus, EngineError> {
        self.ensure_healthy()?;
        let server_seed = self.committed_seed.ok_or(EngineError::SeedNotCommitted)?;
        let seeds = HandSeeds::new(server_seed, client_seed);

        let before = self.table.current_hand_id;
        let result = self.start_hand(&seeds);
        if self.table.current_hand_id != before {
            self.committed_seed = None;
        }
        result
    }

    /// Раздача с произвольным источником случайности (без доказательства честности).
    pub fn start_hand_with<R: RandomSource>(&mut self, rng: &mut R) -> Result<HandStatus, EngineError> {
        self.begin_hand(rng, None)
    }

    fn begin_hand<R: RandomSource>(
        &mut self,
        rng: &mut R,
        fairness: Option<FairnessProof>,
    ) -> Result<HandStatus, EngineError> {
        self.ensure_healthy()?;
        let hand_id = self.next_hand_id();

        let started = game_loop::start_hand(&mut self.table, rng, hand_id, fairness, &mut self.events);
        let mut hand = self.guard(started)?;

        // После блайндов торговаться может быть некому – раздача доигрывается сразу.
        let advanced = game_loop::advance_if_needed(&mut self.table, &mut hand, &mut self.events);
        let status = self.guard(advanced);
        self.hand = Some(hand);
        let status = status?;
        if status.is_finished() {
            self.hand = None;
        }
        Ok(status)
    }

    /// Применить действие игрока.
    pub fn process_action(
        &mut self,
        seat: SeatId,
        kind: PlayerActionKind,
    ) -> Result<HandStatus, EngineError> {
        self.ensure_healthy()?;
        let hand = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;

        let result = game_loop::apply_action(
            &mut self.table,
            hand,
            PlayerAction::new(seat, kind),
            &mut self.events,
        );
        let status = self.guard(result)?;
        if status.is_finished() {
            self.hand = None;
        }
        Ok(status)
    }

    /// Что может сделать место прямо сейчас. Не в свой ход – ничего.
    pub fn legal_actions(&self, seat_id: SeatId) -> Result<LegalActions, EngineError> {
        let hand = self.hand.as_ref().ok_or(EngineError::NoActiveHand)?;
        let seat = self
            .table
            .seat(seat_id)
            .ok_or(EngineError::UnknownSeat(seat_id))?;
        if hand.current_actor != Some(seat_id) {
            return Err(EngineError::NotYourTurn(seat_id));
        }
        Ok(legal_actions(seat, &hand.betting))
    }

    /// Публичный вид стола. Карманные карты видны только их владельцу
    /// и открывшимся на шоудауне.
    pub fn get_state(&self, viewer: Option<SeatId>) -> TableView {
        build_table_view(&self.table, self.hand.as_ref(), self.fault.as_deref(), viewer)
    }

    /// Забрать накопленные события.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Ручная сверка после сбоя: взносы прерванной раздачи возвращаются в стеки,
    /// раздача снимается, стол снова принимает команды.
    pub fn reconcile(&mut self) -> Result<Vec<(SeatId, Chips)>, EngineError> {
        let mut refunds = Vec::new();
        let interrupted = self.table.hand_in_progress;
        self.hand = None;

        // Движок раздачи мог не пережить сбой на старте, поэтому взносы берутся с мест.
        for seat in self.table.occupied_mut() {
            if interrupted && !seat.hand_contribution.is_zero() {
                seat.stack += seat.hand_contribution;
                refunds.push((seat.id, seat.hand_contribution));
            }
            seat.reset_for_hand();
            seat.in_hand = false;
        }
        self.table.board.clear();
        self.table.hand_in_progress = false;

        if let Some(reason) = self.fault.take() {
            log::warn!("table {} reconciled after fault: {}", self.table.id, reason);
        }
        self.events.push(TableEventKind::TableReconciled {
            refunds: refunds.clone(),
        });
        Ok(refunds)
    }
}
