use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatId, TableId};
use crate::engine::actions::PlayerActionKind;
use crate::engine::pot::PotLayer;
use crate::engine::summary::{Departure, Winner};
use crate::eval::HandResult;
use crate::infra::fairness::{Commitment, FairnessProof};

/// Вскрытая рука на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShownHand {
    pub seat: SeatId,
    pub hole_cards: Vec<Card>,
    pub hand: HandResult,
}

/// Тип события стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableEventKind {
    SeatAdded {
        seat: SeatId,
        player_id: PlayerId,
        stack: Chips,
    },

    /// Место освобождено; `stack` уходит обратно в кошелёк.
    SeatRemoved {
        seat: SeatId,
        player_id: PlayerId,
        stack: Chips,
    },

    /// Игрок встал посреди раздачи: его карты сброшены, место уйдёт после раздачи.
    SeatLeaving {
        seat: SeatId,
        player_id: PlayerId,
    },

    /// Хэш server seed следующей раздачи опубликован до того, как известен client seed.
    SeedCommitted {
        hand_id: HandId,
        commitment: Commitment,
    },

    /// Новая раздача началась, блайнды выставлены, карты розданы.
    HandStarted {
        hand_id: HandId,
        button: SeatId,
        small_blind: (SeatId, Chips),
        big_blind: (SeatId, Chips),
        seats: Vec<SeatId>,
        /// Хэш server seed, опубликованный до первой ставки.
        commitment: Option<Commitment>,
    },

    /// Действие игрока применено.
    ActionApplied {
        seat: SeatId,
        action: PlayerActionKind,
        /// Сколько фишек ушло в банк этим действием.
        amount: Chips,
        stack_after: Chips,
        all_in: bool,
        current_bet: Chips,
        pot_total: Chips,
    },

    /// Переход на новую улицу с открытием общих карт.
    StreetAdvanced {
        street: Street,
        board: Vec<Card>,
    },

    /// Шоудаун – открытие карт.
    Showdown {
        hands: Vec<ShownHand>,
    },

    /// Раздача завершена, фишки выплачены.
    HandEnded {
        hand_id: HandId,
        winners: Vec<Winner>,
        pot_layers: Vec<PotLayer>,
        departures: Vec<Departure>,
        fairness: Option<FairnessProof>,
    },

    /// Нарушен инвариант, стол остановлен.
    TableFaulted {
        reason: String,
    },

    /// Ручная сверка: взносы текущей раздачи возвращены в стеки.
    TableReconciled {
        refunds: Vec<(SeatId, Chips)>,
    },
}

/// Событие стола с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableEvent {
    pub index: u64,
    pub table_id: TableId,
    pub kind: TableEventKind,
}

/// Исходящая очередь событий одного стола.
///
/// Движок только дописывает события; вызывающий код забирает их `drain`
/// и сам решает, куда отправить (кошелёк, рассылка, достижения).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventQueue {
    table_id: TableId,
    next_index: u64,
    pending: VecDeque<TableEvent>,
}

impl EventQueue {
    pub fn new(table_id: TableId) -> Self {
        Self {
            table_id,
            next_index: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, kind: TableEventKind) {
        let index = self.next_index;
        self.next_index += 1;
        self.pending.push_back(TableEvent {
            index,
            table_id: self.table_id,
            kind,
        });
    }

    /// Забрать все накопленные события.
    pub fn drain(&mut self) -> Vec<TableEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableEvent> {
        self.pending.iter()
    }
}
