use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, PlayerId};

/// Ошибки кошелька.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("игрок {0} не зарегистрирован")]
    UnknownPlayer(PlayerId),

    #[error("игрок {0} уже зарегистрирован")]
    AlreadyRegistered(PlayerId),

    #[error("недостаточно средств: баланс {balance}, запрошено {requested}")]
    InsufficientBalance { balance: Chips, requested: Chips },
}

/// Узкий интерфейс кошелька, от которого зависит стол.
///
/// Хранение и конвертация валют – снаружи; стол только списывает бай-ин
/// и возвращает остаток стека, когда игрок встаёт.
pub trait ChipLedger {
    fn add_player(&mut self, player_id: PlayerId, balance: Chips) -> Result<(), LedgerError>;

    /// Удалить игрока, вернуть его баланс.
    fn remove_player(&mut self, player_id: PlayerId) -> Result<Chips, LedgerError>;

    /// Текущий баланс игрока.
    fn get_player(&self, player_id: PlayerId) -> Option<Chips>;

    /// Зачислить, вернуть новый баланс.
    fn credit(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, LedgerError>;

    /// Списать, вернуть новый баланс.
    fn debit(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, LedgerError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    balances: HashMap<PlayerId, Chips>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сумма всех балансов.
    pub fn total(&self) -> Chips {
        self.balances.values().sum()
    }
}

impl ChipLedger for InMemoryLedger {
    fn add_player(&mut self, player_id: PlayerId, balance: Chips) -> Result<(), LedgerError> {
        if self.balances.contains_key(&player_id) {
            return Err(LedgerError::AlreadyRegistered(player_id));
        }
        self.balances.insert(player_id, balance);
        Ok(())
    }

    fn remove_player(&mut self, player_id: PlayerId) -> Result<Chips, LedgerError> {
        self.balances
            .remove(&player_id)
            .ok_or(LedgerError::UnknownPlayer(player_id))
    }

    fn get_player(&self, player_id: PlayerId) -> Option<Chips> {
        self.balances.get(&player_id).copied()
    }

    fn credit(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, LedgerError> {
        let balance = self
            .balances
            .get_mut(&player_id)
            .ok_or(LedgerError::UnknownPlayer(player_id))?;
        *balance += amount;
        Ok(*balance)
    }

    fn debit(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, LedgerError> {
        let balance = self
            .balances
            .get_mut(&player_id)
            .ok_or(LedgerError::UnknownPlayer(player_id))?;
        *balance = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                balance: *balance,
                requested: amount,
            })?;
        Ok(*balance)
    }
}
