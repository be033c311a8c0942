//! Движок стола No-Limit Texas Hold'em.
//!
//! Слои:
//! - `domain` – карты, колода, места, стол;
//! - `eval` – оценка рук;
//! - `engine` – ставки, сайд-поты, жизненный цикл раздачи, стол и реестр столов;
//! - `infra` – RNG, provably-fair seed, ID, интерфейс кошелька;
//! - `api` – сериализуемые команды, запросы и DTO.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use engine::{EngineError, HandStatus, PokerTable, TableRegistry};
