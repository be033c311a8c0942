//! Инфраструктурный слой вокруг покерного движка:
//! - генерация ID;
//! - RNG-реализации для движка и provably-fair схема;
//! - узкий интерфейс кошелька.

pub mod fairness;
pub mod ids;
pub mod ledger;
pub mod rng;
pub mod rng_seed;

pub use fairness::{Commitment, FairnessProof, HandSeeds, ServerSeed};
pub use ids::*;
pub use ledger::{ChipLedger, InMemoryLedger, LedgerError};
pub use rng::*;
pub use rng_seed::RngSeed;
