//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `PokerTable` (один стол) и `TableRegistry` (набор столов).
//! Основные операции раздачи (`game_loop`):
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `advance_if_needed` – авто-переход улиц/завершение раздачи

pub mod actions;
pub mod betting;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod poker_table;
pub mod positions;
pub mod pot;
pub mod registry;
pub mod summary;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::BettingState;
pub use errors::{EngineError, ErrorClass};
pub use events::{EventQueue, ShownHand, TableEvent, TableEventKind};
pub use game_loop::{advance_if_needed, apply_action, start_hand, HandEngine, HandStatus};
pub use poker_table::{PokerTable, SeatRemoval, TablePhase};
pub use pot::{compute_pot_layers, distribute, Award, Pot, PotLayer};
pub use registry::{settle_departures, TableRegistry};
pub use summary::{Departure, HandSummary, Winner};
pub use validation::{legal_actions, validate_action, LegalActions};

/// RNG интерфейс для engine живёт в домене рядом с колодой.
pub use crate::domain::deck::RandomSource;
