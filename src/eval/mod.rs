//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(cards) -> HandResult` для 5–7 карт
//!   `evaluate_best_hand(hole, board) -> HandResult`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, evaluate_best_hand, evaluate_five, EvalError};
pub use hand_rank::{HandCategory, HandResult};
