use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::seat::Seat;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Как действие меняет уровень ставки на улице.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaiseKind {
    /// Уровень не меняется (fold/check/call, в том числе call-for-less).
    None,
    /// Полный рейз: торговля открывается заново для всех.
    Full,
    /// All-in сверху ставки, но меньше минимального рейза.
    Incomplete,
}

/// Проверенное действие: что именно нужно сделать со столом.
/// Строится только на чтении, поэтому отказ никогда не оставляет следов.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPlan {
    pub fold: bool,
    /// Сколько фишек уйдёт из стека в банк.
    pub put_in: Chips,
    /// Ставка места на улице после действия.
    pub street_total: Chips,
    pub raise: RaiseKind,
}

impl ActionPlan {
    fn fold() -> Self {
        Self {
            fold: true,
            put_in: Chips::ZERO,
            street_total: Chips::ZERO,
            raise: RaiseKind::None,
        }
    }

    fn passive(seat: &Seat, put_in: Chips) -> Self {
        Self {
            fold: false,
            put_in,
            street_total: seat.street_contribution + put_in,
            raise: RaiseKind::None,
        }
    }
}

/// Проверка, может ли место выполнить это действие при текущем состоянии ставок.
pub fn validate_action(
    seat: &Seat,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<ActionPlan, EngineError> {
    if seat.folded {
        return Err(EngineError::AlreadyFolded(seat.id));
    }
    if seat.all_in {
        return Err(EngineError::AlreadyAllIn(seat.id));
    }
    if !seat.in_hand {
        return Err(EngineError::UnknownSeat(seat.id));
    }

    let to_call = seat.to_call(betting.current_bet);

    match action {
        PlayerActionKind::Fold => Ok(ActionPlan::fold()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(ActionPlan::passive(seat, Chips::ZERO))
            } else {
                Err(EngineError::IllegalCheck { to_call })
            }
        }

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                return Err(EngineError::IllegalCall);
            }
            // Не хватает на полный call – это call-for-less (all-in).
            Ok(ActionPlan::passive(seat, to_call.min(seat.stack)))
        }

        PlayerActionKind::Bet(to) => {
            if !betting.current_bet.is_zero() {
                return Err(EngineError::BetFacingBet);
            }
            sized_wager(seat, *to, betting)
        }

        PlayerActionKind::Raise(to) => {
            if betting.current_bet.is_zero() {
                return Err(EngineError::RaiseWithoutBet);
            }
            sized_wager(seat, *to, betting)
        }

        PlayerActionKind::AllIn => {
            if seat.stack.is_zero() {
                return Err(EngineError::NotEnoughChips {
                    needed: Chips(1),
                    stack: seat.stack,
                });
            }
            all_in_plan(seat, betting)
        }
    }
}

/// Bet/raise до итоговой суммы `to`.
fn sized_wager(seat: &Seat, to: Chips, betting: &BettingState) -> Result<ActionPlan, EngineError> {
    if to.is_zero() {
        return Err(EngineError::ZeroAmount);
    }
    if to <= betting.current_bet {
        return Err(EngineError::BelowMinimumRaise {
            minimum: betting.min_raise_to(),
            requested: to,
        });
    }

    let needed = to.saturating_sub(seat.street_contribution);
    if needed > seat.stack {
        return Err(EngineError::NotEnoughChips {
            needed,
            stack: seat.stack,
        });
    }
    if needed == seat.stack {
        // Ставка на весь стек – это all-in, минимум рейза не требуется.
        return all_in_plan(seat, betting);
    }

    if !may_raise(seat, betting) {
        return Err(EngineError::RaiseNotReopened);
    }
    if to < betting.min_raise_to() {
        return Err(EngineError::BelowMinimumRaise {
            minimum: betting.min_raise_to(),
            requested: to,
        });
    }

    Ok(ActionPlan {
        fold: false,
        put_in: needed,
        street_total: to,
        raise: RaiseKind::Full,
    })
}

fn all_in_plan(seat: &Seat, betting: &BettingState) -> Result<ActionPlan, EngineError> {
    let street_total = seat.street_contribution + seat.stack;

    let raise = if street_total <= betting.current_bet {
        RaiseKind::None
    } else if !may_raise(seat, betting) {
        return Err(EngineError::RaiseNotReopened);
    } else if street_total >= betting.min_raise_to() {
        RaiseKind::Full
    } else {
        RaiseKind::Incomplete
    };

    Ok(ActionPlan {
        fold: false,
        put_in: seat.stack,
        street_total,
        raise,
    })
}

/// Право на рейз: место ещё не действовало после последнего полного рейза,
/// либо полного уровня на улице ещё не было.
///
/// Несколько неполных all-in подряд открывают торговлю, если вместе
/// дают месту доплату не меньше минимального рейза.
fn may_raise(seat: &Seat, betting: &BettingState) -> bool {
    !seat.has_acted
        || betting.last_full_bet.is_zero()
        || seat.street_contribution < betting.last_full_bet
        || seat.to_call(betting.current_bet) >= betting.min_raise
}

/// Что доступно месту прямо сейчас (для UI и ботов).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub can_check: bool,
    /// Сколько стоит call (None, если call невозможен).
    pub call_amount: Option<Chips>,
    /// Диапазон итоговой ставки для bet/raise (None, если запрещено).
    pub raise_range: Option<(Chips, Chips)>,
    pub can_all_in: bool,
}

pub fn legal_actions(seat: &Seat, betting: &BettingState) -> LegalActions {
    if !seat.can_act() {
        return LegalActions {
            can_check: false,
            call_amount: None,
            raise_range: None,
            can_all_in: false,
        };
    }

    let to_call = seat.to_call(betting.current_bet);
    let max_to = seat.street_contribution + seat.stack;
    let min_to = betting.min_raise_to();
    let raise_allowed = may_raise(seat, betting);

    LegalActions {
        can_check: to_call.is_zero(),
        call_amount: (!to_call.is_zero()).then(|| to_call.min(seat.stack)),
        raise_range: (raise_allowed && max_to > min_to).then_some((min_to, max_to)),
        can_all_in: !seat.stack.is_zero() && (raise_allowed || max_to <= betting.current_bet),
    }
}
