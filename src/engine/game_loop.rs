use std::collections::{BTreeMap, BTreeSet};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::seat::Seat;
use crate::domain::hand::Street;
use crate::domain::table::{SeatId, Table};
use crate::domain::{HandId, TableId};
use crate::engine::actions::PlayerAction;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventQueue, ShownHand, TableEventKind};
use crate::engine::positions::{
    button_for_new_hand, next_dealer, next_seat_where, order_from_button, seats_clockwise_from,
};
use crate::engine::pot::{distribute, Award, Pot, PotLayer};
use crate::engine::summary::{Departure, HandSummary, Winner};
use crate::engine::validation::{validate_action, RaiseKind};
use crate::engine::RandomSource;
use crate::eval::{evaluate_best_hand, HandResult};
use crate::infra::fairness::FairnessProof;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary),
}

impl HandStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, HandStatus::Finished(_))
    }
}

/// Внутреннее состояние раздачи.
///
/// Живёт от `start_hand` до выплаты банка; стеки и места остаются в `Table`.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    pub pot: Pot,
    /// Чей сейчас ход (seat). None – ставки на улице закрыты.
    pub current_actor: Option<SeatId>,
    /// Раскрытие seed; есть только у provably-fair раздачи.
    pub fairness: Option<FairnessProof>,
    /// Σ стеков + банк на старте раздачи. Должно держаться до самого конца.
    pub baseline: Chips,
    /// Розданные карты в порядке снятия с колоды.
    pub dealt: Vec<Card>,
}

/// Старт новой раздачи:
/// - выбирает дилера;
/// - постит блайнды (хедз-ап: кнопка ставит SB);
/// - раздаёт карманные карты;
/// - настраивает BettingState и current_actor.
///
/// Если после блайндов торговаться некому (все в all-in), ход остаётся пустым:
/// вызывающий сразу дёргает `advance_if_needed`.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    hand_id: HandId,
    fairness: Option<FairnessProof>,
    events: &mut EventQueue,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::TableInHand);
    }
    if table.funded_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let baseline = table.total_stacks();
    let deck = Deck::new_shuffled(rng);

    for seat in table.occupied_mut() {
        seat.reset_for_hand();
    }
    table.board.clear();
    table.street = Street::Preflop;
    table.current_hand_id = Some(hand_id);
    table.hand_in_progress = true;

    let button = button_for_new_hand(table).ok_or(EngineError::Internal("нет места для кнопки"))?;
    table.dealer_button = Some(button);

    let in_hand = |s: &Seat| s.in_hand;
    let heads_up = table.occupied().filter(|s| s.in_hand).count() == 2;
    let sb_seat = if heads_up {
        button
    } else {
        next_seat_where(table, button, in_hand).ok_or(EngineError::Internal("нет места для SB"))?
    };
    let bb_seat =
        next_seat_where(table, sb_seat, in_hand).ok_or(EngineError::Internal("нет места для BB"))?;

    let stakes = table.config.stakes.clone();
    let mut engine = HandEngine {
        table_id: table.id,
        hand_id,
        deck,
        betting: BettingState::preflop(stakes.big_blind, bb_seat),
        pot: Pot::new(),
        current_actor: None,
        fairness,
        baseline,
        dealt: Vec::new(),
    };

    if let Some(seat) = table.seat_mut(button) {
        seat.is_dealer = true;
    }
    let sb_paid = post_blind(table, &mut engine, sb_seat, stakes.small_blind, false)?;
    let bb_paid = post_blind(table, &mut engine, bb_seat, stakes.big_blind, true)?;

    deal_hole_cards(table, &mut engine, button)?;

    engine.current_actor = next_to_act(table, &engine.betting, bb_seat);

    let seats: Vec<SeatId> = table.occupied().filter(|s| s.in_hand).map(|s| s.id).collect();
    log::info!(
        "table {} hand {}: start, button {}, SB {} ({}), BB {} ({}), seats {:?}",
        table.id,
        hand_id,
        button,
        sb_seat,
        sb_paid,
        bb_seat,
        bb_paid,
        seats
    );

    events.push(TableEventKind::HandStarted {
        hand_id,
        button,
        small_blind: (sb_seat, sb_paid),
        big_blind: (bb_seat, bb_paid),
        seats,
        commitment: engine.fairness.as_ref().map(|f| f.commitment),
    });

    check_conservation(table, &engine)?;
    Ok(engine)
}

/// Блайнд на месте `seat`. Короткий стек ставит сколько есть и уходит в all-in.
fn post_blind(
    table: &mut Table,
    engine: &mut HandEngine,
    seat_id: SeatId,
    amount: Chips,
    big: bool,
) -> Result<Chips, EngineError> {
    let seat = table
        .seat_mut(seat_id)
        .ok_or(EngineError::Internal("блайнд на пустом месте"))?;
    if big {
        seat.is_big_blind = true;
    } else {
        seat.is_small_blind = true;
    }
    let paid = seat.commit(amount);
    engine.pot.add(seat_id, paid);
    Ok(paid)
}

/// Карманные карты – по одной за круг, два круга, начиная слева от кнопки.
fn deal_hole_cards(
    table: &mut Table,
    engine: &mut HandEngine,
    button: SeatId,
) -> Result<(), EngineError> {
    let max = table.seats.len();
    let first = ((button as usize + 1) % max) as SeatId;
    let order: Vec<SeatId> = seats_clockwise_from(table, first)
        .into_iter()
        .filter(|&idx| table.seat(idx).map(|s| s.in_hand).unwrap_or(false))
        .collect();

    for _round in 0..2 {
        for &seat_id in &order {
            let card = engine.deck.deal_one()?;
            engine.dealt.push(card);
            if let Some(seat) = table.seat_mut(seat_id) {
                seat.hole_cards.push(card);
            }
        }
    }
    Ok(())
}

/// Закрыт ли раунд ставок: больше некому или незачем действовать.
fn betting_closed(table: &Table, betting: &BettingState) -> bool {
    if table.live_count() <= 1 {
        return true;
    }
    let mut actionable = table.occupied().filter(|s| s.can_act());
    match (actionable.next(), actionable.next()) {
        (None, _) => true,
        // Один игрок с фишками против all-in: торговаться не с кем,
        // если ему не нужно уравнивать.
        (Some(only), None) => only.street_contribution >= betting.current_bet,
        _ => false,
    }
}

/// Следующее место, которому нужно действовать после `from`.
fn next_to_act(table: &Table, betting: &BettingState, from: SeatId) -> Option<SeatId> {
    if betting_closed(table, betting) {
        return None;
    }
    next_seat_where(table, from, |s| {
        s.can_act() && (!s.has_acted || s.street_contribution < betting.current_bet)
    })
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Все проверки идут до первой мутации: отказ не меняет ни стол, ни банк.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
    events: &mut EventQueue,
) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::NoActiveHand);
    }

    let seat = table
        .seat(action.seat)
        .ok_or(EngineError::UnknownSeat(action.seat))?;
    if seat.folded {
        return Err(EngineError::AlreadyFolded(action.seat));
    }
    if engine.current_actor != Some(action.seat) {
        return Err(EngineError::NotYourTurn(action.seat));
    }

    let plan = validate_action(seat, &action.kind, &engine.betting)?;

    // --- дальше только мутации ---
    let seat = table
        .seat_mut(action.seat)
        .ok_or(EngineError::Internal("место пропало после валидации"))?;

    let paid = if plan.fold {
        seat.folded = true;
        Chips::ZERO
    } else {
        seat.commit(plan.put_in)
    };
    seat.has_acted = true;
    let stack_after = seat.stack;
    let all_in = seat.all_in;
    engine.pot.add(action.seat, paid);

    match plan.raise {
        RaiseKind::Full => {
            engine.betting.on_full_raise(action.seat, plan.street_total);
            // Полный рейз: всем остальным снова нужно ответить.
            for other in table.occupied_mut() {
                if other.id != action.seat && other.can_act() {
                    other.has_acted = false;
                }
            }
        }
        RaiseKind::Incomplete => {
            engine.betting.on_incomplete_raise(action.seat, plan.street_total);
        }
        RaiseKind::None => {}
    }

    log::debug!(
        "table {} hand {}: seat {} {} (paid {}, stack {}, bet {}, pot {})",
        table.id,
        engine.hand_id,
        action.seat,
        action.kind,
        paid,
        stack_after,
        engine.betting.current_bet,
        engine.pot.total()
    );

    events.push(TableEventKind::ActionApplied {
        seat: action.seat,
        action: action.kind,
        amount: paid,
        stack_after,
        all_in,
        current_bet: engine.betting.current_bet,
        pot_total: engine.pot.total(),
    });

    check_conservation(table, engine)?;

    engine.current_actor = next_to_act(table, &engine.betting, action.seat);
    advance_if_needed(table, engine, events)
}

/// Игрок встаёт посреди раздачи, не держа ход.
///
/// Место с возможностью действовать сбрасывает карты; all-in остаётся претендовать
/// на банк. Само место освободится в `end_hand`.
pub fn leave_mid_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    seat_id: SeatId,
    events: &mut EventQueue,
) -> Result<HandStatus, EngineError> {
    if engine.current_actor == Some(seat_id) {
        return Err(EngineError::SeatHoldsAction(seat_id));
    }
    let seat = table
        .seat_mut(seat_id)
        .ok_or(EngineError::UnknownSeat(seat_id))?;

    seat.leaving = true;
    if seat.can_act() {
        seat.folded = true;
    }
    let player_id = seat.player_id;

    log::debug!(
        "table {} hand {}: seat {} leaves mid-hand",
        table.id,
        engine.hand_id,
        seat_id
    );
    events.push(TableEventKind::SeatLeaving {
        seat: seat_id,
        player_id,
    });

    if betting_closed(table, &engine.betting) {
        engine.current_actor = None;
    }
    advance_if_needed(table, engine, events)
}

/// Переход улиц / шоудаун / завершение раздачи.
///
/// Пока кто-то держит ход, ничего не делает. Если ставки закрыты до ривера,
/// оставшиеся улицы открываются подряд без торговли.
pub fn advance_if_needed(
    table: &mut Table,
    engine: &mut HandEngine,
    events: &mut EventQueue,
) -> Result<HandStatus, EngineError> {
    loop {
        if table.live_count() <= 1 {
            return finish_uncontested(table, engine, events);
        }
        if engine.current_actor.is_some() {
            return Ok(HandStatus::Ongoing);
        }

        match table.street.next() {
            Some(Street::Showdown) | None => return finish_with_showdown(table, engine, events),
            Some(next) => {
                deal_street(table, engine, next, events)?;
                start_street(table, engine, next);
            }
        }
    }
}

/// Открыть борд до нужной длины для улицы `street`.
fn deal_street(
    table: &mut Table,
    engine: &mut HandEngine,
    street: Street,
    events: &mut EventQueue,
) -> Result<(), EngineError> {
    let count = street.board_len().saturating_sub(table.board.len());
    let cards = engine.deck.deal(count)?;
    engine.dealt.extend_from_slice(&cards);
    table.board.extend(cards);
    table.street = street;

    log::debug!(
        "table {} hand {}: {:?} {:?}",
        table.id,
        engine.hand_id,
        street,
        table.board
    );
    events.push(TableEventKind::StreetAdvanced {
        street,
        board: table.board.clone(),
    });
    Ok(())
}

/// Новая улица: вклады улицы обнулены, первым ходит первый слева от кнопки.
fn start_street(table: &mut Table, engine: &mut HandEngine, street: Street) {
    for seat in table.occupied_mut() {
        seat.reset_for_street();
    }
    engine.betting = BettingState::new(street, table.config.stakes.big_blind);

    engine.current_actor = match table.dealer_button {
        Some(button) => next_to_act(table, &engine.betting, button),
        None => None,
    };
}

/// Все, кроме одного, сбросили: банк целиком ему, без вскрытия и без новых карт.
fn finish_uncontested(
    table: &mut Table,
    engine: &mut HandEngine,
    events: &mut EventQueue,
) -> Result<HandStatus, EngineError> {
    let winner = table
        .occupied()
        .find(|s| s.is_live())
        .map(|s| s.id)
        .ok_or(EngineError::Internal("не осталось живых мест"))?;

    let live: BTreeSet<SeatId> = [winner].into_iter().collect();
    let layers = engine.pot.layers(&live);
    let awards = vec![Award {
        layer: 0,
        seat: winner,
        amount: engine.pot.total(),
    }];

    end_hand(table, engine, layers, awards, &BTreeMap::new(), events)
}

/// Шоудаун: оценка рук, разбиение на слои и выплата каждого слоя.
fn finish_with_showdown(
    table: &mut Table,
    engine: &mut HandEngine,
    events: &mut EventQueue,
) -> Result<HandStatus, EngineError> {
    table.street = Street::Showdown;
    engine.current_actor = None;

    let mut hands: BTreeMap<SeatId, HandResult> = BTreeMap::new();
    let mut shown = Vec::new();
    let board = table.board.clone();
    for seat in table.occupied_mut().filter(|s| s.is_live()) {
        let hand = evaluate_best_hand(&seat.hole_cards, &board)?;
        seat.shown = true;
        shown.push(ShownHand {
            seat: seat.id,
            hole_cards: seat.hole_cards.clone(),
            hand: hand.clone(),
        });
        hands.insert(seat.id, hand);
    }
    events.push(TableEventKind::Showdown { hands: shown });

    let live: BTreeSet<SeatId> = hands.keys().copied().collect();
    let layers = engine.pot.layers(&live);

    let button = table
        .dealer_button
        .ok_or(EngineError::Internal("шоудаун без кнопки"))?;
    let odd_chip_order = order_from_button(table, button);
    let awards = distribute(&layers, &hands, &odd_chip_order);

    end_hand(table, engine, layers, awards, &hands, events)
}

/// Выплата, проверка сохранения фишек, ротация кнопки, освобождение мест.
fn end_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    layers: Vec<PotLayer>,
    awards: Vec<Award>,
    hands: &BTreeMap<SeatId, HandResult>,
    events: &mut EventQueue,
) -> Result<HandStatus, EngineError> {
    let paid: Chips = awards.iter().map(|a| a.amount).sum();
    if paid != engine.pot.total() {
        return Err(EngineError::ChipConservation {
            expected: engine.pot.total(),
            actual: paid,
        });
    }

    // Все проверки до зачисления: сбой здесь оставляет стол в состоянии до выплаты.
    if awards.iter().any(|a| table.seat(a.seat).is_none()) {
        return Err(EngineError::Internal("выплата пустому месту"));
    }
    let after = table.total_stacks() + paid;
    if after != engine.baseline {
        return Err(EngineError::ChipConservation {
            expected: engine.baseline,
            actual: after,
        });
    }

    let mut won: BTreeMap<SeatId, Chips> = BTreeMap::new();
    for award in &awards {
        if let Some(seat) = table.seat_mut(award.seat) {
            seat.stack += award.amount;
        }
        *won.entry(award.seat).or_insert(Chips::ZERO) += award.amount;
    }

    let winners: Vec<Winner> = won
        .into_iter()
        .filter_map(|(seat_id, amount)| {
            table.seat(seat_id).map(|seat| Winner {
                seat: seat_id,
                player_id: seat.player_id,
                amount,
                hand: hands.get(&seat_id).cloned(),
            })
        })
        .collect();

    // Кнопка уходит до освобождения мест: `next_dealer` смотрит только на стеки.
    let next_button = next_dealer(table);

    let mut departures = Vec::new();
    for slot in table.seats.iter_mut() {
        let gone = slot
            .as_ref()
            .map(|s| s.stack.is_zero() || s.leaving)
            .unwrap_or(false);
        if !gone {
            continue;
        }
        if let Some(seat) = slot.take() {
            departures.push(Departure {
                seat: seat.id,
                player_id: seat.player_id,
                stack: seat.stack,
            });
        }
    }
    for d in &departures {
        events.push(TableEventKind::SeatRemoved {
            seat: d.seat,
            player_id: d.player_id,
            stack: d.stack,
        });
    }

    if next_button.is_some() {
        table.dealer_button = next_button;
    }
    table.hand_in_progress = false;
    table.hands_played += 1;
    engine.current_actor = None;

    let summary = HandSummary {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
        street_reached: table.street,
        board: table.board.clone(),
        total_pot: engine.pot.total(),
        pot_layers: layers,
        winners,
        departures,
        fairness: engine.fairness.clone(),
    };

    log::info!(
        "table {} hand {}: end on {:?}, pot {}, winners {:?}",
        table.id,
        engine.hand_id,
        summary.street_reached,
        summary.total_pot,
        summary
            .winners
            .iter()
            .map(|w| (w.seat, w.amount.0))
            .collect::<Vec<_>>()
    );

    events.push(TableEventKind::HandEnded {
        hand_id: summary.hand_id,
        winners: summary.winners.clone(),
        pot_layers: summary.pot_layers.clone(),
        departures: summary.departures.clone(),
        fairness: summary.fairness.clone(),
    });

    Ok(HandStatus::Finished(summary))
}

/// Σ стеков + банк == baseline.
pub fn check_conservation(table: &Table, engine: &HandEngine) -> Result<(), EngineError> {
    let actual = table.total_stacks() + engine.pot.total();
    if actual != engine.baseline {
        return Err(EngineError::ChipConservation {
            expected: engine.baseline,
            actual,
        });
    }
    Ok(())
}
