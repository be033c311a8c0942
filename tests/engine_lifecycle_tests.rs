//! Жизненный цикл стола: посадка, блайнды, кнопка, полные раздачи,
//! выбывание, уход посреди раздачи и сохранение фишек на случайной игре.

mod common;

use common::{cards, stacks, table_with_blinds, table_with_stacks, StackedRng};
use holdem_table::domain::{Chips, Street, TableConfig};
use holdem_table::engine::{
    EngineError, HandStatus, LegalActions, PlayerActionKind, PokerTable, SeatRemoval, TableEvent,
    TableEventKind, TablePhase,
};
use holdem_table::infra::DeterministicRng;
use rand::Rng;

use PlayerActionKind::*;

fn started(events: &[TableEvent]) -> Vec<&TableEventKind> {
    events
        .iter()
        .map(|e| &e.kind)
        .filter(|k| matches!(k, TableEventKind::HandStarted { .. }))
        .collect()
}

fn streets(events: &[TableEvent]) -> Vec<Street> {
    events
        .iter()
        .filter_map(|e| match &e.kind {
            TableEventKind::StreetAdvanced { street, .. } => Some(*street),
            _ => None,
        })
        .collect()
}

//
// ====================== ПРЕДУСЛОВИЯ ======================
//

#[test]
fn seating_preconditions() {
    assert!(matches!(
        PokerTable::new(1, TableConfig::ring(1, Chips(50), Chips(100))),
        Err(EngineError::InvalidConfig(_))
    ));

    let mut table = PokerTable::new(1, TableConfig::ring(2, Chips(50), Chips(100))).unwrap();
    assert_eq!(
        table.add_seat(1, Chips(500)),
        Err(EngineError::InvalidBuyIn {
            amount: Chips(500),
            min: Chips(2_000),
            max: Chips(20_000)
        })
    );

    assert_eq!(table.add_seat(1, Chips(5_000)), Ok(0));
    assert_eq!(
        table.add_seat(1, Chips(5_000)),
        Err(EngineError::PlayerAlreadySeated(1))
    );
    assert_eq!(
        table.start_hand_with(&mut DeterministicRng::from_u64(1)),
        Err(EngineError::NotEnoughPlayers)
    );

    assert_eq!(table.add_seat(2, Chips(5_000)), Ok(1));
    assert_eq!(table.add_seat(3, Chips(5_000)), Err(EngineError::TableFull));

    table
        .start_hand_with(&mut DeterministicRng::from_u64(1))
        .unwrap();
    assert_eq!(table.phase(), TablePhase::InHand);
    assert_eq!(
        table.start_hand_with(&mut DeterministicRng::from_u64(2)),
        Err(EngineError::TableInHand)
    );
    assert_eq!(table.add_seat(3, Chips(5_000)), Err(EngineError::TableInHand));
    assert!(!table.is_faulted());
}

//
// ====================== БЛАЙНДЫ И КНОПКА ======================
//

/// Хедз-ап: кнопка ставит SB и ходит первой префлоп, BB – первым после флопа.
#[test]
fn heads_up_button_posts_small_blind() {
    let mut table = table_with_stacks(&[1000, 1000]);
    table
        .start_hand_with(&mut DeterministicRng::from_u64(4))
        .unwrap();

    let events = table.drain_events();
    match started(&events).as_slice() {
        [TableEventKind::HandStarted {
            hand_id,
            button,
            small_blind,
            big_blind,
            commitment,
            ..
        }] => {
            assert_eq!(*hand_id, 1);
            assert_eq!(*button, 0);
            assert_eq!(*small_blind, (0, Chips(50)));
            assert_eq!(*big_blind, (1, Chips(100)));
            assert!(commitment.is_none());
        }
        other => panic!("ожидался один HandStarted, получено {other:?}"),
    }

    assert_eq!(table.current_actor(), Some(0));
    table.process_action(0, Call).unwrap();
    table.process_action(1, Check).unwrap();
    assert_eq!(table.current_actor(), Some(1));
}

/// Кнопка сдвигается на следующее место с фишками, блайнды – за ней.
#[test]
fn button_rotates_between_hands() {
    let mut table = table_with_stacks(&[1000, 1000, 1000]);
    table
        .start_hand_with(&mut DeterministicRng::from_u64(1))
        .unwrap();

    // 3-max: кнопка 0, SB 1, BB 2, первым ходит кнопка.
    assert_eq!(table.current_actor(), Some(0));
    table.process_action(0, Fold).unwrap();
    let status = table.process_action(1, Fold).unwrap();
    assert!(status.is_finished());
    assert_eq!(table.table().dealer_button, Some(1));

    table.drain_events();
    table
        .start_hand_with(&mut DeterministicRng::from_u64(2))
        .unwrap();
    let events = table.drain_events();
    match started(&events).as_slice() {
        [TableEventKind::HandStarted {
            hand_id,
            button,
            small_blind,
            big_blind,
            ..
        }] => {
            assert_eq!(*hand_id, 2);
            assert_eq!(*button, 1);
            assert_eq!(small_blind.0, 2);
            assert_eq!(big_blind.0, 0);
        }
        other => panic!("ожидался один HandStarted, получено {other:?}"),
    }
    assert_eq!(table.current_actor(), Some(1));
}

//
// ====================== ПОЛНЫЕ РАЗДАЧИ ======================
//

/// Хедз-ап до шоудауна: AA против KK, чеки до ривера.
#[test]
fn heads_up_showdown_end_to_end() {
    let mut table = table_with_stacks(&[1000, 1000]);
    // Раздача начинается слева от кнопки: 1, 0, 1, 0.
    table
        .start_hand_with(&mut StackedRng::from_str("Kd As Kh Ac 2c 7d 9s Jc 3h"))
        .unwrap();

    // Свои карты видны владельцу, чужие – нет.
    let view = table.get_state(Some(0));
    assert_eq!(view.seat(0).unwrap().hole_cards, Some(cards("As Ac")));
    assert_eq!(view.seat(1).unwrap().hole_cards, None);
    let public = table.get_state(None);
    assert!(public.seats.iter().all(|s| s.hole_cards.is_none()));

    table.process_action(0, Call).unwrap();
    table.process_action(1, Check).unwrap();
    assert_eq!(table.get_state(None).board, cards("2c 7d 9s"));

    let mut status = HandStatus::Ongoing;
    for _ in 0..3 {
        table.process_action(1, Check).unwrap();
        status = table.process_action(0, Check).unwrap();
    }

    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна закончиться шоудауном");
    };
    assert_eq!(summary.street_reached, Street::Showdown);
    assert_eq!(summary.board, cards("2c 7d 9s Jc 3h"));
    assert_eq!(summary.total_pot, Chips(200));
    assert_eq!(summary.winners.len(), 1);
    let winner = &summary.winners[0];
    assert_eq!(winner.seat, 0);
    assert_eq!(winner.player_id, 1);
    assert_eq!(winner.amount, Chips(200));
    assert_eq!(
        winner.hand.as_ref().map(|h| h.describe()),
        Some("Pair of Aces".to_string())
    );

    assert_eq!(stacks(&table), vec![Some(1100), Some(900)]);
    assert_eq!(table.table().dealer_button, Some(1));
    assert_eq!(table.phase(), TablePhase::Idle);

    // После шоудауна вскрытые карты видны всем.
    let public = table.get_state(None);
    assert_eq!(public.seat(1).unwrap().hole_cards, Some(cards("Kd Kh")));

    let events = table.drain_events();
    assert_eq!(
        streets(&events),
        vec![Street::Flop, Street::Turn, Street::River]
    );
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, TableEventKind::Showdown { .. })));
    assert!(matches!(
        events.last().map(|e| &e.kind),
        Some(TableEventKind::HandEnded { hand_id: 1, .. })
    ));
    assert!(events.windows(2).all(|w| w[1].index == w[0].index + 1));
}

/// Все сфолдили до BB: банк без вскрытия, борд не открывается.
#[test]
fn uncontested_preflop_win() {
    let mut table = table_with_stacks(&[1000, 1000, 1000]);
    table
        .start_hand_with(&mut DeterministicRng::from_u64(8))
        .unwrap();

    table.process_action(0, Fold).unwrap();
    let status = table.process_action(1, Fold).unwrap();
    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна закончиться");
    };

    assert_eq!(summary.street_reached, Street::Preflop);
    assert!(summary.board.is_empty());
    assert_eq!(summary.total_pot, Chips(150));
    assert_eq!(summary.amount_won(2), Chips(150));
    assert_eq!(summary.winners[0].hand, None);
    assert_eq!(stacks(&table), vec![Some(1000), Some(950), Some(1050)]);

    let events = table.drain_events();
    assert!(streets(&events).is_empty());
    assert!(!events
        .iter()
        .any(|e| matches!(e.kind, TableEventKind::Showdown { .. })));
}

/// Фолд на флопе: борд остаётся из трёх карт.
#[test]
fn fold_on_flop_ends_hand() {
    let mut table = table_with_stacks(&[1000, 1000]);
    table
        .start_hand_with(&mut DeterministicRng::from_u64(21))
        .unwrap();

    table.process_action(0, Call).unwrap();
    table.process_action(1, Check).unwrap();
    table.process_action(1, Bet(Chips(100))).unwrap();
    let status = table.process_action(0, Fold).unwrap();

    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна закончиться");
    };
    assert_eq!(summary.street_reached, Street::Flop);
    assert_eq!(summary.board.len(), 3);
    assert_eq!(summary.total_pot, Chips(300));
    assert_eq!(summary.amount_won(1), Chips(300));
    assert_eq!(stacks(&table), vec![Some(900), Some(1100)]);
}

/// Короткий стек уходит в all-in на блайнде: раздача доигрывается сразу.
#[test]
fn all_in_on_blind_plays_out_immediately() {
    let mut table = table_with_stacks(&[30, 1000]);
    let status = table
        .start_hand_with(&mut StackedRng::from_str("Kd As Kh Ac 2c 7d 9s Jc 3h"))
        .unwrap();

    let HandStatus::Finished(summary) = status else {
        panic!("торговаться некому – раздача должна закончиться на старте");
    };
    // Основной банк 60 (по 30), остаток BB 70 возвращается ему же.
    assert_eq!(summary.pot_layers.len(), 2);
    assert_eq!(summary.amount_won(0), Chips(60));
    assert_eq!(summary.amount_won(1), Chips(70));
    assert_eq!(stacks(&table), vec![Some(60), Some(970)]);
    assert!(table.hand().is_none());
}

/// Проигравший весь стек освобождает место; дальше играть некому.
#[test]
fn busted_player_is_removed() {
    let mut table = table_with_stacks(&[100, 1000]);
    table
        .start_hand_with(&mut StackedRng::from_str("As Kd Ac Kh 2c 7d 9s Jc 3h"))
        .unwrap();
    table.drain_events();

    // SB 50 + 50 all-in – это call, а не рейз; торговля закрыта.
    let status = table.process_action(0, AllIn).unwrap();
    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна доиграться автоматически");
    };

    let events = table.drain_events();
    assert_eq!(streets(&events).len(), 3);
    assert_eq!(summary.amount_won(1), Chips(200));
    assert_eq!(summary.departures.len(), 1);
    assert_eq!(summary.departures[0].player_id, 1);
    assert_eq!(summary.departures[0].stack, Chips::ZERO);
    assert!(events.iter().any(|e| matches!(
        e.kind,
        TableEventKind::SeatRemoved {
            seat: 0,
            stack: Chips(0),
            ..
        }
    )));

    assert_eq!(stacks(&table), vec![None, Some(1100)]);
    assert_eq!(
        table.start_hand_with(&mut DeterministicRng::from_u64(1)),
        Err(EngineError::NotEnoughPlayers)
    );
}

//
// ====================== УХОД ПОСРЕДИ РАЗДАЧИ ======================
//

/// Держащий ход встать не может; остальные выбывают и уходят в конце раздачи.
#[test]
fn leaving_mid_hand_folds_and_departs_at_end() {
    let mut table = table_with_stacks(&[1000, 1000, 1000]);
    table
        .start_hand_with(&mut DeterministicRng::from_u64(5))
        .unwrap();

    assert_eq!(table.remove_seat(0), Err(EngineError::SeatHoldsAction(0)));

    let removal = table.remove_seat(1).unwrap();
    assert_eq!(
        removal,
        SeatRemoval::AtHandEnd {
            player_id: 2,
            status: HandStatus::Ongoing
        }
    );
    let view = table.get_state(None);
    let leaving = view.seat(1).unwrap();
    assert!(leaving.folded);
    assert!(leaving.leaving);
    assert_eq!(leaving.stack, Chips(950));

    let status = table.process_action(0, Fold).unwrap();
    let HandStatus::Finished(summary) = status else {
        panic!("остался один игрок");
    };
    assert_eq!(summary.amount_won(2), Chips(150));
    assert_eq!(summary.departures.len(), 1);
    assert_eq!(summary.departures[0].seat, 1);
    assert_eq!(summary.departures[0].stack, Chips(950));

    assert_eq!(stacks(&table), vec![Some(1000), None, Some(1050)]);
}

/// Игрок в all-in может встать, но продолжает претендовать на банк.
#[test]
fn all_in_player_leaving_keeps_claim() {
    let mut table = table_with_stacks(&[1000, 300, 1000]);
    table
        .start_hand_with(&mut StackedRng::from_str("As Kd Qd Ac Kh Qh 2c 7d 9s Jc 3h"))
        .unwrap();

    table.process_action(0, Call).unwrap();
    table.process_action(1, AllIn).unwrap();
    table.process_action(2, Call).unwrap();

    let removal = table.remove_seat(1).unwrap();
    assert!(matches!(
        removal,
        SeatRemoval::AtHandEnd {
            status: HandStatus::Ongoing,
            ..
        }
    ));
    assert!(!table.get_state(None).seat(1).unwrap().folded);

    table.process_action(0, Call).unwrap();
    let mut status = HandStatus::Ongoing;
    for _ in 0..3 {
        table.process_action(2, Check).unwrap();
        status = table.process_action(0, Check).unwrap();
    }

    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна закончиться");
    };
    assert_eq!(summary.amount_won(1), Chips(900));
    assert_eq!(summary.departures.len(), 1);
    assert_eq!(summary.departures[0].stack, Chips(900));
    assert_eq!(stacks(&table), vec![Some(700), None, Some(700)]);
}

//
// ====================== СОХРАНЕНИЕ ФИШЕК ======================
//

fn random_action(legal: &LegalActions, facing_bet: bool, rng: &mut impl Rng) -> PlayerActionKind {
    let mut options = vec![Fold];
    if legal.can_check {
        options.push(Check);
    }
    if legal.call_amount.is_some() {
        options.push(Call);
        options.push(Call);
    }
    if let Some((min, max)) = legal.raise_range {
        let to = Chips(rng.gen_range(min.0..=max.0));
        options.push(if facing_bet { Raise(to) } else { Bet(to) });
    }
    if legal.can_all_in {
        options.push(AllIn);
    }
    options[rng.gen_range(0..options.len())]
}

/// Случайные легальные действия: сумма фишек на столе не меняется никогда.
#[test]
fn random_play_conserves_chips() {
    let mut bots = DeterministicRng::from_u64(0xC415);

    for seed in 0..25u64 {
        let players = 2 + (seed as usize % 5);
        let initial: Vec<u64> = (0..players).map(|i| 200 + 150 * i as u64).collect();
        let mut table = table_with_blinds(&initial, 5, 10);
        let total = table.total_chips();

        for hand in 0..40u64 {
            if table.table().funded_count() < 2 {
                break;
            }
            let mut status = table
                .start_hand_with(&mut DeterministicRng::from_u64(seed * 1000 + hand))
                .unwrap();
            assert_eq!(table.total_chips(), total);

            let mut steps = 0;
            while status == HandStatus::Ongoing {
                let seat = table.current_actor().expect("ход должен быть назначен");
                let legal = table.legal_actions(seat).unwrap();
                let facing_bet = table
                    .hand()
                    .map(|h| !h.betting.current_bet.is_zero())
                    .unwrap_or(false);
                let kind = random_action(&legal, facing_bet, bots.inner_mut());

                status = table
                    .process_action(seat, kind)
                    .unwrap_or_else(|e| panic!("легальное {kind:?} отклонено: {e}"));
                assert_eq!(table.total_chips(), total, "seed {seed}, hand {hand}");

                steps += 1;
                assert!(steps < 500, "раздача не сходится");
            }
            assert!(!table.is_faulted());
        }

        assert_eq!(table.table().total_stacks(), total);
    }
}
