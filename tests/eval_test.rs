//! Тесты оценщика рук: полный порядок категорий, колесо, кикеры, сплиты.

mod common;

use common::cards;
use holdem_table::domain::Rank;
use holdem_table::eval::{evaluate, evaluate_best_hand, EvalError, HandCategory, HandResult};

fn eval(s: &str) -> HandResult {
    evaluate(&cards(s)).expect("корректная рука")
}

/// Представители категорий от сильной к слабой: каждая бьёт все следующие.
#[test]
fn categories_are_totally_ordered() {
    let ladder = [
        ("As Ks Qs Js Ts", HandCategory::RoyalFlush),
        ("9h 8h 7h 6h 5h", HandCategory::StraightFlush),
        ("Qc Qd Qh Qs 2c", HandCategory::FourOfAKind),
        ("Jc Jd Jh 4s 4c", HandCategory::FullHouse),
        ("Kd 9d 7d 4d 2d", HandCategory::Flush),
        ("Tc 9d 8h 7s 6c", HandCategory::Straight),
        ("8c 8d 8h Ks 3c", HandCategory::ThreeOfAKind),
        ("Ac Ad 5h 5s 9c", HandCategory::TwoPair),
        ("Kc Kd 9h 7s 2c", HandCategory::OnePair),
        ("Ac Jd 9h 6s 3c", HandCategory::HighCard),
    ];

    let hands: Vec<HandResult> = ladder
        .iter()
        .map(|(s, category)| {
            let h = eval(s);
            assert_eq!(h.category, *category, "рука {s}");
            h
        })
        .collect();

    for i in 0..hands.len() {
        for j in (i + 1)..hands.len() {
            assert!(
                hands[i] > hands[j],
                "{:?} должна бить {:?}",
                hands[i].category,
                hands[j].category
            );
            assert!(hands[i].packed() > hands[j].packed());
        }
    }
}

/// A-2-3-4-5 разных мастей – стрит до пятёрки, а не старшая карта туз.
#[test]
fn wheel_is_a_five_high_straight() {
    let wheel = eval("Ac 2d 3h 4s 5c");
    assert_eq!(wheel.category, HandCategory::Straight);
    assert_eq!(wheel.kickers, vec![Rank::Five]);
    assert_eq!(wheel.describe(), "Straight, Five high");

    let six_high = eval("2d 3h 4s 5c 6d");
    assert!(six_high > wheel, "стрит до шестёрки бьёт колесо");

    let ace_high = eval("Ac Kd 9h 6s 3c");
    assert!(wheel > ace_high);
}

/// Колесо в одну масть – стрит-флеш, но не роял.
#[test]
fn steel_wheel_is_straight_flush() {
    let h = eval("Ah 2h 3h 4h 5h");
    assert_eq!(h.category, HandCategory::StraightFlush);
    assert_eq!(h.kickers, vec![Rank::Five]);
}

/// Два флеша сравниваются по убыванию карт.
#[test]
fn flush_kickers_break_ties() {
    let higher = eval("Ah Jh 9h 6h 3h");
    let lower = eval("As Js 9s 6s 2s");
    assert!(higher > lower);

    let king_high = eval("Kd Qd Jd 9d 7d");
    assert!(higher > king_high);
}

/// Кикеры пар, двух пар, тройки и каре.
#[test]
fn kicker_tie_breaks_within_category() {
    assert!(eval("Kc Kd Ah 7s 2c") > eval("Kh Ks Qh 7d 2d"));
    assert!(eval("Ac Ad 5h 5s Kc") > eval("Ah As 5c 5d Qc"));
    assert!(eval("Ac Ad 6h 6s 2c") > eval("Ah As 5c 5d Kc"));
    assert!(eval("9c 9d 9h As 2c") > eval("9c 9d 9h Ks Qc"));
    assert!(eval("7c 7d 7h 7s Ac") > eval("7c 7d 7h 7s Kc"));
    assert!(eval("Tc Td Th 2s 2c") > eval("9c 9d 9h As Ac"));

    let two_pair = eval("Ac Ad 5h 5s 9c");
    assert_eq!(two_pair.kickers, vec![Rank::Ace, Rank::Five, Rank::Nine]);
}

/// Из 7 карт выбирается лучшая пятёрка.
#[test]
fn seven_cards_pick_best_five() {
    let h = evaluate_best_hand(&cards("Ah Kh"), &cards("Qh Jh Th 2c 3d")).unwrap();
    assert_eq!(h.category, HandCategory::RoyalFlush);
    assert_eq!(h.describe(), "Royal flush");

    // Фулл-хаус из двух троек: лучшая тройка + пара из второй.
    let h = evaluate(&cards("9c 9d 9h 4s 4c 4d Ac")).unwrap();
    assert_eq!(h.category, HandCategory::FullHouse);
    assert_eq!(h.kickers, vec![Rank::Nine, Rank::Four]);

    // Флеш из 6 карт масти: берутся 5 старших.
    let h = evaluate(&cards("Ac Qc 9c 7c 4c 2c Kd")).unwrap();
    assert_eq!(h.category, HandCategory::Flush);
    assert_eq!(
        h.kickers,
        vec![Rank::Ace, Rank::Queen, Rank::Nine, Rank::Seven, Rank::Four]
    );
}

/// Одинаковая лучшая пятёрка на борде – настоящий сплит.
#[test]
fn board_plays_is_exact_tie() {
    let board = cards("Ts Js Qd Kc Ah");
    let a = evaluate_best_hand(&cards("2c 3d"), &board).unwrap();
    let b = evaluate_best_hand(&cards("4h 5h"), &board).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.category, HandCategory::Straight);
}

/// Пары: AA бьёт KK на сухом борде.
#[test]
fn aces_beat_kings_on_dry_board() {
    let board = cards("2c 7d 9s Jc 3h");
    let aces = evaluate_best_hand(&cards("As Ac"), &board).unwrap();
    let kings = evaluate_best_hand(&cards("Kd Kh"), &board).unwrap();

    assert_eq!(aces.category, HandCategory::OnePair);
    assert_eq!(aces.describe(), "Pair of Aces");
    assert_eq!(kings.describe(), "Pair of Kings");
    assert!(aces > kings);
}

/// Некорректный вход: мало/много карт, дубликаты.
#[test]
fn invalid_input_is_rejected() {
    assert_eq!(evaluate(&cards("As Ks Qs Js")), Err(EvalError::CardCount(4)));
    assert_eq!(
        evaluate(&cards("As Ks Qs Js Ts 9s 8s 7s")),
        Err(EvalError::CardCount(8))
    );

    let dup = cards("As")[0];
    assert_eq!(
        evaluate(&cards("As Ks Qs Js As")),
        Err(EvalError::DuplicateCard(dup))
    );
}

/// Описание рук для логов/событий.
#[test]
fn describe_hands() {
    assert_eq!(eval("Jc Jd Jh 4s 4c").describe(), "Full house, Jacks full of Fours");
    assert_eq!(eval("Qc Qd Qh Qs 2c").describe(), "Four of a kind, Queens");
    assert_eq!(eval("Ac Ad 5h 5s 9c").describe(), "Two pair, Aces and Fives");
    assert_eq!(eval("Ac Jd 9h 6s 3c").describe(), "High card Ace");
    assert_eq!(eval("Kd 9d 7d 4d 2d").describe(), "Flush, King high");
}
