use std::collections::HashSet;

use thiserror::Error;

use crate::domain::card::{Card, Rank};

use super::hand_rank::{HandCategory, HandResult};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Некорректный вход оценщика. Для движка это нарушение инварианта.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("оценка руки ожидает от 5 до 7 карт, получено {0}")]
    CardCount(usize),

    #[error("карта {0} встречается дважды")]
    DuplicateCard(Card),
}

/// Вычислить лучшую 5-карточную руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandResult, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate(&all_cards)
}

/// Главная функция: лучшая рука из 5–7 карт.
///
/// Перебираются все 5-карточные подмножества (для 7 карт - 21 штука),
/// побеждает максимум в полном порядке `HandResult`.
pub fn evaluate(cards: &[Card]) -> Result<HandResult, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::CardCount(n));
    }

    let mut seen = HashSet::with_capacity(n);
    for card in cards {
        if !seen.insert(*card) {
            return Err(EvalError::DuplicateCard(*card));
        }
    }

    let mut best: Option<HandResult> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_five(&five);
                        if best.as_ref().map_or(true, |best_r| r > *best_r) {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }

    // n >= 5, значит хотя бы одна комбинация была.
    best.ok_or(EvalError::CardCount(n))
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_five(cards: &[Card; 5]) -> HandResult {
    let mut rank_counts = [0u8; 15]; // индексы 2..=14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = detect_straight(rank_mask);

    // Группы (ранг, количество): сначала по количеству, затем по рангу, всё по убыванию.
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let count = rank_counts[r.value() as usize];
            (count > 0).then_some((r, count))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|&(_, c)| c).collect();
    let ranks: Vec<Rank> = groups.iter().map(|&(r, _)| r).collect();

    if let (true, Some(high)) = (is_flush, straight_high) {
        let category = if high == Rank::Ace {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };
        return HandResult::new(category, vec![high]);
    }

    match pattern.as_slice() {
        [4, 1] => return HandResult::new(HandCategory::FourOfAKind, ranks),
        [3, 2] => return HandResult::new(HandCategory::FullHouse, ranks),
        _ => {}
    }

    if is_flush {
        // Все карты разных рангов, groups уже отсортированы по убыванию.
        return HandResult::new(HandCategory::Flush, ranks);
    }

    if let Some(high) = straight_high {
        return HandResult::new(HandCategory::Straight, vec![high]);
    }

    let category = match pattern.as_slice() {
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandResult::new(category, ranks)
}
