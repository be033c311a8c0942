use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Источник случайности для тасовки.
/// Реализации лежат в infra (`SystemRng`, `DeterministicRng`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Попытка взять из колоды больше карт, чем в ней осталось.
///
/// При поддерживаемых размерах стола (2·10 + 5 ≤ 52) недостижимо,
/// поэтому движок трактует это как нарушение инварианта.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("колода исчерпана: запрошено {requested}, осталось {remaining}")]
pub struct DeckExhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// Колода карт. Верх колоды - начало вектора, карты снимаются только сверху.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Deck { cards }
    }

    /// Все 52 карты ровно по одному разу, порядок задаёт источник случайности.
    pub fn new_shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Оставшиеся карты, сверху вниз.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Снять `n` карт сверху. Частичной выдачи не бывает.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        if n > self.cards.len() {
            return Err(DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_one(&mut self) -> Result<Card, DeckExhausted> {
        if self.cards.is_empty() {
            return Err(DeckExhausted {
                requested: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }
}
