use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе (0 = старшая карта, 9 = роял-флеш).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::RoyalFlush => "Royal flush",
        }
    }
}

/// Результат оценки руки: категория + кикеры в порядке сравнения.
///
/// Порядок полный: сначала категория, затем кикеры лексикографически
/// (derive сравнивает поля в порядке объявления). Равенство = настоящий сплит.
///
/// Кикеры по категориям:
///   - каре: [ранг каре, кикер]
///   - фулл-хаус: [ранг тройки, ранг пары]
///   - две пары: [старшая пара, младшая пара, кикер]
///   - стрит / стрит-флеш: [старшая карта] (для колеса A2345 это пятёрка)
///   - флеш / старшая карта: 5 рангов по убыванию
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandResult {
    pub category: HandCategory,
    pub kickers: Vec<Rank>,
}

impl HandResult {
    pub fn new(category: HandCategory, kickers: Vec<Rank>) -> Self {
        Self { category, kickers }
    }

    /// Упаковка в u32 для компактных логов/событий:
    ///   [категория:4 бита][k0:4][k1:4][k2:4][k3:4][k4:4]
    /// Сохраняет порядок: a > b ⇔ a.packed() > b.packed().
    pub fn packed(&self) -> u32 {
        let mut value = (self.category.value() as u32) & 0x0F;
        for i in 0..5 {
            let nibble = self.kickers.get(i).map(|r| r.value() as u32).unwrap_or(0);
            value = (value << 4) | (nibble & 0x0F);
        }
        value
    }

    /// Человеческое описание: "Pair of Aces", "Straight, Five high" и т.п.
    pub fn describe(&self) -> String {
        let k = |i: usize| self.kickers.get(i).copied();
        match (self.category, k(0), k(1)) {
            (HandCategory::RoyalFlush, _, _) => "Royal flush".to_string(),
            (HandCategory::StraightFlush, Some(h), _) => format!("Straight flush, {} high", h.name()),
            (HandCategory::FourOfAKind, Some(q), _) => format!("Four of a kind, {}", q.plural_name()),
            (HandCategory::FullHouse, Some(t), Some(p)) => {
                format!("Full house, {} full of {}", t.plural_name(), p.plural_name())
            }
            (HandCategory::Flush, Some(h), _) => format!("Flush, {} high", h.name()),
            (HandCategory::Straight, Some(h), _) => format!("Straight, {} high", h.name()),
            (HandCategory::ThreeOfAKind, Some(t), _) => format!("Three of a kind, {}", t.plural_name()),
            (HandCategory::TwoPair, Some(a), Some(b)) => {
                format!("Two pair, {} and {}", a.plural_name(), b.plural_name())
            }
            (HandCategory::OnePair, Some(p), _) => format!("Pair of {}", p.plural_name()),
            (HandCategory::HighCard, Some(h), _) => format!("High card {}", h.name()),
            (category, _, _) => category.name().to_string(),
        }
    }
}
