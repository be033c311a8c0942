//! Общие помощники для интеграционных тестов.

#![allow(dead_code)]

use holdem_table::domain::{Card, Chips, Deck, TableConfig};
use holdem_table::engine::{PokerTable, RandomSource};

/// RNG, который кладёт заданные карты наверх колоды (в этом порядке),
/// остальные идут следом в стандартном порядке.
///
/// Работает перестановкой: `Deck::new_shuffled` перемешивает стандартную колоду,
/// поэтому достаточно знать индексы нужных карт в `Deck::standard_52()`.
pub struct StackedRng {
    order: Vec<usize>,
}

impl StackedRng {
    pub fn new(top: &[Card]) -> Self {
        let standard = Deck::standard_52();
        let mut order: Vec<usize> = top
            .iter()
            .map(|c| {
                standard
                    .cards()
                    .iter()
                    .position(|x| x == c)
                    .expect("карта должна быть в колоде")
            })
            .collect();
        for idx in 0..standard.len() {
            if !order.contains(&idx) {
                order.push(idx);
            }
        }
        Self { order }
    }

    /// `"Kd As Kh Ac ..."` – карты сверху вниз.
    pub fn from_str(top: &str) -> Self {
        Self::new(&cards(top))
    }
}

impl RandomSource for StackedRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        let n = slice.len();
        // current[i] – исходный индекс элемента на позиции i; pos – обратное отображение.
        let mut current: Vec<usize> = (0..n).collect();
        let mut pos: Vec<usize> = (0..n).collect();

        for i in 0..n.min(self.order.len()) {
            let target = self.order[i];
            let p = pos[target];
            slice.swap(i, p);

            let displaced = current[i];
            current.swap(i, p);
            pos[target] = i;
            pos[displaced] = p;
        }
    }
}

pub fn cards(s: &str) -> Vec<Card> {
    Card::parse_many(s).expect("корректная строка карт")
}

/// Стол с блайндами 50/100 и без лимитов бай-ина; игроки садятся по порядку
/// на места 0, 1, 2, ... с player_id = 1, 2, 3, ...
pub fn table_with_stacks(stacks: &[u64]) -> PokerTable {
    table_with_blinds(stacks, 50, 100)
}

pub fn table_with_blinds(stacks: &[u64], sb: u64, bb: u64) -> PokerTable {
    let max_seats = stacks.len().max(2) as u8;
    let config = TableConfig::ring(max_seats, Chips(sb), Chips(bb)).with_any_buy_in();
    let mut table = PokerTable::new(1, config).expect("корректный конфиг");
    for (i, &stack) in stacks.iter().enumerate() {
        table
            .add_seat(i as u64 + 1, Chips(stack))
            .expect("место должно найтись");
    }
    table
}

/// Стек места.
pub fn stack(table: &PokerTable, seat: u8) -> u64 {
    table.table().seat(seat).map(|s| s.stack.0).unwrap_or(0)
}

/// Стеки всех мест по порядку (пустые места – None).
pub fn stacks(table: &PokerTable) -> Vec<Option<u64>> {
    table
        .table()
        .seats
        .iter()
        .map(|s| s.as_ref().map(|s| s.stack.0))
        .collect()
}
