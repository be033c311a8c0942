use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatId;
use crate::eval::HandResult;

/// Слой банка: основной банк или сайд-пот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotLayer {
    pub amount: Chips,
    /// Кто может выиграть этот слой (не сфолдившие, внёсшие не меньше порога).
    pub eligible: Vec<SeatId>,
}

/// Выплата одного слоя одному месту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Award {
    pub layer: usize,
    pub seat: SeatId,
    pub amount: Chips,
}

/// Банк раздачи: сколько внесло каждое место за всю раздачу.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    contributions: BTreeMap<SeatId, Chips>,
    total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, seat: SeatId, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        self.total += amount;
        *self.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
    }

    pub fn total(&self) -> Chips {
        self.total
    }

    pub fn contribution(&self, seat: SeatId) -> Chips {
        self.contributions.get(&seat).copied().unwrap_or(Chips::ZERO)
    }

    pub fn contributions(&self) -> &BTreeMap<SeatId, Chips> {
        &self.contributions
    }

    /// Разложить банк на слои для живых (не сфолдивших) мест.
    pub fn layers(&self, live: &BTreeSet<SeatId>) -> Vec<PotLayer> {
        compute_pot_layers(&self.contributions, live)
    }
}

/// Посчитать слои банка из сумм, которые внесли места.
///
/// Пороги – различные вклады живых мест по возрастанию. Живые места не в all-in
/// уравняли максимальную ставку, поэтому все пороги ниже максимума – это all-in уровни,
/// а верхний слой – всё, что сверху последнего all-in.
/// Слой (prev, t] собирает `min(c, t) - min(c, prev)` с каждого вклада, включая
/// сфолдившие. Фишки сфолдивших выше максимального живого вклада уходят в верхний слой.
pub fn compute_pot_layers(
    contributions: &BTreeMap<SeatId, Chips>,
    live: &BTreeSet<SeatId>,
) -> Vec<PotLayer> {
    let contribution = |seat: &SeatId| contributions.get(seat).copied().unwrap_or(Chips::ZERO);

    let thresholds: BTreeSet<Chips> = live
        .iter()
        .map(contribution)
        .filter(|c| !c.is_zero())
        .collect();

    let mut layers: Vec<PotLayer> = Vec::new();
    let mut prev = Chips::ZERO;

    for &threshold in &thresholds {
        let amount: Chips = contributions
            .values()
            .map(|&c| c.min(threshold).saturating_sub(c.min(prev)))
            .sum();

        let eligible: Vec<SeatId> = live
            .iter()
            .copied()
            .filter(|seat| contribution(seat) >= threshold)
            .collect();

        if !amount.is_zero() {
            layers.push(PotLayer { amount, eligible });
        }
        prev = threshold;
    }

    let leftover: Chips = contributions.values().map(|&c| c.saturating_sub(prev)).sum();
    if !leftover.is_zero() {
        match layers.last_mut() {
            Some(top) => top.amount += leftover,
            None => layers.push(PotLayer {
                amount: leftover,
                eligible: live.iter().copied().collect(),
            }),
        }
    }

    layers
}

/// Раздать слои лучшим рукам.
///
/// Каждый слой делится независимо между лучшими руками среди допущенных к нему.
/// Неделимый остаток раздаётся по одной фишке победителям в порядке `odd_chip_order`
/// (первое место слева от кнопки и дальше по часовой).
pub fn distribute(
    layers: &[PotLayer],
    hands: &BTreeMap<SeatId, HandResult>,
    odd_chip_order: &[SeatId],
) -> Vec<Award> {
    let mut awards = Vec::new();

    for (idx, layer) in layers.iter().enumerate() {
        let best = layer
            .eligible
            .iter()
            .filter_map(|seat| hands.get(seat))
            .max();

        let Some(best) = best else {
            continue;
        };

        let mut winners: Vec<SeatId> = layer
            .eligible
            .iter()
            .copied()
            .filter(|seat| hands.get(seat) == Some(best))
            .collect();

        // Порядок от кнопки, чтобы остаток был детерминированным.
        winners.sort_by_key(|seat| {
            odd_chip_order
                .iter()
                .position(|s| s == seat)
                .unwrap_or(usize::MAX)
        });

        let (share, remainder) = layer.amount.split(winners.len());
        for (i, &seat) in winners.iter().enumerate() {
            let extra = if (i as u64) < remainder.0 { Chips(1) } else { Chips::ZERO };
            let amount = share + extra;
            if !amount.is_zero() {
                awards.push(Award {
                    layer: idx,
                    seat,
                    amount,
                });
            }
        }
    }

    awards
}
