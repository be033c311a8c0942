use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маски всех стритов (5 подряд) вместе со старшей картой стрита,
/// от сильнейшего (бродвей) к слабейшему (колесо A2345, туз младший).
pub const STRAIGHTS: [(RankMask, Rank); 10] = [
    (mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]), Rank::Ace),
    (mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]), Rank::King),
    (mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]), Rank::Queen),
    (mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]), Rank::Jack),
    (mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]), Rank::Ten),
    (mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]), Rank::Nine),
    (mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]), Rank::Eight),
    (mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]), Rank::Seven),
    (mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]), Rank::Six),
    (mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]), Rank::Five),
];

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    1 << ((rank as u8) - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= rank_to_bit(ranks[i]);
        i += 1;
    }
    mask
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита; для колеса A2345 это `Rank::Five`.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHTS
        .iter()
        .find(|(mask, _)| rank_mask & mask == *mask)
        .map(|&(_, high)| high)
}
