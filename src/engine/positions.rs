use crate::domain::{Seat, SeatId, Table};

/// Места по часовой стрелке, начиная с `start` (включая его, если занято).
pub fn seats_clockwise_from(table: &Table, start: SeatId) -> Vec<SeatId> {
    let max = table.seats.len();
    if max == 0 {
        return Vec::new();
    }

    (0..max)
        .map(|i| ((start as usize + i) % max) as SeatId)
        .filter(|&idx| table.seat(idx).is_some())
        .collect()
}

/// Первое место строго после `from` по часовой стрелке, удовлетворяющее `pred`.
/// Само `from` проверяется последним (полный круг).
pub fn next_seat_where(
    table: &Table,
    from: SeatId,
    pred: impl Fn(&Seat) -> bool,
) -> Option<SeatId> {
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    (1..=max)
        .map(|i| ((from as usize + i) % max) as SeatId)
        .find(|&idx| table.seat(idx).map(&pred).unwrap_or(false))
}

/// Места в порядке выплаты нечётных фишек: с первого места слева от кнопки.
pub fn order_from_button(table: &Table, button: SeatId) -> Vec<SeatId> {
    let max = table.seats.len();
    if max == 0 {
        return Vec::new();
    }
    seats_clockwise_from(table, ((button as usize + 1) % max) as SeatId)
}

/// Кнопка для новой раздачи: текущая, если на ней сидит игрок с фишками,
/// иначе следующее такое место. Если раздач не было – первое с фишками от нуля.
pub fn button_for_new_hand(table: &Table) -> Option<SeatId> {
    let funded = |s: &Seat| s.in_hand;
    match table.dealer_button {
        Some(button) if table.seat(button).map(funded).unwrap_or(false) => Some(button),
        Some(button) => next_seat_where(table, button, funded),
        None => {
            let last = table.seats.len().checked_sub(1)? as SeatId;
            next_seat_where(table, last, funded)
        }
    }
}

/// Следующая позиция кнопки после раздачи: ближайшее место с фишками.
pub fn next_dealer(table: &Table) -> Option<SeatId> {
    let funded = |s: &Seat| !s.stack.is_zero() && !s.leaving;
    let button = table.dealer_button?;
    next_seat_where(table, button, funded)
}
