//! Поиск одиночных мест, которые бронь оставит без соседей.
//!
//! От каждой недоступной позиции идём влево, пропускаем примыкающие
//! недоступные места, затем считаем свободные позиции, но не дальше двух шагов.
//! Ровно одно свободное место между недоступными (или между недоступным и краем
//! ряда) никто уже не купит парой: это нарушение. Ноль или два и больше - норма.
//! Затем то же самое вправо.

use std::str::FromStr;

use crate::error::{ConfigError, SeatRuleError};

use super::mapping::{MappedRow, MappedRowSeat};

/// Сколько позиций просматриваем после первого свободного места.
const FREE_SPACE_BUDGET: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Проверка от каждой недоступной позиции
    #[default]
    EveryIndex,
    /// Проверка только от первой позиции каждого недоступного отрезка.
    /// Результат и виновное место те же, что у `EveryIndex`.
    RunStarts,
}

impl FromStr for ScanStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "every_index" => Ok(ScanStrategy::EveryIndex),
            "run_starts" => Ok(ScanStrategy::RunStarts),
            other => Err(ConfigError::Invalid {
                name: "RULES_SCAN_STRATEGY",
                expected: "scan strategy (every_index | run_starts)",
                value: other.to_string(),
            }),
        }
    }
}

/// Проверяет разложенный ряд; возвращает первое найденное нарушение.
pub fn check_mapped_row(row: &MappedRow<'_>, strategy: ScanStrategy) -> Result<(), SeatRuleError> {
    let seats = row.seats();
    for i in 0..seats.len() {
        if seats[i].is_available() {
            continue;
        }
        if strategy == ScanStrategy::RunStarts && i > 0 && !seats[i - 1].is_available() {
            continue;
        }
        check_position(seats, i)?;
    }
    Ok(())
}

fn check_position(seats: &[MappedRowSeat<'_>], i: usize) -> Result<(), SeatRuleError> {
    if leaves_lone_seat(seats, (0..i).rev()) {
        // виновник: первая пара подряд запрошенных мест при движении влево
        let culprit = (1..=i)
            .rev()
            .find(|&k| seats[k].is_requested() && seats[k - 1].is_requested());
        return Err(fragmentation(seats, culprit));
    }

    if leaves_lone_seat(seats, i + 1..seats.len()) {
        let culprit = (i..seats.len() - 1)
            .find(|&k| seats[k].is_requested() && seats[k + 1].is_requested());
        return Err(fragmentation(seats, culprit));
    }

    Ok(())
}

/// Идёт по `positions` от недоступного места. `true`, если после примыкающих
/// недоступных позиций нашлось ровно одно свободное место.
fn leaves_lone_seat(seats: &[MappedRowSeat<'_>], positions: impl Iterator<Item = usize>) -> bool {
    let mut budget = FREE_SPACE_BUDGET;
    let mut free = 0u8;
    let mut counting = false;

    for j in positions {
        if budget == 0 {
            break;
        }
        if seats[j].is_available() {
            counting = true;
            free += 1;
            budget -= 1;
        } else if counting {
            budget -= 1;
        }
    }

    counting && free != FREE_SPACE_BUDGET
}

fn fragmentation(seats: &[MappedRowSeat<'_>], culprit: Option<usize>) -> SeatRuleError {
    SeatRuleError::Fragmentation {
        conflicting_seat_id: culprit
            .and_then(|k| seats[k].seat())
            .map(|seat| seat.id.clone()),
    }
}
