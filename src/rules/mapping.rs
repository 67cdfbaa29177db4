//! Раскладка ряда в плотный массив по номерам мест.
//!
//! Ряд разворачивается от минимального до максимального свободного номера.
//! Каждая позиция либо свободна, либо недоступна (продана, удержана, отсутствует
//! физически: для фрагментации это одно и то же), либо запрошена сейчас и
//! станет недоступной после этой брони.

use std::collections::{HashMap, HashSet};

use crate::error::SeatRuleError;
use crate::models::Seat;

/// Сколько позиций массива допускается на одно свободное место.
const MAX_SPAN_PER_SEAT: usize = 16;
/// Ниже этой длины ряд разворачиваем без ограничений.
const MIN_SPAN_LIMIT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedRowSeat<'a> {
    Available(&'a Seat),
    Unavailable,
    /// Свободно сейчас, но запрошено этим вызовом
    Requested(&'a Seat),
}

impl<'a> MappedRowSeat<'a> {
    pub fn is_available(&self) -> bool {
        matches!(self, MappedRowSeat::Available(_))
    }

    pub fn is_requested(&self) -> bool {
        matches!(self, MappedRowSeat::Requested(_))
    }

    /// 1 - место останется свободным, 0 - нет.
    pub fn availability_indicator(&self) -> u8 {
        u8::from(self.is_available())
    }

    pub fn seat(&self) -> Option<&'a Seat> {
        match *self {
            MappedRowSeat::Available(seat) | MappedRowSeat::Requested(seat) => Some(seat),
            MappedRowSeat::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow<'a> {
    first_num: i32,
    seats: Vec<MappedRowSeat<'a>>,
}

impl<'a> MappedRow<'a> {
    pub fn seats(&self) -> &[MappedRowSeat<'a>] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn first_num(&self) -> i32 {
        self.first_num
    }

    /// Номер места для позиции в массиве.
    pub fn seat_num(&self, index: usize) -> i32 {
        self.first_num + index as i32
    }

    pub fn availability_indicators(&self) -> Vec<u8> {
        self.seats.iter().map(MappedRowSeat::availability_indicator).collect()
    }
}

/// Каждое место может встретиться в запросе только один раз.
pub fn ensure_distinct_requested(requested: &[Seat]) -> Result<(), SeatRuleError> {
    let mut seen = HashSet::with_capacity(requested.len());
    match requested.iter().find(|s| !seen.insert(s.num)) {
        Some(duplicate) => Err(SeatRuleError::Inconsistent { seat_num: duplicate.num }),
        None => Ok(()),
    }
}

fn ensure_sane_span(first_num: i32, last_num: i32, seats: usize) -> Result<(), SeatRuleError> {
    let span = i64::from(last_num) - i64::from(first_num) + 1;
    let limit = seats.saturating_mul(MAX_SPAN_PER_SEAT).max(MIN_SPAN_LIMIT);
    match usize::try_from(span) {
        Ok(span) if span <= limit => Ok(()),
        _ => Err(SeatRuleError::MalformedRow { first_num, last_num, seats }),
    }
}

/// Строит плотный массив ряда. Порядок `available` не важен, номера могут
/// идти с пропусками (проходы, уже проданные места).
pub fn map_row_seats<'a>(
    available: &'a [Seat],
    requested: &[Seat],
) -> Result<MappedRow<'a>, SeatRuleError> {
    ensure_distinct_requested(requested)?;
    let by_num: HashMap<i32, &'a Seat> = available.iter().map(|s| (s.num, s)).collect();

    let (Some(first_num), Some(last_num)) = (
        available.iter().map(|s| s.num).min(),
        available.iter().map(|s| s.num).max(),
    ) else {
        // пустой ряд: запросить в нём нечего
        if let Some(seat) = requested.first() {
            return Err(SeatRuleError::Inconsistent { seat_num: seat.num });
        }
        return Ok(MappedRow { first_num: 0, seats: Vec::new() });
    };
    ensure_sane_span(first_num, last_num, available.len())?;

    let mut seats: Vec<MappedRowSeat<'a>> = (first_num..=last_num)
        .map(|num| match by_num.get(&num).copied() {
            Some(seat) => MappedRowSeat::Available(seat),
            None => MappedRowSeat::Unavailable,
        })
        .collect();

    for requested_seat in requested {
        let seat = by_num
            .get(&requested_seat.num)
            .copied()
            .ok_or(SeatRuleError::Inconsistent { seat_num: requested_seat.num })?;
        seats[(requested_seat.num - first_num) as usize] = MappedRowSeat::Requested(seat);
    }

    Ok(MappedRow { first_num, seats })
}
