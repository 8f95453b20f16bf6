// Calendar service — how busy each date is, for the date picker.

use std::collections::BTreeMap;

use crate::types::Guest;

/// Share of the busiest day below which a date reads as quiet.
const LOW_LOAD_RATIO: f64 = 0.3;

/// Share of the busiest day at or above which a date reads as busy.
const HIGH_LOAD_RATIO: f64 = 0.7;

/// Reservation load of a single date relative to the busiest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    None,
    Low,
    Medium,
    High,
}

/// Number of reservations per date across all guests.
pub fn reservation_counts(guests: &[Guest]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for reservation in guests.iter().flat_map(|g| g.reservations.iter()) {
        *counts.entry(reservation.date.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn busiest_day_count(counts: &BTreeMap<String, usize>) -> usize {
    counts.values().copied().max().unwrap_or(0)
}

pub fn load_level(count: usize, max: usize) -> LoadLevel {
    if count == 0 || max == 0 {
        return LoadLevel::None;
    }
    let ratio = count as f64 / max as f64;
    if ratio < LOW_LOAD_RATIO {
        LoadLevel::Low
    } else if ratio < HIGH_LOAD_RATIO {
        LoadLevel::Medium
    } else {
        LoadLevel::High
    }
}

/// Load level for every booked date.
pub fn calendar_levels(guests: &[Guest]) -> BTreeMap<String, LoadLevel> {
    let counts = reservation_counts(guests);
    let max = busiest_day_count(&counts);
    counts
        .into_iter()
        .map(|(date, count)| (date, load_level(count, max)))
        .collect()
}
