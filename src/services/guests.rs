// Guests service — the guest directory and per-guest profile figures.

use crate::services::dashboard::StatsPolicy;
use crate::types::{Guest, Reservation, Review};

/// VIP standing of a single guest, with the reasons behind it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VipProfile {
    pub name: String,
    pub is_vip: bool,
    pub reasons: Vec<String>,
    pub total_spent: f64,
    pub visit_count: usize,
}

/// Guests whose name contains `query` (case-insensitive), sorted by name
/// ignoring case. A blank query lists everyone.
pub fn search_guests<'g>(guests: &'g [Guest], query: &str) -> Vec<&'g Guest> {
    let needle = query.trim().to_lowercase();
    let mut found: Vec<&Guest> = guests
        .iter()
        .filter(|g| needle.is_empty() || g.name.to_lowercase().contains(&needle))
        .collect();
    found.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    found
}

pub fn find_guest<'g>(guests: &'g [Guest], name: &str) -> Option<&'g Guest> {
    guests.iter().find(|g| g.name == name)
}

/// The booking shown as "next visit" on the guest card.
pub fn upcoming_reservation(guest: &Guest) -> Option<&Reservation> {
    guest.reservations.first()
}

/// Reviews the guest left for `establishment`, in order.
pub fn establishment_reviews<'g>(guest: &'g Guest, establishment: &str) -> Vec<&'g Review> {
    guest
        .reviews
        .iter()
        .filter(|r| r.restaurant_name == establishment)
        .collect()
}

pub fn vip_profile(guest: &Guest, policy: &StatsPolicy) -> VipProfile {
    let mut reasons = Vec::new();
    if policy.has_high_ratings(guest) {
        reasons.push("high average rating".to_string());
    }
    if policy.has_multiple_visits(guest) {
        reasons.push("multiple visits".to_string());
    }

    let total_spent = guest
        .reservations
        .iter()
        .flat_map(|r| r.orders.iter())
        .map(|o| o.price)
        .sum();

    VipProfile {
        name: guest.name.clone(),
        is_vip: policy.is_vip(guest),
        reasons,
        total_spent,
        visit_count: guest.reservations.len(),
    }
}
