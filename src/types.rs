use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// =============================================================================
// Guest dataset (input)
// =============================================================================

/// A single dish ordered on a reservation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub item: String,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub price: f64,
}

/// A booking for one service date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// ISO calendar date (`YYYY-MM-DD`), compared as a plain string.
    pub date: String,
    #[serde(rename = "number_of_people", alias = "partySize")]
    pub party_size: u32,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// A published review, possibly for another restaurant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub restaurant_name: String,
    #[serde(default)]
    pub date: String,
    pub rating: f64,
    #[serde(default)]
    pub content: String,
}

/// One email conversation with the guest, flattened into a single body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailThread {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub combined_thread: String,
}

/// A diner and everything we know about them. `name` is the lookup key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub emails: Vec<EmailThread>,
}

impl Guest {
    /// First reservation booked for `date`, if any.
    pub fn reservation_on(&self, date: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.date == date)
    }

    /// True if the guest holds at least one reservation on `date`.
    pub fn is_booked_on(&self, date: &str) -> bool {
        self.reservation_on(date).is_some()
    }

    /// Mean review rating, or `None` for a guest without reviews.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f64 = self.reviews.iter().map(|r| r.rating).sum();
        Some(total / self.reviews.len() as f64)
    }
}

/// The full guest file as shipped with the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, alias = "guests")]
    pub diners: Vec<Guest>,
}

// =============================================================================
// Derived output
// =============================================================================

/// Notice priority level (three-tier: high / medium / low).
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Fold a newly matched priority into the running one.
    ///
    /// `High` always wins, `Medium` only replaces `Low`, and nothing ever
    /// downgrades.
    pub fn raise(self, matched: Priority) -> Priority {
        self.max(matched)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Primary type of a classified email, one per notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeType {
    SpecialOccasion,
    Request,
    Dietary,
    #[default]
    General,
}

impl NoticeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeType::SpecialOccasion => "special_occasion",
            NoticeType::Request => "request",
            NoticeType::Dietary => "dietary",
            NoticeType::General => "general",
        }
    }
}

/// A guest email after classification. Built fresh per call, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotice {
    pub guest_name: String,
    pub subject: String,
    pub content: String,
    #[serde(rename = "type")]
    pub notice_type: NoticeType,
    pub priority: Priority,
    pub needs_action: bool,
    /// Matched category and restriction labels, in match order.
    pub categories: IndexSet<String>,
}

impl EmailNotice {
    pub fn has_category(&self, label: &str) -> bool {
        self.categories.contains(label)
    }
}

/// One `{type, count}` row of a tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    #[serde(rename = "type")]
    pub label: String,
    pub count: usize,
}

/// An actionable notice projected for the staff list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRequest {
    #[serde(rename = "type")]
    pub request_type: NoticeType,
    pub details: String,
    pub guest_name: String,
}

/// Aggregate figures for one service date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_covers: u64,
    pub lunch_count: usize,
    pub dinner_count: usize,
    pub special_occasions: Vec<TallyEntry>,
    pub dietary_restrictions: Vec<TallyEntry>,
    pub vip_count: usize,
    pub returning_guest_count: usize,
    pub special_requests: Vec<SpecialRequest>,
}

impl DailyStats {
    /// Count recorded for a dietary restriction label (0 when absent).
    pub fn restriction_count(&self, label: &str) -> usize {
        tally_count(&self.dietary_restrictions, label)
    }

    /// Count recorded for a special-occasion label (0 when absent).
    pub fn occasion_count(&self, label: &str) -> usize {
        tally_count(&self.special_occasions, label)
    }
}

fn tally_count(tally: &[TallyEntry], label: &str) -> usize {
    tally
        .iter()
        .find(|e| e.label == label)
        .map(|e| e.count)
        .unwrap_or(0)
}

/// Stats and notices for one date, computed from the same guest filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBriefing {
    pub date: String,
    pub stats: DailyStats,
    pub notices: Vec<EmailNotice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_raise_never_downgrades() {
        assert_eq!(Priority::Low.raise(Priority::Medium), Priority::Medium);
        assert_eq!(Priority::Medium.raise(Priority::High), Priority::High);
        assert_eq!(Priority::High.raise(Priority::Medium), Priority::High);
        assert_eq!(Priority::High.raise(Priority::Low), Priority::High);
        assert_eq!(Priority::Medium.raise(Priority::Low), Priority::Medium);
    }

    #[test]
    fn test_average_rating_guards_empty_reviews() {
        let guest = Guest {
            name: "Empty".to_string(),
            ..Default::default()
        };
        assert_eq!(guest.average_rating(), None);
    }

    #[test]
    fn test_deserialize_dataset_shape() {
        let json = r#"{
            "diners": [{
                "name": "Emily Chen",
                "reviews": [{"restaurant_name": "French Laudure", "date": "2023-10-01", "rating": 5, "content": "Superb"}],
                "reservations": [{"date": "2024-05-21", "number_of_people": 2,
                                  "orders": [{"item": "Sole", "dietary_tags": ["gluten-free"], "price": 42.5}]}],
                "emails": [{"date": "2024-05-10", "subject": "Anniversary", "combined_thread": "Hi"}]
            }, {
                "name": "Bare Guest"
            }]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.diners.len(), 2);
        let emily = &dataset.diners[0];
        assert_eq!(emily.reservations[0].party_size, 2);
        assert_eq!(emily.reservations[0].orders[0].dietary_tags, vec!["gluten-free"]);
        assert_eq!(emily.reviews[0].rating, 5.0);
        assert!(dataset.diners[1].reservations.is_empty());
        assert!(dataset.diners[1].emails.is_empty());
    }

    #[test]
    fn test_notice_serializes_wire_names() {
        let mut categories = IndexSet::new();
        categories.insert("celebration".to_string());
        let notice = EmailNotice {
            guest_name: "A".to_string(),
            subject: "S".to_string(),
            content: "C".to_string(),
            notice_type: NoticeType::SpecialOccasion,
            priority: Priority::Medium,
            needs_action: true,
            categories,
        };
        let value = serde_json::to_value(&notice).unwrap();
        assert_eq!(value["type"], "special_occasion");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["needsAction"], true);
        assert_eq!(value["guestName"], "A");
        assert_eq!(value["categories"][0], "celebration");
    }
}
