// Dashboard service — daily statistics for the front-of-house overview.
// Filters guests to the service date, classifies one email per guest, and
// folds reservations, reviews and notices into DailyStats.

use indexmap::IndexMap;

use crate::error::{DataLoadError, LoadErrorView};
use crate::prepare::constants::{
    CELEBRATION_CATEGORY, ESTABLISHMENT_NAME, OCCASION_VOCABULARY, OTHER_OCCASION,
    VIP_RATING_THRESHOLD, VIP_REVIEW_COUNT,
};
use crate::prepare::email_classify::EmailClassifier;
use crate::types::{
    DailyBriefing, DailyStats, Dataset, EmailNotice, Guest, SpecialRequest, TallyEntry,
};

/// House rules the aggregator applies to guests.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsPolicy {
    /// Reviews for this restaurant make a guest "returning".
    pub establishment_name: String,
    pub vip_rating_threshold: f64,
    pub vip_review_count: usize,
}

impl Default for StatsPolicy {
    fn default() -> Self {
        Self {
            establishment_name: ESTABLISHMENT_NAME.to_string(),
            vip_rating_threshold: VIP_RATING_THRESHOLD,
            vip_review_count: VIP_REVIEW_COUNT,
        }
    }
}

impl StatsPolicy {
    /// Rated highly on average, or reviewed us often enough.
    ///
    /// A guest without reviews has no average and is never VIP.
    pub fn is_vip(&self, guest: &Guest) -> bool {
        self.has_high_ratings(guest) || self.has_multiple_visits(guest)
    }

    pub fn has_high_ratings(&self, guest: &Guest) -> bool {
        guest
            .average_rating()
            .is_some_and(|avg| avg >= self.vip_rating_threshold)
    }

    pub fn has_multiple_visits(&self, guest: &Guest) -> bool {
        !guest.reviews.is_empty() && guest.reviews.len() >= self.vip_review_count
    }

    /// Has reviewed this establishment at least once.
    pub fn is_returning(&self, guest: &Guest) -> bool {
        guest
            .reviews
            .iter()
            .any(|r| r.restaurant_name == self.establishment_name)
    }
}

/// Computes the daily overview. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct DailyStatsAggregator<'a> {
    classifier: &'a EmailClassifier,
    policy: StatsPolicy,
}

impl Default for DailyStatsAggregator<'static> {
    fn default() -> Self {
        Self::new(EmailClassifier::standard(), StatsPolicy::default())
    }
}

impl<'a> DailyStatsAggregator<'a> {
    pub fn new(classifier: &'a EmailClassifier, policy: StatsPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn policy(&self) -> &StatsPolicy {
        &self.policy
    }

    /// Stats and notices for `date` in one pass.
    pub fn briefing(&self, guests: &[Guest], date: &str) -> DailyBriefing {
        let todays = relevant_guests(guests, date);
        let notices = self.notices_for(&todays);
        let stats = self.stats_for(&todays, &notices, date);
        DailyBriefing {
            date: date.to_string(),
            stats,
            notices,
        }
    }

    /// One notice per relevant guest that has an email, in dataset order.
    pub fn compute_email_notices(&self, guests: &[Guest], date: &str) -> Vec<EmailNotice> {
        self.notices_for(&relevant_guests(guests, date))
    }

    pub fn compute_daily_stats(&self, guests: &[Guest], date: &str) -> DailyStats {
        let todays = relevant_guests(guests, date);
        let notices = self.notices_for(&todays);
        self.stats_for(&todays, &notices, date)
    }

    fn notices_for(&self, todays: &[&Guest]) -> Vec<EmailNotice> {
        todays
            .iter()
            .filter_map(|guest| {
                representative_email(guest)
                    .map(|email| self.classifier.classify(email, &guest.name))
            })
            .collect()
    }

    fn stats_for(&self, todays: &[&Guest], notices: &[EmailNotice], date: &str) -> DailyStats {
        let total_covers = todays
            .iter()
            .filter_map(|g| g.reservation_on(date))
            .map(|r| u64::from(r.party_size))
            .sum();

        let stats = DailyStats {
            total_covers,
            // No service period on reservations yet: everyone is dinner.
            lunch_count: 0,
            dinner_count: todays.len(),
            special_occasions: occasion_tally(notices),
            dietary_restrictions: self.restriction_tally(todays, date),
            vip_count: todays.iter().filter(|g| self.policy.is_vip(g)).count(),
            returning_guest_count: todays.iter().filter(|g| self.policy.is_returning(g)).count(),
            special_requests: special_requests(notices),
        };

        log::debug!(
            "Daily stats for {}: {} guests, {} covers, {} notices",
            date,
            todays.len(),
            stats.total_covers,
            notices.len()
        );
        stats
    }

    /// Order tags on today's reservations plus restrictions named in each
    /// guest's representative email.
    fn restriction_tally(&self, todays: &[&Guest], date: &str) -> Vec<TallyEntry> {
        let from_orders = todays.iter().flat_map(|guest| {
            guest
                .reservations
                .iter()
                .filter(move |r| r.date == date)
                .flat_map(|r| r.orders.iter())
                .flat_map(|o| o.dietary_tags.iter().cloned())
        });

        let from_emails = todays.iter().flat_map(|guest| {
            representative_email(guest)
                .map(|email| self.classifier.tallied_restrictions(email))
                .unwrap_or_default()
        });

        tally(from_orders.chain(from_emails))
    }
}

/// Guests holding at least one reservation dated exactly `date`.
pub fn relevant_guests<'g>(guests: &'g [Guest], date: &str) -> Vec<&'g Guest> {
    guests.iter().filter(|g| g.is_booked_on(date)).collect()
}

/// Only the first email of a guest is classified.
fn representative_email(guest: &Guest) -> Option<&crate::types::EmailThread> {
    guest.emails.first()
}

/// Occasion behind a celebration notice: the first specific occasion label it
/// matched, else `other`.
pub fn occasion_label(notice: &EmailNotice) -> &str {
    notice
        .categories
        .iter()
        .find(|c| OCCASION_VOCABULARY.contains(&c.as_str()))
        .map(String::as_str)
        .unwrap_or(OTHER_OCCASION)
}

/// Every notice that matched `celebration` counts, including ones whose type
/// was taken by `dietary`.
fn occasion_tally(notices: &[EmailNotice]) -> Vec<TallyEntry> {
    tally(
        notices
            .iter()
            .filter(|n| n.has_category(CELEBRATION_CATEGORY))
            .map(|n| occasion_label(n).to_string()),
    )
}

fn special_requests(notices: &[EmailNotice]) -> Vec<SpecialRequest> {
    notices
        .iter()
        .filter(|n| n.needs_action)
        .map(|n| SpecialRequest {
            request_type: n.notice_type,
            details: n.content.clone(),
            guest_name: n.guest_name.clone(),
        })
        .collect()
}

/// Group labels and count them, dropping blanks. Rows keep first-seen order.
fn tally(labels: impl Iterator<Item = String>) -> Vec<TallyEntry> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for label in labels {
        if label.trim().is_empty() {
            continue;
        }
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| TallyEntry { label, count })
        .collect()
}

/// Daily stats with the built-in classifier and house policy.
pub fn compute_daily_stats(guests: &[Guest], date: &str) -> DailyStats {
    DailyStatsAggregator::default().compute_daily_stats(guests, date)
}

/// Email notices with the built-in classifier.
pub fn compute_email_notices(guests: &[Guest], date: &str) -> Vec<EmailNotice> {
    DailyStatsAggregator::default().compute_email_notices(guests, date)
}

/// Result type for dashboard data loading
#[derive(Debug, serde::Serialize)]
#[allow(clippy::large_enum_variant)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardResult {
    Success { data: DailyBriefing },
    Empty { message: String, data: DailyBriefing },
    Error { error: LoadErrorView },
}

/// Build the dashboard payload for `date` from a dataset load attempt.
///
/// A failed load becomes `Error` with no partial stats.
pub fn load_dashboard(
    dataset: Result<&Dataset, &DataLoadError>,
    aggregator: &DailyStatsAggregator<'_>,
    date: &str,
) -> DashboardResult {
    let dataset = match dataset {
        Ok(d) => d,
        Err(e) => {
            log::warn!("Dashboard unavailable for {}: {}", date, e);
            return DashboardResult::Error {
                error: LoadErrorView::from(e),
            };
        }
    };

    let data = aggregator.briefing(&dataset.diners, date);
    if data.stats.dinner_count == 0 {
        DashboardResult::Empty {
            message: format!("No reservations for {}", date),
            data,
        }
    } else {
        DashboardResult::Success { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare::email_classify::CategoryRule;
    use crate::types::{EmailThread, NoticeType, Order, Priority, Reservation, Review};

    const DATE: &str = "2024-05-20";

    fn reservation(date: &str, party_size: u32, tags: &[&str]) -> Reservation {
        Reservation {
            date: date.to_string(),
            party_size,
            orders: vec![Order {
                item: "Tasting menu".to_string(),
                dietary_tags: tags.iter().map(|t| t.to_string()).collect(),
                price: 120.0,
            }],
        }
    }

    fn review(restaurant: &str, rating: f64) -> Review {
        Review {
            restaurant_name: restaurant.to_string(),
            date: "2023-11-02".to_string(),
            rating,
            content: "Lovely evening".to_string(),
        }
    }

    fn email(subject: &str, thread: &str) -> EmailThread {
        EmailThread {
            date: "2024-05-01".to_string(),
            subject: subject.to_string(),
            combined_thread: thread.to_string(),
        }
    }

    fn guest(name: &str) -> Guest {
        Guest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn dupont() -> Guest {
        Guest {
            reservations: vec![reservation(DATE, 4, &["gluten-free"])],
            emails: vec![email(
                "Birthday dinner",
                "We'd love a birthday surprise for my partner, she has a gluten allergy",
            )],
            ..guest("A. Dupont")
        }
    }

    fn loyal_reviewer() -> Guest {
        Guest {
            reservations: vec![reservation(DATE, 2, &[])],
            reviews: vec![review("Chez Other", 5.0), review("Chez Other", 5.0)],
            emails: vec![email("Hello", "Looking forward to it")],
            ..guest("B. Martin")
        }
    }

    #[test]
    fn test_dupont_scenario() {
        let guests = vec![dupont()];
        let briefing = DailyStatsAggregator::default().briefing(&guests, DATE);
        let stats = &briefing.stats;

        assert_eq!(stats.total_covers, 4);
        assert_eq!(stats.dinner_count, 1);
        assert_eq!(stats.lunch_count, 0);
        assert!(stats.restriction_count("gluten-free") >= 1);
        assert_eq!(stats.occasion_count("birthday"), 1);
        assert_eq!(stats.vip_count, 0);
        assert_eq!(stats.returning_guest_count, 0);

        assert_eq!(briefing.notices.len(), 1);
        let notice = &briefing.notices[0];
        assert_eq!(notice.notice_type, NoticeType::Dietary);
        assert_eq!(notice.priority, Priority::High);
        assert!(notice.needs_action);

        assert_eq!(stats.special_requests.len(), 1);
        assert_eq!(stats.special_requests[0].request_type, NoticeType::Dietary);
        assert_eq!(stats.special_requests[0].guest_name, "A. Dupont");
    }

    #[test]
    fn test_order_tags_and_email_keywords_merge() {
        // One gluten-free order tag plus the keyword in the email.
        let stats = compute_daily_stats(&[dupont()], DATE);
        assert_eq!(stats.restriction_count("gluten-free"), 2);
    }

    #[test]
    fn test_vip_by_review_count_with_general_email() {
        let guests = vec![loyal_reviewer()];
        let stats = compute_daily_stats(&guests, DATE);
        let notices = compute_email_notices(&guests, DATE);

        assert_eq!(stats.vip_count, 1);
        assert_eq!(stats.returning_guest_count, 0);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].notice_type, NoticeType::General);
        assert_eq!(notices[0].priority, Priority::Low);
        assert!(!notices[0].needs_action);
        assert!(stats.special_requests.is_empty());
    }

    #[test]
    fn test_vip_by_single_high_rating() {
        let g = Guest {
            reviews: vec![review("Chez Other", 4.5)],
            reservations: vec![reservation(DATE, 2, &[])],
            ..guest("Solo")
        };
        assert_eq!(compute_daily_stats(&[g], DATE).vip_count, 1);
    }

    #[test]
    fn test_single_low_rating_is_not_vip() {
        let g = Guest {
            reviews: vec![review("Chez Other", 3.0)],
            reservations: vec![reservation(DATE, 2, &[])],
            ..guest("Critic")
        };
        assert_eq!(compute_daily_stats(&[g], DATE).vip_count, 0);
    }

    #[test]
    fn test_zero_reviews_never_vip_even_with_lenient_policy() {
        let classifier = EmailClassifier::default();
        let policy = StatsPolicy {
            vip_rating_threshold: 0.0,
            vip_review_count: 0,
            ..StatsPolicy::default()
        };
        let aggregator = DailyStatsAggregator::new(&classifier, policy);
        let g = Guest {
            reservations: vec![reservation(DATE, 2, &[])],
            ..guest("New")
        };
        assert_eq!(aggregator.compute_daily_stats(&[g], DATE).vip_count, 0);
    }

    #[test]
    fn test_returning_guest_needs_review_here() {
        let g = Guest {
            reviews: vec![review(ESTABLISHMENT_NAME, 3.0)],
            reservations: vec![reservation(DATE, 2, &[])],
            ..guest("Regular")
        };
        let other = Guest {
            reviews: vec![review("french laudure", 3.0)],
            reservations: vec![reservation(DATE, 2, &[])],
            ..guest("Lowercase")
        };
        assert_eq!(compute_daily_stats(&[g, other], DATE).returning_guest_count, 1);
    }

    #[test]
    fn test_empty_date_yields_zero_stats() {
        let guests = vec![dupont(), loyal_reviewer()];
        let stats = compute_daily_stats(&guests, "1999-01-01");
        assert_eq!(stats, DailyStats::default());
        assert!(compute_email_notices(&guests, "1999-01-01").is_empty());
    }

    #[test]
    fn test_guests_on_other_dates_contribute_nothing() {
        let elsewhere = Guest {
            reservations: vec![reservation("2024-05-21", 6, &["vegan"])],
            reviews: vec![review(ESTABLISHMENT_NAME, 5.0), review(ESTABLISHMENT_NAME, 5.0)],
            emails: vec![email("Anniversary", "Shellfish allergy")],
            ..guest("Elsewhere")
        };
        let guests = vec![dupont(), elsewhere];
        let stats = compute_daily_stats(&guests, DATE);
        let alone = compute_daily_stats(&[dupont()], DATE);
        assert_eq!(stats, alone);
        assert_eq!(compute_email_notices(&guests, DATE).len(), 1);
    }

    #[test]
    fn test_only_first_matching_reservation_counts_covers() {
        let g = Guest {
            reservations: vec![
                reservation("2024-05-19", 8, &[]),
                reservation(DATE, 3, &["vegan"]),
                reservation(DATE, 5, &["vegan"]),
            ],
            ..guest("Double")
        };
        let stats = compute_daily_stats(&[g], DATE);
        assert_eq!(stats.total_covers, 3);
        assert_eq!(stats.dinner_count, 1);
        // Tags from every same-date reservation are tallied.
        assert_eq!(stats.restriction_count("vegan"), 2);
    }

    #[test]
    fn test_only_first_email_is_classified() {
        let g = Guest {
            reservations: vec![reservation(DATE, 2, &[])],
            emails: vec![
                email("Confirming", "See you then"),
                email("Update", "Actually it's our anniversary, and I'm vegan"),
            ],
            ..guest("Two Emails")
        };
        let notices = compute_email_notices(&[g.clone()], DATE);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].subject, "Confirming");
        assert_eq!(notices[0].notice_type, NoticeType::General);
        assert!(compute_daily_stats(&[g], DATE).special_occasions.is_empty());
    }

    #[test]
    fn test_total_covers_holds_large_parties() {
        let big = |name: &str| Guest {
            reservations: vec![reservation(DATE, u32::MAX, &[])],
            ..guest(name)
        };
        let stats = compute_daily_stats(&[big("One"), big("Two")], DATE);
        assert_eq!(stats.total_covers, 2 * u64::from(u32::MAX));
        assert_eq!(stats.dinner_count, 2);
    }

    #[test]
    fn test_guest_without_email_has_no_notice() {
        let g = Guest {
            reservations: vec![reservation(DATE, 2, &["nut-free"])],
            ..guest("Quiet")
        };
        assert!(compute_email_notices(&[g.clone()], DATE).is_empty());
        assert_eq!(compute_daily_stats(&[g], DATE).restriction_count("nut-free"), 1);
    }

    #[test]
    fn test_blank_tags_are_dropped() {
        let g = Guest {
            reservations: vec![reservation(DATE, 2, &["", "  ", "vegetarian"])],
            ..guest("Blank")
        };
        let stats = compute_daily_stats(&[g], DATE);
        assert_eq!(
            stats.dietary_restrictions,
            vec![TallyEntry {
                label: "vegetarian".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_occasions_group_and_fall_back_to_other() {
        let make = |name: &str, subject: &str| Guest {
            reservations: vec![reservation(DATE, 2, &[])],
            emails: vec![email(subject, "")],
            ..guest(name)
        };
        let guests = vec![
            make("One", "Birthday"),
            make("Two", "Anniversary"),
            make("Three", "A surprise proposal"),
            make("Four", "Her birthday"),
        ];
        let stats = compute_daily_stats(&guests, DATE);
        assert_eq!(
            stats.special_occasions,
            vec![
                TallyEntry { label: "birthday".to_string(), count: 2 },
                TallyEntry { label: "anniversary".to_string(), count: 1 },
                TallyEntry { label: "other".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let a = Guest {
            reservations: vec![reservation(DATE, 2, &["vegan", "gluten-free"])],
            ..guest("A")
        };
        let b = Guest {
            reservations: vec![reservation(DATE, 2, &["gluten-free"])],
            ..guest("B")
        };
        let stats = compute_daily_stats(&[a, b], DATE);
        let labels: Vec<&str> = stats
            .dietary_restrictions
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["vegan", "gluten-free"]);
        assert_eq!(stats.restriction_count("gluten-free"), 2);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let guests = vec![dupont(), loyal_reviewer()];
        let aggregator = DailyStatsAggregator::default();
        assert_eq!(aggregator.briefing(&guests, DATE), aggregator.briefing(&guests, DATE));
    }

    #[test]
    fn test_briefing_matches_separate_queries() {
        let guests = vec![dupont(), loyal_reviewer()];
        let briefing = DailyStatsAggregator::default().briefing(&guests, DATE);
        assert_eq!(briefing.stats, compute_daily_stats(&guests, DATE));
        assert_eq!(briefing.notices, compute_email_notices(&guests, DATE));
        assert_eq!(briefing.stats.total_covers, 6);
    }

    #[test]
    fn test_injected_classifier_drives_requests() {
        let classifier = EmailClassifier::with_rules(vec![CategoryRule::new(
            "greeting",
            &["looking forward"],
            Priority::Medium,
            true,
        )]);
        let aggregator = DailyStatsAggregator::new(&classifier, StatsPolicy::default());
        let stats = aggregator.compute_daily_stats(&[loyal_reviewer()], DATE);
        assert_eq!(stats.special_requests.len(), 1);
        assert_eq!(stats.special_requests[0].request_type, NoticeType::Request);
        assert_eq!(stats.special_requests[0].details, "Looking forward to it");
    }

    #[test]
    fn test_load_dashboard_states() {
        let aggregator = DailyStatsAggregator::default();
        let dataset = Dataset {
            diners: vec![dupont()],
        };

        match load_dashboard(Ok(&dataset), &aggregator, DATE) {
            DashboardResult::Success { data } => assert_eq!(data.stats.total_covers, 4),
            other => panic!("Expected Success, got {:?}", other),
        }

        match load_dashboard(Ok(&dataset), &aggregator, "2030-01-01") {
            DashboardResult::Empty { data, .. } => assert_eq!(data.stats, DailyStats::default()),
            other => panic!("Expected Empty, got {:?}", other),
        }

        let err = DataLoadError::Parse("expected value".to_string());
        match load_dashboard(Err(&err), &aggregator, DATE) {
            DashboardResult::Error { error } => assert!(error.message.contains("expected value")),
            other => panic!("Expected Error, got {:?}", other),
        }
    }
}
