// Actions service — staff notes and action items derived from classified emails.

use crate::types::{DailyStats, EmailNotice, NoticeType, Priority};

/// Notices split by priority, input order preserved within each bucket.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct PriorityBuckets {
    pub high: Vec<EmailNotice>,
    pub medium: Vec<EmailNotice>,
    pub low: Vec<EmailNotice>,
}

impl PriorityBuckets {
    pub fn get(&self, priority: Priority) -> &[EmailNotice] {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.medium.is_empty() && self.low.is_empty()
    }
}

/// One line per actionable notice, worded for the kitchen and floor staff.
pub fn action_items(notices: &[EmailNotice]) -> Vec<String> {
    notices
        .iter()
        .filter(|n| n.needs_action)
        .map(|n| match n.notice_type {
            NoticeType::Dietary => format!(
                "Dietary Alert: {} - Check restrictions and inform kitchen",
                n.guest_name
            ),
            NoticeType::SpecialOccasion => format!(
                "Special Occasion: {} - Prepare celebration items",
                n.guest_name
            ),
            NoticeType::Request => format!(
                "Special Request: {} - Review email for specific needs",
                n.guest_name
            ),
            NoticeType::General => format!("Review Request: {} - {}", n.guest_name, n.subject),
        })
        .collect()
}

pub fn notices_by_priority(notices: &[EmailNotice]) -> PriorityBuckets {
    let mut buckets = PriorityBuckets::default();
    for notice in notices {
        let bucket = match notice.priority {
            Priority::High => &mut buckets.high,
            Priority::Medium => &mut buckets.medium,
            Priority::Low => &mut buckets.low,
        };
        bucket.push(notice.clone());
    }
    buckets
}

/// Celebrations expected today, across all occasion types.
pub fn occasion_total(stats: &DailyStats) -> usize {
    stats.special_occasions.iter().map(|e| e.count).sum()
}
