//! Front-of-house briefing for the dining room.
//!
//! Given the guest file and a service date, produces the day's statistics
//! (covers, VIPs, dietary and occasion tallies, staff requests) and one
//! classified notice per booked guest's email.

pub mod error;
pub mod json_loader;
pub mod prepare;
pub mod services;
pub mod state;
pub mod types;

pub use error::{DataLoadError, LoadErrorView};
pub use prepare::email_classify::{classify_email, CategoryRule, EmailClassifier};
pub use services::dashboard::{
    compute_daily_stats, compute_email_notices, load_dashboard, DailyStatsAggregator,
    DashboardResult, StatsPolicy,
};
pub use types::{
    DailyBriefing, DailyStats, Dataset, EmailNotice, EmailThread, Guest, NoticeType, Order,
    Priority, Reservation, Review, SpecialRequest, TallyEntry,
};
