//! Shared constants for briefing preparation: keyword tables, thresholds,
//! and the house name.

use crate::types::Priority;

/// The establishment reviews are matched against for returning guests.
pub const ESTABLISHMENT_NAME: &str = "French Laudure";

/// Default service date shown when none is picked.
pub const DEFAULT_SERVICE_DATE: &str = "2024-05-21";

/// Average rating at or above which a reviewer counts as VIP.
pub const VIP_RATING_THRESHOLD: f64 = 4.5;

/// Number of reviews at or above which a guest counts as VIP.
pub const VIP_REVIEW_COUNT: usize = 2;

/// Label of the category whose match makes an email a special occasion.
pub const CELEBRATION_CATEGORY: &str = "celebration";

/// Label added by the dietary pass and used for the `dietary` notice type.
pub const DIETARY_CATEGORY: &str = "dietary";

/// Fallback occasion when a celebration names no specific event.
pub const OTHER_OCCASION: &str = "other";

/// One row of the category table. Patterns are case-insensitive regexes.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub label: &'static str,
    pub patterns: &'static [&'static str],
    pub priority: Priority,
    pub action_required: bool,
}

/// Email categories, evaluated in order.
pub const EMAIL_CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        label: "dietary",
        patterns: &[
            r"allerg(y|ic|ies)",
            r"gluten[- ]?free",
            r"dairy[- ]?free",
            r"vegan",
            r"vegetarian",
            r"shellfish",
            r"nut[- ]?free",
            r"lactose",
            r"cilantro",
        ],
        priority: Priority::High,
        action_required: true,
    },
    CategorySpec {
        label: "accessibility",
        patterns: &[
            r"wheelchair",
            r"mobil(e|ity)",
            r"access(ible|ibility)",
            r"cane",
            r"step[- ]?free",
        ],
        priority: Priority::High,
        action_required: true,
    },
    CategorySpec {
        label: "celebration",
        patterns: &[
            r"birthday",
            r"anniversary",
            r"graduation",
            r"promotion",
            r"proposal",
            r"surprise",
            r"special occasion",
            r"reuniting",
            r"honeymoon",
            r"reunion",
            r"child",
            r"engagement",
        ],
        priority: Priority::Medium,
        action_required: true,
    },
    CategorySpec {
        label: "timing",
        patterns: &[
            r"early",
            r"arrive",
            r"rush",
            r"theater",
            r"show",
            r"timing",
            r"schedule",
        ],
        priority: Priority::Medium,
        action_required: false,
    },
    CategorySpec {
        label: "seating",
        patterns: &[
            r"table",
            r"seat(ing)?",
            r"corner",
            r"quiet",
            r"private",
            r"window",
            r"booth",
        ],
        priority: Priority::Medium,
        action_required: false,
    },
    CategorySpec {
        label: "special_service",
        patterns: &[
            r"photography",
            r"photo",
            r"camera",
            r"picture",
            r"celebration",
            r"candle",
            r"toast",
            r"wine pairing",
            r"sommelier",
            r"rose",
            r"child",
            r"gift",
        ],
        priority: Priority::Low,
        action_required: false,
    },
];

/// Restriction keyword → canonical label.
///
/// `tallied` keywords also feed the daily dietary tally; the others only
/// escalate the notice.
#[derive(Debug, Clone, Copy)]
pub struct RestrictionKeyword {
    pub pattern: &'static str,
    pub label: &'static str,
    pub tallied: bool,
}

pub const RESTRICTION_KEYWORDS: &[RestrictionKeyword] = &[
    RestrictionKeyword { pattern: r"shellfish", label: "shellfish-free", tallied: true },
    RestrictionKeyword { pattern: r"gluten", label: "gluten-free", tallied: true },
    RestrictionKeyword { pattern: r"dairy", label: "dairy-free", tallied: true },
    RestrictionKeyword { pattern: r"lactose", label: "dairy-free", tallied: true },
    RestrictionKeyword { pattern: r"nut", label: "nut-free", tallied: true },
    RestrictionKeyword { pattern: r"allerg", label: "allergy", tallied: false },
    RestrictionKeyword { pattern: r"vegan", label: "vegan", tallied: false },
    RestrictionKeyword { pattern: r"vegetarian", label: "vegetarian", tallied: false },
];

/// Occasion keyword → occasion label recorded alongside `celebration`.
pub const OCCASION_KEYWORDS: &[(&str, &str)] = &[
    (r"birthday", "birthday"),
    (r"anniversary", "anniversary"),
    (r"graduation", "graduation"),
    (r"promotion", "promotion"),
    (r"reunion|reuniting", "reunion"),
];

/// Occasion labels the daily tally groups by. A celebration naming none of
/// these is tallied as `other`.
pub const OCCASION_VOCABULARY: &[&str] = &[
    "birthday",
    "anniversary",
    "graduation",
    "promotion",
    "reunion",
];
