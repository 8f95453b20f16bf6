//! Briefing preparation: turning raw guest correspondence into signals.
//!
//! - constants: category keyword tables, VIP thresholds, house name
//! - email_classify: category / priority / type classification of guest email

pub mod constants;
pub mod email_classify;
