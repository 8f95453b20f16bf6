//! Business logic behind each dashboard view.
//!
//! Every function here is pure over an in-memory guest list; loading the
//! data is `json_loader`'s job.

pub mod actions;
pub mod calendar;
pub mod dashboard;
pub mod guests;
