//! Domain records and request/response bodies
//!
//! `duty` holds the persisted record and the list page; `requests` and
//! `responses` hold the HTTP bodies that exist only at the API edge.

pub mod duty;
pub mod requests;
pub mod responses;

pub use duty::{Duty, DutyPage};
pub use requests::DutyPayload;
pub use responses::{CacheReport, HealthResponse};
