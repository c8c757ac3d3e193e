//! Client Module
//!
//! Consumer side of the duties API: an HTTP client with a GET response cache,
//! and the state machine behind the duty administration screen.

mod api_client;
mod error;
mod management;
mod service;

pub use api_client::ApiClient;
pub use error::ClientError;
pub use management::{
    DutyManagement, ListView, Notification, NotificationKind, SortDirection,
    LIST_ERROR_DESCRIPTION,
};
pub use service::{DutyService, GetDutiesParams};
