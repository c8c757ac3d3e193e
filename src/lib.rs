//! Duty Manager - a small CRUD service for duties
//!
//! A REST API over a PostgreSQL `duties` table with TTL response caching,
//! plus a client library and the state machine behind the admin screen.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
