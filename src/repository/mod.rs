//! Duty Data Access
//!
//! The [`DutyRepository`] trait is the seam between the HTTP handlers and the
//! store. `postgres` talks to the `duties` table; `memory` keeps rows in a
//! vector with the same ordering and paging rules.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Duty, DutyPage};
use crate::query::{PaginationParams, SortParams};

pub use memory::InMemoryDutyRepository;
pub use postgres::{ensure_schema, PgDutyRepository};

/// Columns a duty list may be ordered by
pub const SORTABLE_COLUMNS: &[&str] = &["id", "name"];

/// Column used when the request names none (or an unknown one)
pub const DEFAULT_SORT_COLUMN: &str = "id";

#[async_trait]
pub trait DutyRepository: Send + Sync + 'static {
    /// One ordered page of duties together with the total row count.
    async fn find_all(&self, pagination: PaginationParams, sort: SortParams) -> Result<DutyPage>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Duty>>;

    /// Inserts a duty under a new id and returns the record as constructed.
    async fn create(&self, name: &str) -> Result<Duty>;

    /// Replaces the name of an existing duty, `None` when no row matched.
    async fn update(&self, id: Uuid, name: &str) -> Result<Option<Duty>>;

    /// Deletes a duty and returns the number of rows removed (0 or 1).
    async fn remove(&self, id: Uuid) -> Result<u64>;

    /// Round trip to the store.
    async fn health_check(&self) -> Result<()>;
}
