//! In-memory duty repository
//!
//! Mirrors the PostgreSQL ordering and paging rules over a vector, for tests
//! and for running the API without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::DutyRepository;
use crate::error::Result;
use crate::models::{Duty, DutyPage};
use crate::query::{PaginationParams, SortOrder, SortParams};

#[derive(Debug, Default)]
pub struct InMemoryDutyRepository {
    rows: RwLock<Vec<Duty>>,
}

impl InMemoryDutyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl DutyRepository for InMemoryDutyRepository {
    async fn find_all(&self, pagination: PaginationParams, sort: SortParams) -> Result<DutyPage> {
        let rows = self.rows.read().await;
        let mut duties: Vec<Duty> = rows.clone();
        drop(rows);

        match sort.sort_by {
            "name" => duties.sort_by(|a, b| a.name.cmp(&b.name)),
            _ => duties.sort_by(|a, b| a.id.cmp(&b.id)),
        }
        if sort.order == SortOrder::Desc {
            duties.reverse();
        }

        let total_count = duties.len() as i64;
        let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(0);
        let duties = duties.into_iter().skip(offset).take(limit).collect();

        Ok(DutyPage {
            duties,
            total_count,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Duty>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|duty| duty.id == id).cloned())
    }

    async fn create(&self, name: &str) -> Result<Duty> {
        let duty = Duty::new(name);
        self.rows.write().await.push(duty.clone());
        Ok(duty)
    }

    async fn update(&self, id: Uuid, name: &str) -> Result<Option<Duty>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|duty| duty.id == id).map(|duty| {
            duty.name = name.to_string();
            duty.clone()
        }))
    }

    async fn remove(&self, id: Uuid) -> Result<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|duty| duty.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(sort_by: &'static str, order: SortOrder) -> SortParams {
        SortParams { sort_by, order }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = InMemoryDutyRepository::new();

        let created = repo.create("Water plants").await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_all_orders_and_pages() {
        let repo = InMemoryDutyRepository::new();
        for name in ["c", "a", "e", "b", "d"] {
            repo.create(name).await.unwrap();
        }

        let page = repo
            .find_all(
                PaginationParams { limit: 2, offset: 2 },
                sort("name", SortOrder::Asc),
            )
            .await
            .unwrap();
        let names: Vec<&str> = page.duties.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["c", "d"]);
        assert_eq!(page.total_count, 5);

        let page = repo
            .find_all(
                PaginationParams { limit: 10, offset: 0 },
                sort("name", SortOrder::Desc),
            )
            .await
            .unwrap();
        assert_eq!(page.duties[0].name, "e");
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let repo = InMemoryDutyRepository::new();
        repo.create("only").await.unwrap();

        let page = repo
            .find_all(
                PaginationParams { limit: 10, offset: 10 },
                sort("id", SortOrder::Asc),
            )
            .await
            .unwrap();

        assert!(page.duties.is_empty());
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let repo = InMemoryDutyRepository::new();
        let duty = repo.create("Old").await.unwrap();

        let updated = repo.update(duty.id, "New").await.unwrap().unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.id, duty.id);

        assert_eq!(repo.remove(duty.id).await.unwrap(), 1);
        assert_eq!(repo.remove(duty.id).await.unwrap(), 0);
        assert!(repo.update(duty.id, "Gone").await.unwrap().is_none());
    }
}
