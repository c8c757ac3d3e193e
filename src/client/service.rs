//! Duty service seam
//!
//! The management state machine drives any [`DutyService`]; the HTTP
//! [`ApiClient`](super::ApiClient) is the production implementation.

use async_trait::async_trait;
use url::form_urlencoded;
use uuid::Uuid;

use super::ClientError;
use crate::models::{Duty, DutyPage};

/// Parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDutiesParams {
    pub page: i64,
    pub limit: i64,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl GetDutiesParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            sort_by: None,
            order: None,
        }
    }

    pub fn sorted(mut self, sort_by: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.order = Some(order.into());
        self
    }

    /// URL-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string());
        if let Some(sort_by) = &self.sort_by {
            query.append_pair("sortBy", sort_by);
        }
        if let Some(order) = &self.order {
            query.append_pair("order", order);
        }
        query.finish()
    }
}

#[async_trait]
pub trait DutyService: Send + Sync {
    async fn get_duties(&self, params: &GetDutiesParams) -> Result<DutyPage, ClientError>;

    async fn create_duty(&self, name: &str) -> Result<Duty, ClientError>;

    async fn update_duty(&self, id: Uuid, name: &str) -> Result<Duty, ClientError>;

    async fn delete_duty(&self, id: Uuid) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_without_sort() {
        assert_eq!(GetDutiesParams::new(2, 10).to_query_string(), "page=2&limit=10");
    }

    #[test]
    fn test_query_string_with_sort() {
        let params = GetDutiesParams::new(1, 10).sorted("name", "desc");
        assert_eq!(
            params.to_query_string(),
            "page=1&limit=10&sortBy=name&order=desc"
        );
    }
}
