//! Response bodies that are not plain duty records

use serde::Serialize;

use crate::cache::CacheStats;

/// Counters of the two server-side response caches.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub lists: CacheStats,
    pub duties: CacheStats,
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "up" or "down"
    pub database: String,
    pub cache: CacheReport,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(database_up: bool, cache: CacheReport) -> Self {
        let (status, database) = if database_up {
            ("healthy", "up")
        } else {
            ("degraded", "down")
        };
        Self {
            status: status.to_string(),
            database: database.to_string(),
            cache,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
