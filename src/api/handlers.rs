//! API Handlers
//!
//! HTTP request handlers for the duties endpoints.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{DutyError, Result};
use crate::models::{CacheReport, Duty, DutyPage, DutyPayload, HealthResponse};
use crate::query::{ListQuery, PaginationParams, SortParams, DEFAULT_LIMIT, MAX_LIMIT};
use crate::repository::{DutyRepository, DEFAULT_SORT_COLUMN, SORTABLE_COLUMNS};

/// Message returned when a write carries no usable name
pub const NAME_REQUIRED: &str = "Name is required";

/// Application state shared across all handlers.
///
/// The response caches are owned by the state rather than by the process, so
/// every router (and every test) gets its own.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DutyRepository>,
    /// Cached list pages keyed by resolved paging and sorting
    pub list_cache: Arc<RwLock<TtlCache<DutyPage>>>,
    /// Cached single duties keyed by id
    pub duty_cache: Arc<RwLock<TtlCache<Duty>>>,
    /// Bumped by every successful write. A read only fills a cache when no
    /// write finished while it was querying the repository.
    write_generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(repo: Arc<dyn DutyRepository>, cache_ttl: Duration, cache_max_entries: usize) -> Self {
        Self {
            repo,
            list_cache: Arc::new(RwLock::new(TtlCache::new(cache_ttl, cache_max_entries))),
            duty_cache: Arc::new(RwLock::new(TtlCache::new(cache_ttl, cache_max_entries))),
            write_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(repo: Arc<dyn DutyRepository>, config: &Config) -> Self {
        Self::new(repo, config.cache_ttl(), config.cache_max_entries)
    }

    /// Drops every cached page and, when given, the cached copy of one duty.
    async fn invalidate_after_write(&self, id: Option<Uuid>) {
        self.write_generation.fetch_add(1, Ordering::SeqCst);
        self.list_cache.write().await.invalidate(None);
        if let Some(id) = id {
            self.duty_cache.write().await.invalidate(Some(id.to_string().as_str()));
        }
    }

    fn write_generation(&self) -> u64 {
        self.write_generation.load(Ordering::SeqCst)
    }
}

fn list_cache_key(pagination: &PaginationParams, sort: &SortParams) -> String {
    format!(
        "duties:{}:{}:{}:{}",
        pagination.limit, pagination.offset, sort.sort_by, sort.order
    )
}

/// Ids that are not UUIDs cannot exist in the table.
fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DutyError::NotFound)
}

fn required_name(payload: &Option<Json<DutyPayload>>) -> Result<String> {
    payload
        .as_ref()
        .and_then(|Json(body)| body.validated_name())
        .map(str::to_string)
        .ok_or_else(|| DutyError::Validation(NAME_REQUIRED.to_string()))
}

/// Handler for GET /duties
pub async fn list_duties(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<DutyPage>> {
    let pagination = query.pagination(DEFAULT_LIMIT, MAX_LIMIT);
    let sort = query.sort(SORTABLE_COLUMNS, DEFAULT_SORT_COLUMN);
    let key = list_cache_key(&pagination, &sort);

    if let Some(page) = state.list_cache.write().await.get(&key) {
        debug!("Serving from backend cache: {}", key);
        return Ok(Json(page));
    }

    let generation = state.write_generation();
    let page = state.repo.find_all(pagination, sort).await?;

    let mut cache = state.list_cache.write().await;
    if state.write_generation() == generation {
        cache.set(key, page.clone());
    } else {
        debug!("Write during read, not caching: {}", key);
    }

    Ok(Json(page))
}

/// Handler for GET /duties/:id
pub async fn get_duty(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Duty>> {
    let id = parse_id(&id)?;
    let key = id.to_string();

    if let Some(duty) = state.duty_cache.write().await.get(&key) {
        debug!("Serving from backend cache: duty {}", key);
        return Ok(Json(duty));
    }

    let generation = state.write_generation();
    let duty = state.repo.find_by_id(id).await?.ok_or(DutyError::NotFound)?;

    let mut cache = state.duty_cache.write().await;
    if state.write_generation() == generation {
        cache.set(key, duty.clone());
    } else {
        debug!("Write during read, not caching: duty {}", key);
    }

    Ok(Json(duty))
}

/// Handler for POST /duties
///
/// An empty or malformed body is treated like a body without a name.
pub async fn create_duty(
    State(state): State<AppState>,
    payload: Option<Json<DutyPayload>>,
) -> Result<(StatusCode, Json<Duty>)> {
    let name = required_name(&payload)?;

    let duty = state.repo.create(&name).await?;
    state.invalidate_after_write(None).await;
    info!(id = %duty.id, "Duty created");

    Ok((StatusCode::CREATED, Json(duty)))
}

/// Handler for PUT /duties/:id
pub async fn update_duty(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<DutyPayload>>,
) -> Result<Json<Duty>> {
    let name = required_name(&payload)?;
    let id = parse_id(&id)?;

    let duty = state.repo.update(id, &name).await?.ok_or(DutyError::NotFound)?;
    state.invalidate_after_write(Some(id)).await;
    info!(id = %duty.id, "Duty updated");

    Ok(Json(duty))
}

/// Handler for DELETE /duties/:id
pub async fn delete_duty(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_id(&id)?;

    let removed = state.repo.remove(id).await?;
    if removed == 0 {
        return Err(DutyError::NotFound);
    }

    state.invalidate_after_write(Some(id)).await;
    info!(id = %id, "Duty deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /
pub async fn root_handler() -> &'static str {
    "Hello from the backend!"
}

/// Handler for GET /health
///
/// Reports 503 when the database cannot be reached.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_up = match state.repo.health_check().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "Health check failed");
            false
        }
    };

    let cache = CacheReport {
        lists: state.list_cache.read().await.stats(),
        duties: state.duty_cache.read().await.stats(),
    };
    let response = HealthResponse::new(database_up, cache);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
