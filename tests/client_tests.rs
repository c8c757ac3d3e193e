//! End-to-end tests for the API client and the management state
//!
//! Serves the router on an ephemeral port and talks to it over HTTP.

use std::sync::Arc;
use std::time::Duration;

use duty_manager::{
    api::create_router,
    client::{ApiClient, ClientError, DutyManagement, DutyService, GetDutiesParams, SortDirection},
    repository::InMemoryDutyRepository,
    AppState,
};
use tokio::net::TcpListener;
use uuid::Uuid;

// == Helper Functions ==

async fn spawn_server() -> String {
    let state = AppState::new(
        Arc::new(InMemoryDutyRepository::new()),
        Duration::from_secs(60),
        100,
    );
    let app = create_router(state, "http://localhost:3000");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

// == API Client ==

#[tokio::test]
async fn test_client_crud_roundtrip() {
    let client = ApiClient::new(spawn_server().await);

    let created = client.create_duty("Feed the cat").await.unwrap();
    assert_eq!(created.name, "Feed the cat");

    let page = client
        .get_duties(&GetDutiesParams::new(1, 10))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.duties, vec![created.clone()]);

    let updated = client.update_duty(created.id, "Feed the dog").await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(client.get_duty(created.id).await.unwrap().name, "Feed the dog");

    client.delete_duty(created.id).await.unwrap();

    let err = client.get_duty(created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Duty not found");
}

#[tokio::test]
async fn test_client_surfaces_validation_message() {
    let client = ApiClient::new(spawn_server().await);

    let err = client.create_duty("").await.unwrap_err();

    assert!(matches!(err, ClientError::Http { status: 400, .. }));
    assert_eq!(err.to_string(), "Name is required");
}

#[tokio::test]
async fn test_client_caches_single_gets_until_write() {
    let client = ApiClient::new(spawn_server().await);
    let duty = client.create_duty("Cached").await.unwrap();
    assert_eq!(client.cached_entries().await, 0);

    client.get_duty(duty.id).await.unwrap();
    client.get_duty(duty.id).await.unwrap();
    assert_eq!(client.cached_entries().await, 1);

    // List requests bypass the cache
    client
        .get_duties(&GetDutiesParams::new(1, 10))
        .await
        .unwrap();
    assert_eq!(client.cached_entries().await, 1);

    client.update_duty(duty.id, "Fresh").await.unwrap();
    assert_eq!(client.cached_entries().await, 0);
    assert_eq!(client.get_duty(duty.id).await.unwrap().name, "Fresh");

    client.delete_duty(duty.id).await.unwrap();
    assert_eq!(client.cached_entries().await, 0);
}

#[tokio::test]
async fn test_client_delete_missing_duty() {
    let client = ApiClient::new(spawn_server().await);

    let err = client.delete_duty(Uuid::new_v4()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

// == Management State over HTTP ==

#[tokio::test]
async fn test_management_flow_over_http() {
    let client = ApiClient::new(spawn_server().await);
    for i in 0..11 {
        client.create_duty(&format!("duty {:02}", i)).await.unwrap();
    }

    let mut state = DutyManagement::new(client, "?page=1");
    state.fetch().await.unwrap();
    assert_eq!(state.data().unwrap().total_count, 11);

    state
        .change_sort(Some("name"), Some(SortDirection::Ascend))
        .await
        .unwrap();
    state.change_page(2).await.unwrap();
    assert_eq!(state.query_string(), "page=2&sortBy=name&order=asc");
    let last = state.data().unwrap().duties[0].clone();
    assert_eq!(last.name, "duty 10");

    // Deleting the only row on page 2 steps back to page 1
    state.delete(last.id).await.unwrap();
    assert_eq!(state.view().page, 1);
    assert_eq!(state.data().unwrap().duties.len(), 10);

    state.show_add_modal();
    state.form_changed("duty 99");
    state.submit().await.unwrap();
    assert!(!state.is_modal_visible());
    assert_eq!(state.data().unwrap().total_count, 11);
}
