//! API Module
//!
//! HTTP handlers and routing for the duties REST API.
//!
//! # Endpoints
//! - `GET /duties?page&limit&sortBy&order` - List duties
//! - `GET /duties/:id` - Fetch a duty
//! - `POST /duties` - Create a duty
//! - `PUT /duties/:id` - Rename a duty
//! - `DELETE /duties/:id` - Delete a duty
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, create_router};
