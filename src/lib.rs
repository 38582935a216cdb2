//! StockDesk API Library
//!
//! Core functionality for the inventory adjustment backend: terminal-scoped
//! document numbering, configuration gating, article resolution, stock
//! existence queries, and atomic adjustment posting/reversal.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// All v1 API routes, to be nested under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/inventory-adjustments",
            handlers::adjustments::router(),
        )
        .nest("/articles", handlers::articles::router())
        .nest("/stock", handlers::stock::router())
        .merge(handlers::catalogs::router())
}
