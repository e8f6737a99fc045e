//! Full-stack todo list: an axum JSON API over a single SQLite table,
//! an htmx-driven UI rendered with maud, and a typed RPC client that
//! programs against the same [`TodoRpc`] boundary the server implements.

mod config;
mod db;
mod handlers;
mod host;
mod result;
mod rpc;
mod schema;
mod ui;

pub mod client;

pub use client::*;
pub use config::*;
pub use db::*;
pub use handlers::*;
pub use host::*;
pub use result::*;
pub use rpc::*;
pub use schema::*;
pub use ui::*;

pub use async_trait::async_trait;
pub use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, delete, get, patch, post, put},
    Json, Router,
};
pub use chrono::{DateTime, Duration, Utc};
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
pub use once_cell::sync::Lazy;
pub use serde::{Deserialize, Serialize};
pub use serde_json::json;
pub use std::{env, sync::Arc};
pub use tokio::sync::RwLock;
pub use tower::ServiceBuilder;
pub use tracing::{debug, error, info, trace, warn};
