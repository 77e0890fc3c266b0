//! SurfsUp: a read-only climate API over the Hawaii weather observations.
//!
//! - [`db`]: repository traits with SQLite (Diesel) and in-memory backends
//! - [`services`]: one operation per route
//! - [`routes`]: landing text and response shaping
//! - [`http`]: the axum router (feature `http-server`)

#![allow(clippy::result_large_err)]

pub mod api;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
