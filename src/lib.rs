//! Property listing search service
//!
//! - **`search`**: turns loosely typed query parameters into a filter, a sort
//!   order and a page window, and executes them against a [`search::PropertyStore`].
//! - **`store`**: in-memory store implementing the store contract.
//! - **`api`**: axum routes for searching and managing listings.
//! - **`seed`**: loading listing fixtures from disk or over HTTP.
//! - **`models`**, **`config`**, **`error`**: shared types.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod seed;
pub mod store;
