//! bioquery-web — browser front end for the upstream research API.
//!
//! Serves the query form, proxies submissions to the upstream
//! aggregation backend, keeps the single in-memory result, and exposes
//! the export downloads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod upstream;
pub mod view;
