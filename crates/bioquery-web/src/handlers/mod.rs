//! HTTP handlers for all web routes.

pub mod export;
pub mod health;
pub mod home;
pub mod query;
