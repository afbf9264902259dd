//! HTTP handlers.

pub mod batch;
pub mod download;
pub mod health;
