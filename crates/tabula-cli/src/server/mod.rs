//! HTTP API server.

pub mod app;
pub mod error;
pub mod handlers;
pub mod payload;
pub mod state;
