//! # bloodlink-api
//!
//! HTTP API layer for BloodLink using Axum. Handlers are thin adapters:
//! they parse and validate input, call a service, and serialize the
//! result. All domain rules live in `bloodlink-service`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
