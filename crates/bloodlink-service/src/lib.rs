//! # bloodlink-service
//!
//! Business logic services for BloodLink. Handlers in the API crate are
//! thin adapters over these services; every rule about the request
//! lifecycle, availability gating, rating aggregation, and donor
//! moderation lives here.

pub mod auth;
pub mod availability;
pub mod context;
pub mod donor;
pub mod request;

pub use availability::AvailabilityGate;
pub use context::RequestContext;
