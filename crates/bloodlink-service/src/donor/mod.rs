//! Donor profile, search, and admin moderation operations.

pub mod admin;
pub mod service;

pub use admin::AdminDonorService;
pub use service::DonorService;
