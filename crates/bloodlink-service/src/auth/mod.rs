//! Account registration and authentication flows.

pub mod service;

pub use service::{AuthService, LoginResult, SignupData};
