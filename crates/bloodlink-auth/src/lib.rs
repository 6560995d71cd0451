//! # bloodlink-auth
//!
//! Authentication primitives for BloodLink: JWT creation and validation,
//! Argon2id password hashing, and password policy enforcement.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
