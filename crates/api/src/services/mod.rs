//! Business logic that sits between routes and storage.
//!
//! # Services
//!
//! - `accounts` - User registration with Argon2id password hashing
//! - `recommendations` - Rule-based wellness suggestions

pub mod accounts;
pub mod recommendations;
