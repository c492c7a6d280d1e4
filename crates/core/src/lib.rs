//! Tranquil Core - Shared types library.
//!
//! This crate provides the types used across all Tranquil components:
//! - `api` - REST backend for the shop, bookings and sound library
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types, schemas and validation rules - no I/O,
//! no database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, account fields and statuses
//! - [`models`] - Entity records and their insert schemas
//! - [`validation`] - Itemized validation issues shared by every write schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::{Issue, IssueCode};
