//! Order Desk Core - Shared domain types.
//!
//! This crate provides the validated types used across all Order Desk components:
//! - `server` - REST service for clients and orders
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and their validation rules - no I/O, no
//! database access, no HTTP. Database encoding is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for client/order IDs, emails, totals and order details

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
