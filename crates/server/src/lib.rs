//! Order Desk server library.
//!
//! This crate provides the client/order service as a library, allowing the
//! router to be driven in-process by tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
