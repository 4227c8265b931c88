//! TomatoMall Core - Shared types library.
//!
//! This crate provides common types used across all TomatoMall client components:
//! - `client` - Typed REST client for the TomatoMall API
//! - `cli` - Command-line front end driving the client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, roles, statuses and timestamps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
