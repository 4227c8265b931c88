//! Core types for TomatoMall.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;
pub mod time;

pub use id::*;
pub use price::{Price, PriceError};
pub use status::*;
pub use time::Timestamp;
