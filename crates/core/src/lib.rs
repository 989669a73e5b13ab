//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across the Bazaar site server:
//! type-safe entity IDs, the review moderation status, the slug derivation
//! rule, and the cart value type.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod slug;
pub mod types;

pub use cart::{Cart, CartKey, CartLine};
pub use slug::slugify;
pub use types::*;
