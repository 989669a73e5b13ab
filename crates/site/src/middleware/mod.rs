//! HTTP middleware configuration.

pub mod session;
