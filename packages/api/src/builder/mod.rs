//! Agent builder API modules
//!
//! Provides the fluent API for assembling proxy configuration and resolving
//! it into a connection agent.

pub mod auth;
pub mod core;
pub mod tls;

// Re-export all public types for convenience
pub use core::*;
