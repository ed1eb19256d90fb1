//! # viaduct agent
//!
//! Client-side connection agent for non-transparent forward HTTP proxies.
//! Given an outgoing request and the origin it should reach, the agent dials
//! the configured proxy instead of the origin, rewrites the request target
//! into the absolute form the proxy routes by, injects `Proxy-Authorization`,
//! reconciles pre-serialized header buffers, and hands the connected socket
//! back to the calling HTTP pipeline.
//!
//! ## Features
//!
//! - **Flexible configuration**: proxy URI strings, parsed URLs, structured
//!   config, or `HTTP_PROXY`-style environment variables
//! - **Absolute-form rewriting** with Basic credential injection
//! - **Rustls TLS** with native root certificates
//! - **Idle timeout** enforcement with graceful half-close
//! - **Head-buffer patching** for both write-queue shapes
//!
//! This crate is the implementation; the `viaduct` package re-exports it
//! behind a fluent construction surface.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

// Core modules
pub mod connect;
pub mod error;
pub mod http;
pub mod proxy;

// Prelude with canonical types
pub mod prelude;

// Essential public API - only what embedders actually need
pub use crate::prelude::*;
