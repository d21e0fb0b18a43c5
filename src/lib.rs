//! Client library for the Courtside academy backend.
//!
//! Wraps the public REST endpoints behind [`api::BackendClient`] and builds
//! the site's two load-bearing flows on top of it: catalog grouping
//! ([`services::catalog`]) and post-payment confirmation polling
//! ([`services::confirmation`]).

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
