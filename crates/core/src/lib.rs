//! Bramblefig Core - Shared types library.
//!
//! This crate provides common types used across all Bramblefig components:
//! - `client` - Storefront client library (local stores, REST API)
//! - `cli` - Command-line storefront interface
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and
//!   payment methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
