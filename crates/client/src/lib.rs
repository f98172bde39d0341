//! Bramblefig storefront client library.
//!
//! Everything the CLI (or any other front end) needs to drive the shop
//! backend: a REST API client with bearer-token attachment, local persisted
//! stores for cart/favorites/session/checkout state, and the checkout
//! orchestration that ties them together.
//!
//! # Architecture
//!
//! - The backend is the source of truth for catalog, orders, and users;
//!   it is reached over JSON/HTTP only.
//! - Cart, favorites, session, and checkout drafts live client-side in a
//!   JSON key-value mirror on disk. The mirror is the durable copy; the
//!   in-memory stores are a cache for the running process.
//! - Construction happens once at process start through [`state::Storefront`];
//!   stores are injected, never global.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
