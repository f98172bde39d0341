//! CLI command implementations, one module per resource.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod orders;
pub mod products;
