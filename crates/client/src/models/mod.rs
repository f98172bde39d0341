//! Wire and domain types for the shop backend.
//!
//! Field names follow the backend's JSON exactly (`_id`, `countInStock`,
//! `taxPrice`, ...) via serde renames; Rust code sees snake_case.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderDraft, OrderItem, OrderUser, ShippingAddress};
pub use product::{CategoryList, Product, ProductPage, Review};
pub use user::{UserSession, UserSummary};
