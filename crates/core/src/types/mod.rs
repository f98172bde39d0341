//! Core types for Bramblefig.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod payment;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{format_usd, round_money};
pub use payment::{PaymentMethod, PaymentMethodError};
