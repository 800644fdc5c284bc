//! Shared Kernel - Vocabulary shared by every bounded context
//!
//! This crate holds the parts that the `auth` and `milk` contexts must agree on:
//! - The unified [`error::app_error::AppError`] and its HTTP mapping
//! - Typed record identifiers ([`id::Id`])
//!
//! Nothing domain specific lives here. Ledger rules belong to `milk`,
//! session rules belong to `auth`.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
