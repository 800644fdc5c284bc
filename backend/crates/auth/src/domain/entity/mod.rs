//! Domain Entities

pub mod auth_session;
