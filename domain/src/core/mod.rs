//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level validation errors
//! - [`limits`]: fixed numeric bounds of the chat system

pub mod error;
pub mod limits;
