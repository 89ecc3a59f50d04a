//! Prompt domain
//!
//! The counselor persona that is always sent as the first system message.

pub mod persona;
