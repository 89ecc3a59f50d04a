//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate_reply;
pub mod prediction_poll;
pub mod session_directory;
pub(crate) mod shared;
pub mod submit_turn;

#[cfg(test)]
pub(crate) mod test_support;
