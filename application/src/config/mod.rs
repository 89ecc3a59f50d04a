//! Application-level configuration.
//!
//! - [`ReplyConfig`]: persona, generation parameters and polling policy
//!   used by [`GenerateReplyUseCase`](crate::use_cases::generate_reply::GenerateReplyUseCase)

pub mod reply_config;

pub use reply_config::{GenerationParams, PollPolicy, ReplyConfig};
