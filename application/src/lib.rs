//! Application layer for career-counsel
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GenerationParams, PollPolicy, ReplyConfig};
pub use error::ChatError;
pub use ports::{
    clock::Clock,
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    conversation_store::{ConversationStore, StoreError},
    prediction_provider::{
        Prediction, PredictionProvider, PredictionRequest, PredictionStatus, ProviderError,
    },
};
pub use use_cases::generate_reply::{GenerateReplyUseCase, ReplyError, ReplyGenerator};
pub use use_cases::prediction_poll::{InferenceError, PollState};
pub use use_cases::session_directory::{SessionDetail, SessionDirectory};
pub use use_cases::submit_turn::{SubmitTurnInput, SubmitTurnUseCase, TurnOutcome};
