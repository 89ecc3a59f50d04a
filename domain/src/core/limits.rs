//! Fixed bounds of the chat system.
//!
//! The rate limit window and the history caps are not configurable.

/// Maximum characters of a single inbound user message.
pub const MAX_CONTENT_CHARS: usize = 4000;

/// Maximum number of history entries sent to the inference provider.
pub const HISTORY_MAX_ENTRIES: usize = 50;

/// Maximum characters of each history entry sent to the inference provider.
pub const HISTORY_MAX_ENTRY_CHARS: usize = 4000;

/// Messages allowed per session inside the trailing rate limit window.
pub const RATE_LIMIT_MAX_MESSAGES: usize = 10;

/// Length of the trailing rate limit window.
pub const RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Maximum messages returned by a plain message listing.
pub const MESSAGE_LIST_LIMIT: usize = 100;

/// Maximum characters of a session title.
pub const MAX_TITLE_CHARS: usize = 255;

/// Title given to sessions created without one.
pub const DEFAULT_SESSION_TITLE: &str = "New Career Chat";
