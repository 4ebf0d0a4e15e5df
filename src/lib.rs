//! # Scout
//!
//! An interactive CLI assistant for web search with optional
//! Gemini-powered summarisation.
//!
//! ## Features
//!
//! - **Self-healing loop**: provider failures are logged and the session
//!   keeps going; only `exit` or end of input stops it
//! - **Rank-faithful results**: the provider's ordering is preserved from
//!   API response to terminal
//! - **Consistent rendering**: summaries and raw listings share one
//!   markdown-to-terminal formatter

pub mod agent;
pub mod config;
pub mod repl;
pub mod search;
pub mod summary;
pub mod ui;

pub use agent::{GeminiClient, GenerationProvider};
pub use config::Config;
pub use repl::Repl;
pub use search::{SearchClient, SearchProvider, SearchResult};
pub use summary::Analysis;
