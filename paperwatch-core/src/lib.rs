//! paperwatch core - domain model for the daily arXiv digest
//!
//! This crate provides the foundational pieces:
//! - Keyword rules with weights, loaded from a user-maintained file
//! - The relevance scorer (weight sum + threshold cut)
//! - Digest rendering (Slack mrkdwn and plain markdown)
//! - Registry of known arXiv archives

pub mod archives;
pub mod digest;
pub mod keywords;
pub mod paper;
pub mod scorer;

pub use archives::*;
pub use digest::*;
pub use keywords::*;
pub use paper::*;
pub use scorer::*;

/// Base URL for paper abstract links
pub const ABS_URL_BASE: &str = "https://arxiv.org/abs";

/// Relevance threshold used when the configuration leaves it unset
pub const DEFAULT_THRESHOLD: i32 = 5;

/// Author lists longer than this are truncated in the digest
pub const MAX_DISPLAY_AUTHORS: usize = 10;
