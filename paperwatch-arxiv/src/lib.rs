//! arXiv networking layer for paperwatch
//!
//! Fetches the daily catchup listing and parses it into paper records.

pub mod catchup;
pub mod client;
pub mod listing;

pub use catchup::*;
pub use client::*;
pub use listing::*;
