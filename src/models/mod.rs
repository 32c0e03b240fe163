// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod board;
mod config;
mod job;
mod posting;
mod stats;

// Re-export all public types
pub use board::{BoardEntry, BoardEntryConfig, BoardRequest, RunInput};
pub use config::{ClientConfig, Config, OutputConfig};
pub use job::{EmploymentType, NormalizedJob};
pub use posting::{
    JobBoard, PostingBrief, PostingDetail, SecondaryLocation, Team, parse_published_date,
};
pub use stats::{BoardOutcome, BoardStatus, RunSummary};
