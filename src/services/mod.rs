//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Listing and detail API calls (`AshbyClient`, behind `JobBoardApi`)
//! - Posting filters (`filters`)
//! - Record normalization (`Normalizer`)

mod client;
pub mod filters;
mod normalizer;
pub mod queries;

pub use client::{AshbyClient, JobBoardApi};
pub use normalizer::{Normalizer, UNKNOWN_DEPARTMENT};
