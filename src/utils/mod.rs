//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use self::url::{apply_url, extract_organization, posting_url};
