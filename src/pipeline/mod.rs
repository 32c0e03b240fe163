//! Pipeline entry points for crawler operations.
//!
//! - `run_scraper`: Collect and normalize postings from all configured boards
//! - `run_validate`: Check configuration and board URLs offline

pub mod scrape;
pub mod validate;

pub use scrape::{BoardScraper, ScrapeOutcome, run_scraper};
pub use validate::run_validate;
