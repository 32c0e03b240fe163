//! Per-board outcomes and the run summary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal state of one board request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoardStatus {
    /// Every selected posting was attempted
    Completed,
    /// Listing succeeded but the organization has no active postings
    Empty,
    /// Identifier extraction or the listing call failed
    Skipped { reason: String },
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardStatus::Completed => write!(f, "completed"),
            BoardStatus::Empty => write!(f, "empty"),
            BoardStatus::Skipped { reason } => write!(f, "skipped ({reason})"),
        }
    }
}

/// What happened to one board request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardOutcome {
    pub url: String,
    pub organization: Option<String>,
    #[serde(flatten)]
    pub status: BoardStatus,
    /// Postings left after team filter and limit
    pub selected: usize,
    /// Postings normalized and kept
    pub collected: usize,
    /// Postings whose detail fetch or normalization failed
    pub failed: usize,
    /// Postings dropped by the publish-date filter
    pub date_filtered: usize,
}

impl BoardOutcome {
    pub fn skipped(url: &str, organization: Option<&str>, reason: impl fmt::Display) -> Self {
        Self {
            url: url.to_string(),
            organization: organization.map(str::to_string),
            status: BoardStatus::Skipped {
                reason: reason.to_string(),
            },
            selected: 0,
            collected: 0,
            failed: 0,
            date_filtered: 0,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, BoardStatus::Skipped { .. })
    }
}

/// Statistics of a full run, written next to the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub boards: Vec<BoardOutcome>,
    pub job_count: usize,
    pub remote_count: usize,
}

impl RunSummary {
    pub fn board_total(&self) -> usize {
        self.boards.len()
    }

    pub fn boards_completed(&self) -> usize {
        self.count_status(|s| matches!(s, BoardStatus::Completed))
    }

    pub fn boards_empty(&self) -> usize {
        self.count_status(|s| matches!(s, BoardStatus::Empty))
    }

    pub fn boards_skipped(&self) -> usize {
        self.count_status(|s| matches!(s, BoardStatus::Skipped { .. }))
    }

    pub fn postings_selected(&self) -> usize {
        self.boards.iter().map(|b| b.selected).sum()
    }

    pub fn postings_failed(&self) -> usize {
        self.boards.iter().map(|b| b.failed).sum()
    }

    pub fn postings_date_filtered(&self) -> usize {
        self.boards.iter().map(|b| b.date_filtered).sum()
    }

    fn count_status(&self, pred: impl Fn(&BoardStatus) -> bool) -> usize {
        self.boards.iter().filter(|b| pred(&b.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: BoardStatus, selected: usize, collected: usize, failed: usize) -> BoardOutcome {
        BoardOutcome {
            url: "https://jobs.ashbyhq.com/acme".into(),
            organization: Some("acme".into()),
            status,
            selected,
            collected,
            failed,
            date_filtered: selected - collected - failed,
        }
    }

    #[test]
    fn test_summary_counts() {
        let now = Utc::now();
        let summary = RunSummary {
            start_time: now,
            end_time: now,
            boards: vec![
                outcome(BoardStatus::Completed, 3, 2, 1),
                outcome(BoardStatus::Empty, 0, 0, 0),
                BoardOutcome::skipped("https://example.com", None, "no organization"),
                outcome(BoardStatus::Completed, 4, 2, 0),
            ],
            job_count: 4,
            remote_count: 1,
        };
        assert_eq!(summary.board_total(), 4);
        assert_eq!(summary.boards_completed(), 2);
        assert_eq!(summary.boards_empty(), 1);
        assert_eq!(summary.boards_skipped(), 1);
        assert_eq!(summary.postings_selected(), 7);
        assert_eq!(summary.postings_failed(), 1);
        assert_eq!(summary.postings_date_filtered(), 2);
    }

    #[test]
    fn test_status_serializes_flat() {
        let skipped = BoardOutcome::skipped("u", Some("acme"), "API error");
        let value = serde_json::to_value(&skipped).unwrap();
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["reason"], "API error");
        assert_eq!(value["organization"], "acme");
        assert_eq!(BoardStatus::Empty.to_string(), "empty");
    }
}
