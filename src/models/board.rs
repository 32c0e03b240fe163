//! Board requests and the input entries they are resolved from.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Input document listing the boards to crawl.
///
/// ```json
/// { "urls": ["https://jobs.ashbyhq.com/acme", { "url": "...", "maxJobs": 5 }] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInput {
    #[serde(default, alias = "requestListSources")]
    pub urls: Vec<BoardEntry>,
}

impl RunInput {
    /// Load the input document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Append bare board URLs (e.g. from the command line).
    pub fn extend_urls<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls
            .extend(urls.into_iter().map(|u| BoardEntry::Url(u.into())));
    }

    /// Resolve every entry into a canonical [`BoardRequest`].
    ///
    /// An input without any entry is a configuration error: there is nothing
    /// to process. A malformed entry still yields a request, rejected with
    /// its reason, so the other entries are unaffected.
    pub fn into_requests(self) -> Result<Vec<BoardRequest>> {
        if self.urls.is_empty() {
            return Err(AppError::config(
                "No board URLs provided. Add job board URLs to the \"urls\" field.",
            ));
        }
        Ok(self.urls.into_iter().map(BoardEntry::into_request).collect())
    }
}

/// A single input entry: a bare URL or an object with filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardEntry {
    Url(String),
    Detailed(BoardEntryConfig),
    /// Anything else; kept so it can be reported on its own
    Invalid(Value),
}

/// Object form of an input entry, aliases included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntryConfig {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,

    /// Alias of `teams`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_jobs: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_back: Option<i64>,
}

impl BoardEntry {
    /// Normalize aliases and zero/negative limits into the canonical request.
    pub fn into_request(self) -> BoardRequest {
        match self {
            BoardEntry::Url(url) => BoardRequest::new(url),
            BoardEntry::Detailed(config) => {
                let teams = config.teams.or(config.departments).unwrap_or_default();
                BoardRequest {
                    url: config.url,
                    team_filters: teams.into_iter().collect(),
                    max_jobs: positive(config.max_jobs)
                        .map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
                    days_back: positive(config.days_back)
                        .map(|n| u32::try_from(n).unwrap_or(u32::MAX)),
                    rejection: None,
                }
            }
            BoardEntry::Invalid(value) => {
                let url = value
                    .get("url")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                let reason = match serde_json::from_value::<BoardEntryConfig>(value) {
                    Err(e) => format!("Malformed board entry {url}: {e}"),
                    Ok(_) => format!("Malformed board entry {url}"),
                };
                BoardRequest::rejected(url, reason)
            }
        }
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|n| *n > 0)
}

/// One job board to crawl, with its filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRequest {
    /// Public board URL (`https://{host}/{organization}`)
    pub url: String,

    /// Team ids to keep; empty keeps every team
    pub team_filters: HashSet<String>,

    /// Keep only the first N postings after team filtering
    pub max_jobs: Option<usize>,

    /// Keep only postings published within the last N days
    pub days_back: Option<u32>,

    /// Why the input entry could not be resolved; such a request is skipped
    pub rejection: Option<String>,
}

impl BoardRequest {
    /// Request with no filters.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            team_filters: HashSet::new(),
            max_jobs: None,
            days_back: None,
            rejection: None,
        }
    }

    /// Request standing in for an input entry that could not be resolved.
    pub fn rejected(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            rejection: Some(reason.into()),
            ..Self::new(url)
        }
    }

    pub fn with_teams<I, S>(mut self, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.team_filters = teams.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = Some(max_jobs);
        self
    }

    pub fn with_days_back(mut self, days_back: u32) -> Self {
        self.days_back = Some(days_back);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_url_entry_has_no_filters() {
        let input: RunInput =
            serde_json::from_str(r#"{"urls": ["https://jobs.ashbyhq.com/acme"]}"#).unwrap();
        let requests = input.into_requests().unwrap();
        assert_eq!(requests, vec![BoardRequest::new("https://jobs.ashbyhq.com/acme")]);
    }

    #[test]
    fn test_object_entry_resolves_departments_alias() {
        let input: RunInput = serde_json::from_str(
            r#"{"urls": [{"url": "https://jobs.ashbyhq.com/acme", "departments": ["t1", "t2"], "maxJobs": 3, "daysBack": 30}]}"#,
        )
        .unwrap();
        let request = input.into_requests().unwrap().remove(0);
        assert_eq!(request.team_filters.len(), 2);
        assert!(request.team_filters.contains("t1"));
        assert_eq!(request.max_jobs, Some(3));
        assert_eq!(request.days_back, Some(30));
    }

    #[test]
    fn test_teams_wins_over_departments() {
        let entry = BoardEntry::Detailed(BoardEntryConfig {
            url: "https://jobs.ashbyhq.com/acme".into(),
            teams: Some(vec!["eng".into()]),
            departments: Some(vec!["sales".into()]),
            ..Default::default()
        });
        let request = entry.into_request();
        assert!(request.team_filters.contains("eng"));
        assert!(!request.team_filters.contains("sales"));
    }

    #[test]
    fn test_zero_limits_resolve_to_absent() {
        let entry = BoardEntry::Detailed(BoardEntryConfig {
            url: "https://jobs.ashbyhq.com/acme".into(),
            max_jobs: Some(0),
            days_back: Some(-4),
            ..Default::default()
        });
        let request = entry.into_request();
        assert_eq!(request.max_jobs, None);
        assert_eq!(request.days_back, None);
    }

    #[test]
    fn test_oversized_limits_saturate() {
        let entry = BoardEntry::Detailed(BoardEntryConfig {
            url: "https://jobs.ashbyhq.com/acme".into(),
            days_back: Some(4_294_967_297),
            ..Default::default()
        });
        assert_eq!(entry.into_request().days_back, Some(u32::MAX));
    }

    #[test]
    fn test_malformed_entry_does_not_reject_others() {
        let input: RunInput = serde_json::from_str(
            r#"{"urls": [
                "https://jobs.ashbyhq.com/good",
                {"teams": ["t1"]},
                {"url": "https://jobs.ashbyhq.com/typed", "maxJobs": "3"},
                {"url": "https://jobs.ashbyhq.com/other", "maxJobs": 3}
            ]}"#,
        )
        .unwrap();
        let requests = input.into_requests().unwrap();

        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].rejection, None);
        assert!(requests[1].rejection.as_deref().unwrap().contains("url"));
        assert_eq!(requests[2].url, "https://jobs.ashbyhq.com/typed");
        assert!(requests[2].rejection.is_some());
        assert_eq!(requests[3].rejection, None);
        assert_eq!(requests[3].max_jobs, Some(3));
    }

    #[test]
    fn test_request_list_sources_alias() {
        let input: RunInput = serde_json::from_str(
            r#"{"requestListSources": ["https://jobs.ashbyhq.com/a", "https://jobs.ashbyhq.com/b"]}"#,
        )
        .unwrap();
        assert_eq!(input.into_requests().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_input_is_config_error() {
        let result = RunInput::default().into_requests();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_extend_urls_appends_bare_entries() {
        let mut input = RunInput::default();
        input.extend_urls(["https://jobs.ashbyhq.com/acme"]);
        let requests = input.into_requests().unwrap();
        assert_eq!(requests[0].url, "https://jobs.ashbyhq.com/acme");
        assert!(requests[0].team_filters.is_empty());
    }
}
