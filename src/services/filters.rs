//! Posting filters.
//!
//! Team and count filters run on listing briefs, before any detail fetch.
//! The publish-date filter needs the detail data and runs on normalized jobs.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::models::{BoardRequest, JobBoard, NormalizedJob, PostingBrief};

/// Keep postings whose team id is one of `teams`. An empty set keeps all.
///
/// Matching is exact on the team id; child teams of a listed team are not
/// included.
pub fn filter_by_team(postings: Vec<PostingBrief>, teams: &HashSet<String>) -> Vec<PostingBrief> {
    if teams.is_empty() {
        return postings;
    }
    postings
        .into_iter()
        .filter(|p| p.team_id.as_ref().is_some_and(|id| teams.contains(id)))
        .collect()
}

/// Keep the first `max_jobs` postings, in listing order.
pub fn limit(mut postings: Vec<PostingBrief>, max_jobs: Option<usize>) -> Vec<PostingBrief> {
    if let Some(max) = max_jobs {
        postings.truncate(max);
    }
    postings
}

/// Pre-detail selection: team filter, then count limit.
pub fn select_postings(postings: Vec<PostingBrief>, request: &BoardRequest) -> Vec<PostingBrief> {
    limit(filter_by_team(postings, &request.team_filters), request.max_jobs)
}

/// Whether `job` was published on or after `now - days_back` days.
///
/// Jobs without a publish date always pass. A window reaching past the
/// earliest representable date has no lower bound.
pub fn within_date_range(job: &NormalizedJob, days_back: Option<u32>, now: DateTime<Utc>) -> bool {
    match (days_back, job.published_at) {
        (Some(days), Some(published)) => match date_cutoff(days, now) {
            Some(cutoff) => published >= cutoff,
            None => true,
        },
        _ => true,
    }
}

/// `now - days` days, or `None` when out of range.
fn date_cutoff(days: u32, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Duration::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
}

/// Team filter ids that do not name any team of the board, sorted.
pub fn unknown_team_filters<'a>(board: &JobBoard, filters: &'a HashSet<String>) -> Vec<&'a str> {
    let mut unknown: Vec<&str> = filters
        .iter()
        .filter(|id| board.team(id).is_none())
        .map(String::as_str)
        .collect();
    unknown.sort_unstable();
    unknown
}
