// src/pipeline/scrape.rs

//! Board scraping pipeline.
//!
//! Per board request: extract the organization, fetch the listing, select
//! postings (team filter, then limit), fetch each detail, normalize, apply the
//! date filter and accumulate. Boards are processed one after another; a
//! failing board or posting only removes itself from the result.

use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{
    BoardOutcome, BoardRequest, BoardStatus, ClientConfig, Config, NormalizedJob, PostingBrief,
    RunSummary,
};
use crate::services::filters::{select_postings, unknown_team_filters, within_date_range};
use crate::services::{JobBoardApi, Normalizer};
use crate::storage::JobSink;
use crate::utils::extract_organization;

/// Jobs collected by a run, in processing order, with the run statistics.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub jobs: Vec<NormalizedJob>,
    pub summary: RunSummary,
}

/// Orchestrates listing, filtering, detail fetching and normalization.
pub struct BoardScraper<'a> {
    api: &'a dyn JobBoardApi,
    normalizer: Normalizer,
    board_host: String,
    request_delay: Duration,
    concurrency: usize,
}

impl<'a> BoardScraper<'a> {
    /// Create a scraper using the host, spacing and concurrency of `config`.
    pub fn new(api: &'a dyn JobBoardApi, config: &ClientConfig) -> Self {
        Self {
            api,
            normalizer: Normalizer::new(&config.board_host),
            board_host: config.board_host.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
            concurrency: config.max_concurrent.max(1),
        }
    }

    /// Scrape every board in order.
    pub async fn scrape_all(&self, requests: &[BoardRequest]) -> ScrapeOutcome {
        let start_time = Utc::now();
        let mut jobs = Vec::new();
        let mut boards = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = self.scrape_board(request, &mut jobs).await;
            log::info!(
                "Board {}: {} ({} of {} selected posting(s) collected)",
                outcome.organization.as_deref().unwrap_or(&request.url),
                outcome.status,
                outcome.collected,
                outcome.selected
            );
            boards.push(outcome);
        }

        let remote_count = jobs.iter().filter(|job| job.is_remote()).count();
        let summary = RunSummary {
            start_time,
            end_time: Utc::now(),
            job_count: jobs.len(),
            remote_count,
            boards,
        };

        ScrapeOutcome { jobs, summary }
    }

    /// Scrape one board, appending its jobs to `jobs`.
    pub async fn scrape_board(
        &self,
        request: &BoardRequest,
        jobs: &mut Vec<NormalizedJob>,
    ) -> BoardOutcome {
        if let Some(reason) = &request.rejection {
            let error = AppError::config(reason.as_str());
            log::warn!("{}", error);
            return BoardOutcome::skipped(&request.url, None, error);
        }

        let Some(organization) = extract_organization(&request.url, &self.board_host) else {
            let error = AppError::config(format!(
                "Invalid board URL: {} (expected format: https://{}/company-name)",
                request.url, self.board_host
            ));
            log::warn!("{}", error);
            return BoardOutcome::skipped(&request.url, None, error);
        };

        log::info!("Scraping: {}", organization);
        if !request.team_filters.is_empty() {
            log::info!("  Team filters: {} team(s)", request.team_filters.len());
        }
        if let Some(days) = request.days_back {
            log::info!("  Date filter: last {} days", days);
        }

        let board = match self.api.fetch_job_board(&organization).await {
            Ok(board) => board,
            Err(error) => {
                log::warn!("Error scraping {}: {}", organization, error);
                return BoardOutcome::skipped(&request.url, Some(organization.as_str()), error);
            }
        };

        let mut outcome = BoardOutcome {
            url: request.url.clone(),
            organization: Some(organization.clone()),
            status: BoardStatus::Completed,
            selected: 0,
            collected: 0,
            failed: 0,
            date_filtered: 0,
        };

        if board.is_empty() {
            log::info!(
                "  No jobs found for {} (company may have no active postings)",
                organization
            );
            outcome.status = BoardStatus::Empty;
            return outcome;
        }

        let unknown = unknown_team_filters(&board, &request.team_filters);
        if !unknown.is_empty() {
            log::warn!(
                "  Team filter(s) not found on {}: {}",
                organization,
                unknown.join(", ")
            );
        }

        let selected = select_postings(board.job_postings, request);
        outcome.selected = selected.len();
        log::info!("  Found {} job(s) after filtering", selected.len());

        self.collect_postings(&organization, selected, request.days_back, &mut outcome, jobs)
            .await;
        outcome
    }

    /// Fetch details for the selected postings and accumulate the jobs that
    /// pass the date filter, in listing order.
    async fn collect_postings(
        &self,
        organization: &str,
        selected: Vec<PostingBrief>,
        days_back: Option<u32>,
        outcome: &mut BoardOutcome,
        jobs: &mut Vec<NormalizedJob>,
    ) {
        let total = selected.len();
        let now = Utc::now();

        // `buffered` yields in input order, so results re-join listing order
        // whatever the concurrency.
        let mut details = stream::iter(selected.iter().enumerate())
            .map(|(index, brief)| async move {
                (index, brief, self.fetch_job(organization, brief).await)
            })
            .buffered(self.concurrency);

        let mut processed = 0;
        while let Some((index, brief, result)) = details.next().await {
            processed += 1;
            match result {
                Ok(job) => {
                    if within_date_range(&job, days_back, now) {
                        jobs.push(job);
                        outcome.collected += 1;
                    } else {
                        log::debug!("  [{}/{}] {} outside date range", index + 1, total, brief.id);
                        outcome.date_filtered += 1;
                    }
                }
                Err(error) => {
                    outcome.failed += 1;
                    log::warn!(
                        "  Error fetching details for job {}: {}",
                        brief.id,
                        error
                    );
                }
            }

            if processed < total && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }
    }

    async fn fetch_job(&self, organization: &str, brief: &PostingBrief) -> Result<NormalizedJob> {
        let detail = self.api.fetch_job_posting(organization, &brief.id).await?;
        if detail.id != brief.id {
            return Err(AppError::validation(format!(
                "detail for posting {} came back with id {}",
                brief.id, detail.id
            )));
        }
        Ok(self.normalizer.normalize(brief, &detail, organization))
    }
}

/// Run the full scrape and hand the collected jobs to `sink`.
pub async fn run_scraper(
    config: &Config,
    api: &dyn JobBoardApi,
    sink: &dyn JobSink,
    requests: &[BoardRequest],
) -> Result<RunSummary> {
    if requests.is_empty() {
        return Err(AppError::config("No board URLs provided"));
    }

    log::info!("Scraping {} board(s)...", requests.len());
    let scraper = BoardScraper::new(api, &config.client);
    let outcome = scraper.scrape_all(requests).await;

    let metadata = sink.write_jobs(&outcome.jobs, &outcome.summary).await?;
    log::info!(
        "Saved {} job(s) to {} at {}",
        metadata.job_count,
        metadata.location,
        metadata.timestamp.to_rfc3339()
    );

    let summary = outcome.summary;
    log::info!(
        "Scraping complete! Processed {} job(s) from {} board(s)",
        summary.job_count,
        summary.board_total()
    );
    log::info!(
        "  Boards: {} completed, {} empty, {} skipped",
        summary.boards_completed(),
        summary.boards_empty(),
        summary.boards_skipped()
    );
    log::info!(
        "  Postings: {} selected, {} failed, {} outside date range, {} remote",
        summary.postings_selected(),
        summary.postings_failed(),
        summary.postings_date_filtered(),
        summary.remote_count
    );

    Ok(summary)
}
