//! Merge a listing brief and its detail into a [`NormalizedJob`].

use crate::models::{EmploymentType, NormalizedJob, PostingBrief, PostingDetail};
use crate::utils::url::{apply_url, posting_url};

/// Department used when a posting has no team name.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Builds normalized records for one board host.
#[derive(Debug, Clone)]
pub struct Normalizer {
    board_host: String,
}

impl Normalizer {
    pub fn new(board_host: impl Into<String>) -> Self {
        Self {
            board_host: board_host.into(),
        }
    }

    /// Pure mapping of `(brief, detail, organization)` to a record.
    ///
    /// `brief` and `detail` must describe the same posting; callers check the
    /// ids before calling.
    pub fn normalize(
        &self,
        brief: &PostingBrief,
        detail: &PostingDetail,
        organization: &str,
    ) -> NormalizedJob {
        debug_assert_eq!(brief.id, detail.id, "brief and detail ids differ");

        let posting_url = posting_url(&self.board_host, organization, &brief.id);
        let employment_type = brief
            .employment_type
            .as_deref()
            .or(detail.employment_type.as_deref());

        NormalizedJob {
            id: brief.id.clone(),
            job_type: EmploymentType::from_platform(employment_type)
                .label()
                .to_string(),
            title: brief.title.clone(),
            description: detail.description_html.clone().unwrap_or_default(),
            locations: collect_locations(brief),
            department: department(detail),
            company_name: organization.to_string(),
            apply_url: apply_url(&posting_url),
            posting_url,
            published_at: detail.published_date,
            compensation_summary: brief.compensation_tier_summary.clone(),
        }
    }
}

/// Primary location first, then secondary locations not already listed.
fn collect_locations(brief: &PostingBrief) -> Vec<String> {
    let mut locations: Vec<String> = Vec::with_capacity(1 + brief.secondary_locations.len());
    let names = std::iter::once(brief.location_name.as_str())
        .chain(brief.secondary_locations.iter().map(|l| l.location_name.as_str()));

    for name in names {
        if !name.is_empty() && !locations.iter().any(|l| l == name) {
            locations.push(name.to_string());
        }
    }
    locations
}

fn department(detail: &PostingDetail) -> String {
    detail
        .team_names
        .first()
        .filter(|name| !name.is_empty())
        .cloned()
        .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string())
}
