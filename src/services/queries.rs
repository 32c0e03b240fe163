//! GraphQL documents for the job-board API.

/// Operation name of the listing query.
pub const JOB_BOARD_OPERATION: &str = "ApiJobBoardWithTeams";

/// Operation name of the detail query.
pub const JOB_POSTING_OPERATION: &str = "ApiJobPosting";

/// All postings and teams of one organization.
pub const JOB_BOARD_QUERY: &str = r#"
query ApiJobBoardWithTeams($organizationHostedJobsPageName: String!) {
  jobBoard: jobBoardWithTeams(
    organizationHostedJobsPageName: $organizationHostedJobsPageName
  ) {
    teams {
      id
      name
      parentTeamId
    }
    jobPostings {
      id
      title
      teamId
      locationId
      locationName
      employmentType
      secondaryLocations {
        locationId
        locationName
      }
      compensationTierSummary
    }
  }
}
"#;

/// Full detail of a single posting.
pub const JOB_POSTING_QUERY: &str = r#"
query ApiJobPosting($organizationHostedJobsPageName: String!, $jobPostingId: String!) {
  jobPosting(
    organizationHostedJobsPageName: $organizationHostedJobsPageName
    jobPostingId: $jobPostingId
  ) {
    id
    title
    teamNames
    locationName
    employmentType
    descriptionHtml
    publishedDate
  }
}
"#;
