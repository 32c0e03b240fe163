//! Normalized job record handed to the output sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting in the canonical, platform-agnostic shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJob {
    /// Posting id on the platform
    pub id: String,

    /// Normalized employment type ("Full-time", "Part-time", ...)
    #[serde(rename = "type")]
    pub job_type: String,

    pub title: String,

    /// Description HTML, empty when the platform has none
    pub description: String,

    /// Unique location names, primary location first
    pub locations: Vec<String>,

    /// First team name of the posting, or "Unknown"
    pub department: String,

    /// Organization identifier the posting was collected from
    pub company_name: String,

    pub posting_url: String,

    pub apply_url: String,

    pub published_at: Option<DateTime<Utc>>,

    pub compensation_summary: Option<String>,
}

impl NormalizedJob {
    /// Whether any location mentions remote work.
    pub fn is_remote(&self) -> bool {
        self.locations
            .iter()
            .any(|loc| loc.to_lowercase().contains("remote"))
    }
}

/// Employment types known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl EmploymentType {
    /// Map a platform value to a type. Unknown or missing values default to
    /// full-time; this is the intended policy, not a parse failure.
    pub fn from_platform(value: Option<&str>) -> Self {
        match value {
            Some("FullTime") => Self::FullTime,
            Some("PartTime") => Self::PartTime,
            Some("Contract") => Self::Contract,
            Some("Internship") => Self::Internship,
            Some("Temporary") => Self::Temporary,
            _ => Self::default(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Temporary => "Temporary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_type_mapping() {
        assert_eq!(EmploymentType::from_platform(Some("FullTime")).label(), "Full-time");
        assert_eq!(EmploymentType::from_platform(Some("PartTime")).label(), "Part-time");
        assert_eq!(EmploymentType::from_platform(Some("Contract")).label(), "Contract");
        assert_eq!(EmploymentType::from_platform(Some("Internship")).label(), "Internship");
        assert_eq!(EmploymentType::from_platform(Some("Temporary")).label(), "Temporary");
    }

    #[test]
    fn test_unknown_employment_type_defaults_to_full_time() {
        assert_eq!(EmploymentType::from_platform(Some("Weird")).label(), "Full-time");
        assert_eq!(EmploymentType::from_platform(Some("fulltime")).label(), "Full-time");
        assert_eq!(EmploymentType::from_platform(None).label(), "Full-time");
    }

    #[test]
    fn test_serializes_with_output_field_names() {
        let job = NormalizedJob {
            id: "p1".into(),
            job_type: "Full-time".into(),
            title: "Engineer".into(),
            description: String::new(),
            locations: vec!["Remote - US".into()],
            department: "Unknown".into(),
            company_name: "acme".into(),
            posting_url: "https://jobs.ashbyhq.com/acme/p1".into(),
            apply_url: "https://jobs.ashbyhq.com/acme/p1/application".into(),
            published_at: None,
            compensation_summary: None,
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["type"], "Full-time");
        assert_eq!(value["companyName"], "acme");
        assert_eq!(value["applyUrl"], "https://jobs.ashbyhq.com/acme/p1/application");
        assert!(value["publishedAt"].is_null());
        assert!(job.is_remote());
    }
}
