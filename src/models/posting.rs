//! Listing and detail records as returned by the job-board API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A team (department) of an organization. Teams form a forest through
/// `parent_team_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_team_id: Option<String>,
}

/// Result of the listing call: all teams and postings of one organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<Team>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_postings: Vec<PostingBrief>,
}

impl JobBoard {
    pub fn is_empty(&self) -> bool {
        self.job_postings.is_empty()
    }

    /// Look up a team by exact id.
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }
}

/// Lightweight posting from the listing call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostingBrief {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_name: String,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secondary_locations: Vec<SecondaryLocation>,
    #[serde(default)]
    pub compensation_tier_summary: Option<String>,
}

/// Additional location of a posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryLocation {
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_name: String,
}

/// Full posting from the detail call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostingDetail {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_names: Vec<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub description_html: Option<String>,
    #[serde(default, deserialize_with = "published_date")]
    pub published_date: Option<DateTime<Utc>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn published_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_published_date))
}

/// Parse a publish date given either as RFC 3339 or as a plain `YYYY-MM-DD`
/// date (taken as midnight UTC). Anything else yields `None`.
pub fn parse_published_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
        Err(_) => {
            log::debug!("Ignoring unparseable publish date '{}'", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_brief_deserializes_api_shape() {
        let json = r#"{
            "id": "p1",
            "title": "Backend Engineer",
            "teamId": "t-eng",
            "locationId": "l1",
            "locationName": "Berlin",
            "employmentType": "FullTime",
            "secondaryLocations": [{"locationId": "l2", "locationName": "Remote"}],
            "compensationTierSummary": null
        }"#;
        let brief: PostingBrief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.team_id.as_deref(), Some("t-eng"));
        assert_eq!(brief.secondary_locations[0].location_name, "Remote");
        assert!(brief.compensation_tier_summary.is_none());
    }

    #[test]
    fn test_null_collections_become_empty() {
        let json = r#"{"id": "p1", "title": "X", "locationName": null, "secondaryLocations": null}"#;
        let brief: PostingBrief = serde_json::from_str(json).unwrap();
        assert!(brief.location_name.is_empty());
        assert!(brief.secondary_locations.is_empty());

        let board: JobBoard = serde_json::from_str(r#"{"teams": null, "jobPostings": []}"#).unwrap();
        assert!(board.is_empty());
        assert!(board.teams.is_empty());
    }

    #[test]
    fn test_detail_published_date_formats() {
        let detail: PostingDetail =
            serde_json::from_str(r#"{"id": "p1", "publishedDate": "2025-03-04"}"#).unwrap();
        assert_eq!(
            detail.published_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap())
        );

        let detail: PostingDetail = serde_json::from_str(
            r#"{"id": "p1", "publishedDate": "2025-03-04T10:30:00.000+02:00"}"#,
        )
        .unwrap();
        assert_eq!(
            detail.published_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_date_is_absent() {
        assert_eq!(parse_published_date("last tuesday"), None);
        assert_eq!(parse_published_date(""), None);
        let detail: PostingDetail =
            serde_json::from_str(r#"{"id": "p1", "publishedDate": null}"#).unwrap();
        assert!(detail.published_date.is_none());
    }

    #[test]
    fn test_team_lookup() {
        let board = JobBoard {
            teams: vec![Team {
                id: "t1".into(),
                name: "Engineering".into(),
                parent_team_id: None,
            }],
            job_postings: Vec::new(),
        };
        assert_eq!(board.team("t1").map(|t| t.name.as_str()), Some("Engineering"));
        assert!(board.team("t2").is_none());
    }
}
