// src/utils/url.rs

//! URL manipulation utilities.

use regex::Regex;

/// Extract the organization identifier from a public job-board URL.
///
/// The identifier is the first path segment after `host`. Returns `None`
/// for anything not shaped like `{host}/{organization}`.
///
/// # Examples
/// ```
/// use jobs_crawler::utils::url::extract_organization;
///
/// assert_eq!(
///     extract_organization("https://jobs.ashbyhq.com/acme?utm=x", "jobs.ashbyhq.com"),
///     Some("acme".to_string())
/// );
/// assert_eq!(extract_organization("https://example.com/acme", "jobs.ashbyhq.com"), None);
/// ```
pub fn extract_organization(url: &str, host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return None;
    }
    let pattern = Regex::new(&format!(r"{}/([^/?#\s]+)", regex::escape(host))).ok()?;
    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Public URL of a single posting.
pub fn posting_url(host: &str, organization: &str, posting_id: &str) -> String {
    format!(
        "https://{}/{}/{}",
        host.trim_end_matches('/'),
        organization,
        posting_id
    )
}

/// Application form URL for a posting URL.
pub fn apply_url(posting_url: &str) -> String {
    format!("{posting_url}/application")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "jobs.ashbyhq.com";

    #[test]
    fn test_extract_organization() {
        assert_eq!(
            extract_organization("https://jobs.ashbyhq.com/ashby", HOST),
            Some("ashby".to_string())
        );
        assert_eq!(
            extract_organization("https://jobs.ashbyhq.com/ashby/", HOST),
            Some("ashby".to_string())
        );
        assert_eq!(
            extract_organization("https://jobs.ashbyhq.com/ashby/7c1d?src=li", HOST),
            Some("ashby".to_string())
        );
    }

    #[test]
    fn test_extract_organization_custom_host() {
        assert_eq!(
            extract_organization("https://jobs.example.com/acme", "jobs.example.com"),
            Some("acme".to_string())
        );
    }

    #[test]
    fn test_extract_organization_not_found() {
        let bad = [
            "",
            "not a url",
            "https://jobs.ashbyhq.com",
            "https://jobs.ashbyhq.com/",
            "https://jobs.ashbyhq.com/?foo=bar",
            "https://boards.greenhouse.io/acme",
            "https://jobsXashbyhqYcom/acme",
        ];
        for url in bad {
            assert_eq!(extract_organization(url, HOST), None, "{url}");
        }
        assert_eq!(extract_organization("https://jobs.ashbyhq.com/acme", ""), None);
    }

    #[test]
    fn test_posting_and_apply_urls() {
        let url = posting_url(HOST, "acme", "p-1");
        assert_eq!(url, "https://jobs.ashbyhq.com/acme/p-1");
        assert_eq!(apply_url(&url), "https://jobs.ashbyhq.com/acme/p-1/application");
    }
}
