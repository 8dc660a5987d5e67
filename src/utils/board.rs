//! Title grouping and job search shown on the admin boards.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::database::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub title: String,
    pub count: usize,
}

fn job_title(application: &Document) -> &str {
    application
        .get("jobTitle")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Distinct job titles in order of first appearance, each with the number of
/// applications carrying it.
pub fn summarize_by_title(applications: &[Document]) -> Vec<TitleSummary> {
    let mut summaries: Vec<TitleSummary> = Vec::new();
    for application in applications {
        let title = job_title(application);
        match summaries.iter_mut().find(|summary| summary.title == title) {
            Some(summary) => summary.count += 1,
            None => summaries.push(TitleSummary {
                title: title.to_string(),
                count: 1,
            }),
        }
    }
    summaries
}

/// Applications filed under the title in `label`. Labels may carry a count
/// suffix as rendered on the board, e.g. `Engineer(3)`.
pub fn select_by_title<'a>(applications: &'a [Document], label: &str) -> Vec<&'a Document> {
    let title = label.split('(').next().unwrap_or("");
    applications
        .iter()
        .filter(|application| job_title(application) == title)
        .collect()
}

/// Case-insensitive substring search over `jobtitle`.
pub fn search_jobs<'a>(jobs: &'a [Document], term: Option<&str>) -> Vec<&'a Document> {
    let Some(term) = term else {
        return jobs.iter().collect();
    };
    let term = term.to_lowercase();
    jobs.iter()
        .filter(|job| {
            job.get("jobtitle")
                .and_then(Value::as_str)
                .map(|title| title.to_lowercase().contains(&term))
                .unwrap_or(false)
        })
        .collect()
}
