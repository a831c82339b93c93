use serde::Serialize;

use super::domain::{Job, JobId};

const DEFAULT_JOB_TYPE: &str = "Full-time";
const DEFAULT_SALARY_RANGE: &str = "Competitive";
const OPEN_UNTIL_FILLED: &str = "Open until filled";

pub const EMPTY_LISTING_MESSAGE: &str =
    "No jobs found. Please try a different filter or check back later.";
pub const LISTING_LOAD_FAILED: &str = "Failed to load jobs. Please try again later.";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load job details. Please try again later.";

/// Compact card shown on the listing page.
#[derive(Debug, Clone, Serialize)]
pub struct JobCardView {
    pub id: JobId,
    pub title: String,
    pub category: String,
    pub location: String,
    pub summary: String,
    pub posted_label: String,
}

/// Listing page state after a fetch, in the order the service returned.
#[derive(Debug, Clone, Serialize)]
pub struct JobListingView {
    pub category_filter: Option<String>,
    pub cards: Vec<JobCardView>,
}

impl JobListingView {
    pub fn new(category_filter: Option<String>, jobs: &[Job]) -> Self {
        Self {
            category_filter,
            cards: jobs.iter().map(JobCardView::from).collect(),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(EMPTY_LISTING_MESSAGE)
    }
}

/// Full job page, with display defaults filled in for missing metadata.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetailView {
    pub id: JobId,
    pub title: String,
    pub company: Option<String>,
    pub category: String,
    pub location: String,
    pub job_type: String,
    pub salary_range: String,
    pub posted_label: String,
    pub closing_label: String,
    pub description: String,
    pub sections: Vec<JobSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobSection {
    pub heading: &'static str,
    pub items: Vec<String>,
}

impl From<&Job> for JobCardView {
    fn from(job: &Job) -> Self {
        let summary = if job.short_description.trim().is_empty() {
            job.description.clone()
        } else {
            job.short_description.clone()
        };

        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            category: job.category.clone(),
            location: job.location.clone(),
            summary,
            posted_label: posted_label(job),
        }
    }
}

impl From<&Job> for JobDetailView {
    fn from(job: &Job) -> Self {
        let sections = [
            ("Responsibilities", &job.responsibilities),
            ("Requirements", &job.requirements),
            ("Benefits", &job.benefits),
        ]
        .into_iter()
        .filter_map(|(heading, items)| {
            items.as_ref().map(|items| JobSection {
                heading,
                items: items.clone(),
            })
        })
        .collect();

        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            category: job.category.clone(),
            location: job.location.clone(),
            job_type: job
                .job_type
                .clone()
                .unwrap_or_else(|| DEFAULT_JOB_TYPE.to_string()),
            salary_range: job
                .salary_range
                .clone()
                .unwrap_or_else(|| DEFAULT_SALARY_RANGE.to_string()),
            posted_label: posted_label(job),
            closing_label: closing_label(job),
            description: job.description.clone(),
            sections,
        }
    }
}

fn posted_label(job: &Job) -> String {
    match job.posted_on() {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => job.posted_date.clone(),
    }
}

fn closing_label(job: &Job) -> String {
    match (job.closes_on(), &job.closing_date) {
        (Some(date), _) => date.format("%b %-d, %Y").to_string(),
        (None, Some(raw)) if !raw.trim().is_empty() => raw.clone(),
        _ => OPEN_UNTIL_FILLED.to_string(),
    }
}
