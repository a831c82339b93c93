use std::io::Write;

use serde::Serialize;

use super::domain::Job;

#[derive(Debug, thiserror::Error)]
pub enum JobExportError {
    #[error("failed to write job export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush job export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct JobExportRow<'a> {
    #[serde(rename = "Job ID")]
    id: &'a str,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Posted")]
    posted: &'a str,
    #[serde(rename = "Closing")]
    closing: &'a str,
}

/// Writes the listing as CSV, preserving the order the service returned.
pub fn export_jobs_csv<W: Write>(writer: W, jobs: &[Job]) -> Result<usize, JobExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for job in jobs {
        csv_writer.serialize(JobExportRow {
            id: job.id.as_str(),
            title: &job.title,
            category: &job.category,
            location: &job.location,
            posted: &job.posted_date,
            closing: job.closing_date.as_deref().unwrap_or_default(),
        })?;
    }

    csv_writer.flush()?;
    Ok(jobs.len())
}
