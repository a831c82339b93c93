//! Job listings fetched read-only from the remote service, plus the view
//! models used to render them.

pub mod domain;
pub mod export;
pub mod views;

pub use domain::{Job, JobId};
pub use export::{export_jobs_csv, JobExportError};
pub use views::{
    JobCardView, JobDetailView, JobListingView, JobSection, DETAIL_LOAD_FAILED,
    EMPTY_LISTING_MESSAGE, LISTING_LOAD_FAILED,
};
