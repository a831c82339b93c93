//! Client-side workflows for the career portal: job browsing, résumé
//! applications, and application status tracking against the remote
//! job/application service.

pub mod client;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
