use crate::client::ApiError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::applications::{AttachmentError, SubmitError};
use crate::workflows::jobs::JobExportError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Api(ApiError),
    Submission(SubmitError),
    Attachment(AttachmentError),
    Export(JobExportError),
}

impl AppError {
    /// Message suitable for the applicant, where one exists.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            AppError::Attachment(err) => Some(err.user_message()),
            AppError::Submission(SubmitError::ResumeRequired) => {
                Some(crate::workflows::applications::RESUME_REQUIRED_MESSAGE)
            }
            AppError::Submission(SubmitError::Transport(_)) => {
                Some(crate::workflows::applications::SUBMIT_FAILED_MESSAGE)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Api(err) => write!(f, "api error: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
            AppError::Attachment(err) => write!(f, "attachment error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Attachment(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<SubmitError> for AppError {
    fn from(value: SubmitError) -> Self {
        Self::Submission(value)
    }
}

impl From<AttachmentError> for AppError {
    fn from(value: AttachmentError) -> Self {
        Self::Attachment(value)
    }
}

impl From<JobExportError> for AppError {
    fn from(value: JobExportError) -> Self {
        Self::Export(value)
    }
}
