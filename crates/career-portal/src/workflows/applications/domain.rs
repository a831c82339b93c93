use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::workflows::jobs::JobId;

/// Server-issued identifier for a submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Processing stage assigned by the screening pipeline.
///
/// Codes the client does not recognise are kept verbatim in `Other` so a new
/// server-side stage never breaks deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatusCode {
    Submitted,
    Extracted,
    Screened,
    Ranked,
    PhoneInterviewInitiated,
    PhoneInterviewCompleted,
    InterviewScheduled,
    Other(String),
}

impl ApplicationStatusCode {
    /// Known codes in pipeline order.
    pub const KNOWN: [ApplicationStatusCode; 7] = [
        ApplicationStatusCode::Submitted,
        ApplicationStatusCode::Extracted,
        ApplicationStatusCode::Screened,
        ApplicationStatusCode::Ranked,
        ApplicationStatusCode::PhoneInterviewInitiated,
        ApplicationStatusCode::PhoneInterviewCompleted,
        ApplicationStatusCode::InterviewScheduled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatusCode::Submitted => "SUBMITTED",
            ApplicationStatusCode::Extracted => "EXTRACTED",
            ApplicationStatusCode::Screened => "SCREENED",
            ApplicationStatusCode::Ranked => "RANKED",
            ApplicationStatusCode::PhoneInterviewInitiated => "PHONE_INTERVIEW_INITIATED",
            ApplicationStatusCode::PhoneInterviewCompleted => "PHONE_INTERVIEW_COMPLETED",
            ApplicationStatusCode::InterviewScheduled => "INTERVIEW_SCHEDULED",
            ApplicationStatusCode::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ApplicationStatusCode::Other(_))
    }
}

impl From<String> for ApplicationStatusCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUBMITTED" => Self::Submitted,
            "EXTRACTED" => Self::Extracted,
            "SCREENED" => Self::Screened,
            "RANKED" => Self::Ranked,
            "PHONE_INTERVIEW_INITIATED" => Self::PhoneInterviewInitiated,
            "PHONE_INTERVIEW_COMPLETED" => Self::PhoneInterviewCompleted,
            "INTERVIEW_SCHEDULED" => Self::InterviewScheduled,
            _ => Self::Other(value),
        }
    }
}

impl From<ApplicationStatusCode> for String {
    fn from(value: ApplicationStatusCode) -> Self {
        match value {
            ApplicationStatusCode::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only status record returned by the application service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub status: ApplicationStatusCode,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub submission_date: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_date: NaiveDateTime,
}

/// Response to a successful `POST /applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub application_id: ApplicationId,
    pub status: ApplicationStatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Validated submission body. Built only by the application form once every
/// required field and the résumé are present.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub job_id: JobId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Résumé as a `data:<mime>;base64,<bytes>` URL.
    pub resume: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl fmt::Debug for ApplicationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationPayload")
            .field("job_id", &self.job_id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("resume_len", &self.resume.len())
            .field("linked_in", &self.linked_in)
            .field("portfolio", &self.portfolio)
            .field("cover_letter", &self.cover_letter.is_some())
            .field("additional_info", &self.additional_info.is_some())
            .finish()
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Ok(value.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|err| format!("failed to parse '{raw}' as an ISO-8601 timestamp ({err})"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
