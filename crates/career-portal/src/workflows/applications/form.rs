use std::time::Duration;

use tracing::{info, warn};

use super::domain::{ApplicationId, ApplicationPayload, SubmissionReceipt};
use super::resume::{AttachmentError, ResumeAttachment, ResumeFile};
use super::validation::{ApplicantDetails, FormField, FormValidationError};
use crate::client::{ApiError, PortalApi};
use crate::workflows::jobs::JobId;
use crate::workflows::navigation::{Redirect, Route};

pub const RESUME_REQUIRED_MESSAGE: &str = "Please upload your resume";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit application. Please try again.";
pub const SUBMITTED_MESSAGE: &str = "Your application has been submitted successfully!";
pub const REDIRECTING_MESSAGE: &str = "Redirecting to your application status page...";

/// Lifecycle of a single application form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted { application_id: ApplicationId },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("application form is invalid: {0}")]
    Validation(#[from] FormValidationError),
    #[error("Please upload your resume")]
    ResumeRequired,
    #[error("a submission is already in flight")]
    InFlight,
    #[error("no submission is in flight")]
    Idle,
    #[error("application was already submitted as {0}")]
    AlreadySubmitted(ApplicationId),
    #[error("application submission failed: {0}")]
    Transport(#[from] ApiError),
}

/// Application form state for one job: field values, the held résumé, the
/// error banner, and the submission phase.
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    job_id: JobId,
    details: ApplicantDetails,
    resume: Option<ResumeAttachment>,
    phase: FormPhase,
    error: Option<String>,
    redirect_delay: Duration,
}

impl ApplicationForm {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            details: ApplicantDetails::default(),
            resume: None,
            phase: FormPhase::Editing,
            error: None,
            redirect_delay: Duration::from_secs(2),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.details.set(field, value);
    }

    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        self.details.field_error(field)
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            FormPhase::Editing => "Submit Application",
            FormPhase::Submitting => "Submitting...",
            FormPhase::Submitted { .. } => SUBMITTED_MESSAGE,
        }
    }

    /// Current error banner, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn resume(&self) -> Option<&ResumeAttachment> {
        self.resume.as_ref()
    }

    /// Handles a drop or file-picker selection. An accepted file replaces the
    /// held one and clears the banner; a rejection leaves the held file alone.
    pub fn attach(&mut self, files: Vec<ResumeFile>) -> Result<&ResumeAttachment, AttachmentError> {
        match ResumeAttachment::select(files) {
            Ok(attachment) => {
                info!(
                    job_id = %self.job_id,
                    file = attachment.file_name(),
                    size = attachment.size_bytes(),
                    "résumé attached"
                );
                self.error = None;
                Ok(self.resume.insert(attachment))
            }
            Err(err) => {
                warn!(job_id = %self.job_id, error = %err, "résumé rejected");
                self.error = Some(err.user_message().to_string());
                Err(err)
            }
        }
    }

    pub fn attach_file(&mut self, file: ResumeFile) -> Result<&ResumeAttachment, AttachmentError> {
        self.attach(vec![file])
    }

    pub fn remove_resume(&mut self) -> Option<ResumeAttachment> {
        self.resume.take()
    }

    /// Validates and enters `Submitting`, returning the payload to send.
    /// Nothing leaves the form unless this succeeds.
    pub fn begin_submission(&mut self) -> Result<ApplicationPayload, SubmitError> {
        match &self.phase {
            FormPhase::Editing => {}
            FormPhase::Submitting => return Err(SubmitError::InFlight),
            FormPhase::Submitted { application_id } => {
                return Err(SubmitError::AlreadySubmitted(application_id.clone()))
            }
        }

        let applicant = self.details.validate()?;

        let Some(resume) = &self.resume else {
            self.error = Some(RESUME_REQUIRED_MESSAGE.to_string());
            return Err(SubmitError::ResumeRequired);
        };

        let payload = ApplicationPayload {
            job_id: self.job_id.clone(),
            full_name: applicant.full_name,
            email: applicant.email,
            phone: applicant.phone,
            resume: resume.to_data_url(),
            linked_in: applicant.linked_in,
            portfolio: applicant.portfolio,
            cover_letter: applicant.cover_letter,
            additional_info: applicant.additional_info,
        };

        self.error = None;
        self.phase = FormPhase::Submitting;
        info!(job_id = %self.job_id, "application submitting");
        Ok(payload)
    }

    /// Applies the service's answer to an in-flight submission.
    pub fn complete_submission(
        &mut self,
        outcome: Result<SubmissionReceipt, ApiError>,
    ) -> Result<Redirect, SubmitError> {
        if self.phase != FormPhase::Submitting {
            warn!(job_id = %self.job_id, phase = ?self.phase, "no submission in flight");
            return match &self.phase {
                FormPhase::Submitted { application_id } => {
                    Err(SubmitError::AlreadySubmitted(application_id.clone()))
                }
                _ => Err(SubmitError::Idle),
            };
        }

        match outcome {
            Ok(receipt) => {
                info!(
                    job_id = %self.job_id,
                    application_id = %receipt.application_id,
                    status = %receipt.status,
                    "application submitted"
                );
                self.phase = FormPhase::Submitted {
                    application_id: receipt.application_id.clone(),
                };
                Ok(Redirect {
                    route: Route::ApplicationStatus(receipt.application_id),
                    delay: self.redirect_delay,
                })
            }
            Err(err) => {
                warn!(job_id = %self.job_id, error = %err, "application submission failed");
                self.phase = FormPhase::Editing;
                self.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                Err(SubmitError::Transport(err))
            }
        }
    }

    /// Runs the whole submit step against the service.
    pub async fn submit<A: PortalApi>(&mut self, api: &A) -> Result<Redirect, SubmitError> {
        let payload = self.begin_submission()?;
        let outcome = api.submit_application(&payload).await;
        self.complete_submission(outcome)
    }
}
