//! Application submission: applicant input validation, résumé intake, and the
//! form state machine that hands a validated payload to the portal service.

pub mod domain;
pub mod form;
pub mod resume;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationPayload, ApplicationStatus, ApplicationStatusCode,
    SubmissionReceipt,
};
pub use form::{
    ApplicationForm, FormPhase, SubmitError, REDIRECTING_MESSAGE, RESUME_REQUIRED_MESSAGE,
    SUBMITTED_MESSAGE, SUBMIT_FAILED_MESSAGE,
};
pub use resume::{
    AttachmentError, RejectionCause, ResumeAttachment, ResumeFile, ACCEPTED_RESUME_TYPES,
    MAX_RESUME_BYTES,
};
pub use validation::{
    ApplicantDetails, FieldError, FormField, FormValidationError, ValidatedApplicant,
};
