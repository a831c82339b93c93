use std::time::Duration;

use tokio::sync::mpsc;

use super::common::*;
use crate::client::testing::ScriptedPortal;
use crate::workflows::applications::{
    ApplicationForm, ApplicationId, FormField, FormPhase, RejectionCause, ResumeFile, SubmitError,
    RESUME_REQUIRED_MESSAGE, SUBMITTED_MESSAGE, SUBMIT_FAILED_MESSAGE,
};
use crate::workflows::navigation::Route;

#[tokio::test]
async fn missing_resume_blocks_submission_without_calling_service() {
    let portal = ScriptedPortal::accepting();
    let mut form = filled_form();

    match form.submit(&portal).await {
        Err(SubmitError::ResumeRequired) => {}
        other => panic!("expected missing résumé, got {other:?}"),
    }
    assert_eq!(form.error_message(), Some(RESUME_REQUIRED_MESSAGE));
    assert_eq!(form.phase(), &FormPhase::Editing);
    assert!(portal.submissions().is_empty());
}

#[tokio::test]
async fn invalid_fields_block_submission_with_inline_messages() {
    let portal = ScriptedPortal::accepting();
    let mut form = ApplicationForm::new(job_id());
    form.set_field(FormField::Email, "not-an-email");
    form.attach_file(pdf("cv.pdf")).expect("pdf accepted");

    match form.submit(&portal).await {
        Err(SubmitError::Validation(err)) => {
            assert_eq!(
                err.message_for(FormField::FullName),
                Some("Full name is required")
            );
            assert_eq!(
                err.message_for(FormField::Email),
                Some("Invalid email address")
            );
            assert_eq!(
                err.message_for(FormField::Phone),
                Some("Phone number is required")
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(form.field_error(FormField::Email), Some("Invalid email address"));
    assert!(portal.submissions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn successful_submission_redirects_to_status_page_after_delay() {
    let portal = ScriptedPortal::accepting();
    let mut form = ready_form();

    let redirect = form.submit(&portal).await.expect("submission accepted");

    assert_eq!(
        form.phase(),
        &FormPhase::Submitted {
            application_id: ApplicationId::from("APP123")
        }
    );
    assert_eq!(form.submit_label(), SUBMITTED_MESSAGE);
    assert!(!form.can_submit());
    assert_eq!(
        redirect.route,
        Route::ApplicationStatus(ApplicationId::from("APP123"))
    );
    assert_eq!(redirect.delay, Duration::from_secs(2));

    let submissions = portal.submissions();
    assert_eq!(submissions.len(), 1);
    let payload = &submissions[0];
    assert_eq!(payload.job_id, job_id());
    assert_eq!(payload.full_name, "Ada Lovelace");
    assert!(payload.resume.starts_with("data:application/pdf;base64,"));
    assert_eq!(payload.linked_in, None);
    assert_eq!(
        payload.cover_letter.as_deref(),
        Some("Analytical engines are my passion.")
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let follow = tokio::spawn(redirect.follow(tx));
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert!(rx.try_recv().is_err());
    follow.await.expect("redirect completes");
    assert_eq!(
        rx.recv().await,
        Some(Route::ApplicationStatus(ApplicationId::from("APP123")))
    );
}

#[tokio::test]
async fn transport_failure_returns_to_editing_and_allows_retry() {
    let portal = ScriptedPortal::failing_submissions(1);
    let mut form = ready_form();

    match form.submit(&portal).await {
        Err(SubmitError::Transport(err)) => assert!(!err.is_not_found()),
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert_eq!(form.phase(), &FormPhase::Editing);
    assert_eq!(form.error_message(), Some(SUBMIT_FAILED_MESSAGE));
    assert!(form.can_submit());
    assert!(form.resume().is_some(), "résumé kept for the retry");

    form.submit(&portal).await.expect("retry succeeds");
    assert_eq!(form.error_message(), None);
    assert_eq!(portal.submissions().len(), 2);
}

#[test]
fn second_submission_is_refused_while_one_is_in_flight() {
    let mut form = ready_form();

    form.begin_submission().expect("first submission starts");
    assert!(form.is_submitting());
    assert!(!form.can_submit());
    assert_eq!(form.submit_label(), "Submitting...");

    match form.begin_submission() {
        Err(SubmitError::InFlight) => {}
        other => panic!("expected in-flight refusal, got {other:?}"),
    }
}

#[test]
fn completing_without_a_submission_in_flight_is_refused() {
    let mut form = ready_form();

    let outcome = form.complete_submission(Err(crate::client::ApiError::Status {
        status: 500,
        message: "boom".to_string(),
    }));

    match outcome {
        Err(SubmitError::Idle) => {}
        other => panic!("expected idle refusal, got {other:?}"),
    }
    assert_eq!(form.error_message(), None);
}

#[test]
fn accepted_resume_replaces_held_file_and_clears_banner() {
    let mut form = filled_form();
    form.attach_file(ResumeFile::new("notes.txt", vec![0; 10]))
        .expect_err("text file rejected");
    assert_eq!(
        form.error_message(),
        Some(RejectionCause::InvalidType.message())
    );

    form.attach_file(pdf("first.pdf")).expect("pdf accepted");
    assert_eq!(form.error_message(), None);

    let attached = form
        .attach_file(ResumeFile::new("second.docx", vec![0; MIB]))
        .expect("docx accepted");
    assert_eq!(attached.file_name(), "second.docx");
    assert_eq!(attached.size_label(), "1.00 MB");
    assert_eq!(
        form.resume().map(|resume| resume.file_name()),
        Some("second.docx")
    );
}

#[test]
fn rejected_resume_keeps_previously_held_file() {
    let mut form = filled_form();
    form.attach_file(pdf("keep-me.pdf")).expect("pdf accepted");

    let err = form
        .attach_file(ResumeFile::new("huge.pdf", vec![0; 6 * MIB]))
        .expect_err("oversized file rejected");

    assert_eq!(err.cause(), RejectionCause::TooLarge);
    assert_eq!(
        form.error_message(),
        Some("File is too large. Maximum size is 5MB.")
    );
    assert_eq!(
        form.resume().map(|resume| resume.file_name()),
        Some("keep-me.pdf")
    );

    let removed = form.remove_resume().expect("held résumé removed");
    assert_eq!(removed.file_name(), "keep-me.pdf");
    assert!(form.resume().is_none());
}
