use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());

// Optional country code, optional parenthesised area code, then 3 + 4..6 digits.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?(?:[0-9]{1,3}[-\s.]?)?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .unwrap()
});

/// Editable fields of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Phone,
    LinkedIn,
    Portfolio,
    CoverLetter,
    AdditionalInfo,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::LinkedIn,
        FormField::Portfolio,
        FormField::CoverLetter,
        FormField::AdditionalInfo,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Full Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone Number",
            FormField::LinkedIn => "LinkedIn Profile (Optional)",
            FormField::Portfolio => "Portfolio URL (Optional)",
            FormField::CoverLetter => "Cover Letter",
            FormField::AdditionalInfo => "Additional Information",
        }
    }
}

/// A single field-level validation failure, carrying the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_field_errors(.errors))]
pub struct FormValidationError {
    pub errors: Vec<FieldError>,
}

impl FormValidationError {
    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

fn render_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate_full_name(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Full name is required");
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email is required");
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err("Invalid email address");
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Phone number is required");
    }
    if !PHONE_PATTERN.is_match(value) {
        return Err("Invalid phone number");
    }
    Ok(())
}

/// Raw applicant input as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linked_in: String,
    pub portfolio: String,
    pub cover_letter: String,
    pub additional_info: String,
}

impl ApplicantDetails {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::LinkedIn => &self.linked_in,
            FormField::Portfolio => &self.portfolio,
            FormField::CoverLetter => &self.cover_letter,
            FormField::AdditionalInfo => &self.additional_info,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::LinkedIn => &mut self.linked_in,
            FormField::Portfolio => &mut self.portfolio,
            FormField::CoverLetter => &mut self.cover_letter,
            FormField::AdditionalInfo => &mut self.additional_info,
        };
        *slot = value.into();
    }

    /// Inline message for one field; optional fields never fail.
    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        let value = self.get(field);
        let outcome = match field {
            FormField::FullName => validate_full_name(value),
            FormField::Email => validate_email(value),
            FormField::Phone => validate_phone(value),
            FormField::LinkedIn
            | FormField::Portfolio
            | FormField::CoverLetter
            | FormField::AdditionalInfo => Ok(()),
        };
        outcome.err()
    }

    pub fn validate(&self) -> Result<ValidatedApplicant, FormValidationError> {
        let errors: Vec<FieldError> = FormField::ALL
            .into_iter()
            .filter_map(|field| {
                self.field_error(field)
                    .map(|message| FieldError { field, message })
            })
            .collect();

        if !errors.is_empty() {
            return Err(FormValidationError { errors });
        }

        Ok(ValidatedApplicant {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            linked_in: non_blank(&self.linked_in),
            portfolio: non_blank(&self.portfolio),
            cover_letter: non_blank(&self.cover_letter),
            additional_info: non_blank(&self.additional_info),
        })
    }
}

/// Applicant fields after validation, with blank optionals dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplicant {
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) linked_in: Option<String>,
    pub(crate) portfolio: Option<String>,
    pub(crate) cover_letter: Option<String>,
    pub(crate) additional_info: Option<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
