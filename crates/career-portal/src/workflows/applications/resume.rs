use std::fmt;
use std::path::{Path, PathBuf};

use base64::prelude::*;
use mime::Mime;

/// Largest résumé accepted, in bytes (5 MiB).
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A file offered to the résumé drop zone, before any checks.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads a file selected from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AttachmentError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("size", &self.size())
            .finish()
    }
}

/// The three rejection causes surfaced to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCause {
    TooLarge,
    InvalidType,
    Other,
}

impl RejectionCause {
    pub const fn message(self) -> &'static str {
        match self {
            RejectionCause::TooLarge => "File is too large. Maximum size is 5MB.",
            RejectionCause::InvalidType => {
                "Invalid file type. Please upload a PDF, DOC, or DOCX file."
            }
            RejectionCause::Other => "Error uploading file. Please try again.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("{file_name} is {size} bytes, above the 5 MiB limit")]
    TooLarge { file_name: String, size: u64 },
    #[error("{file_name} is not a PDF, DOC, or DOCX document")]
    InvalidType { file_name: String },
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("only one résumé may be attached, {count} files were offered")]
    TooManyFiles { count: usize },
    #[error("no résumé file was offered")]
    NoFile,
}

impl AttachmentError {
    pub fn cause(&self) -> RejectionCause {
        match self {
            AttachmentError::TooLarge { .. } => RejectionCause::TooLarge,
            AttachmentError::InvalidType { .. } => RejectionCause::InvalidType,
            AttachmentError::Unreadable { .. }
            | AttachmentError::TooManyFiles { .. }
            | AttachmentError::NoFile => RejectionCause::Other,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.cause().message()
    }
}

/// A résumé that passed the type and size checks.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeAttachment {
    file_name: String,
    mime: Mime,
    bytes: Vec<u8>,
}

impl ResumeAttachment {
    /// Accepts exactly one of the offered files.
    pub fn select(mut files: Vec<ResumeFile>) -> Result<Self, AttachmentError> {
        match files.len() {
            0 => Err(AttachmentError::NoFile),
            1 => Self::accept(files.remove(0)),
            count => Err(AttachmentError::TooManyFiles { count }),
        }
    }

    /// Size is checked before type, so an oversized file of the wrong type
    /// reports as too large.
    pub fn accept(file: ResumeFile) -> Result<Self, AttachmentError> {
        let size = file.size();
        if size > MAX_RESUME_BYTES {
            return Err(AttachmentError::TooLarge {
                file_name: file.file_name,
                size,
            });
        }

        let Some(mime) = accepted_mime(&file.file_name) else {
            return Err(AttachmentError::InvalidType {
                file_name: file.file_name,
            });
        };

        Ok(Self {
            file_name: file.file_name,
            mime,
            bytes: file.bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size in MiB with two decimals, e.g. `1.00 MB`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes() as f64 / 1024.0 / 1024.0)
    }

    /// Transport encoding used in the submission body.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime.essence_str(),
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

impl fmt::Debug for ResumeAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeAttachment")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime.essence_str())
            .field("size", &self.size_bytes())
            .finish()
    }
}

fn accepted_mime(file_name: &str) -> Option<Mime> {
    mime_guess::from_path(file_name)
        .iter()
        .find(|candidate| {
            ACCEPTED_RESUME_TYPES
                .iter()
                .any(|accepted| *accepted == candidate.essence_str())
        })
}
