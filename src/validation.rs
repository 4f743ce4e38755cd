//! Client-side Validation
//!
//! Checks applied before any network call: upload type and size, tag input,
//! and credential forms. A failed check aborts the action with an alert.

use thiserror::Error;

use crate::model::{Credentials, Registration};

/// MIME types accepted for upload
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "video/mp4"];

/// Upload ceiling: 10 MiB
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Longest accepted tag, in characters
pub const MAX_TAG_LEN: usize = 50;

/// Validation failures, displayed verbatim in alerts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type")]
    UnsupportedType(String),

    #[error("File size must be less than 10MB")]
    TooLarge(u64),

    #[error("Tag cannot be empty")]
    EmptyTag,

    #[error("Tag already exists")]
    DuplicateTag(String),

    #[error("Tag must be at most {MAX_TAG_LEN} characters")]
    TagTooLong(usize),

    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Upload acceptance rules
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    pub allowed_types: Vec<String>,
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: ALLOWED_MIME_TYPES.iter().map(|t| t.to_string()).collect(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Type is checked before size, matching the order users see errors in
    pub fn check(&self, mime_type: &str, size: u64) -> Result<(), ValidationError> {
        if !self.allowed_types.iter().any(|t| t == mime_type) {
            return Err(ValidationError::UnsupportedType(mime_type.to_string()));
        }
        if size > self.max_bytes {
            return Err(ValidationError::TooLarge(size));
        }
        Ok(())
    }
}

/// Validate an upload against the default policy
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    UploadPolicy::default().check(mime_type, size)
}

/// Validate tag input against the record's current tags.
///
/// Returns the trimmed tag on success. Duplicate detection is exact and
/// case-sensitive.
pub fn validate_new_tag(existing: &[String], input: &str) -> Result<String, ValidationError> {
    let tag = input.trim();
    if tag.is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    let len = tag.chars().count();
    if len > MAX_TAG_LEN {
        return Err(ValidationError::TagTooLong(len));
    }
    if existing.iter().any(|t| t == tag) {
        return Err(ValidationError::DuplicateTag(tag.to_string()));
    }
    Ok(tag.to_string())
}

/// Tag list after adding `tag` at the end
pub fn tags_with(existing: &[String], tag: &str) -> Vec<String> {
    let mut tags = existing.to_vec();
    tags.push(tag.to_string());
    tags
}

/// Tag list with every occurrence of `tag` removed
pub fn tags_without(existing: &[String], tag: &str) -> Vec<String> {
    existing.iter().filter(|t| *t != tag).cloned().collect()
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

pub fn validate_registration(form: &Registration) -> Result<(), ValidationError> {
    if form.email.trim().is_empty() || form.password.is_empty() || form.confirm_password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Guess an upload MIME type from a filename extension
pub fn mime_from_filename(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "mp4" => Some("video/mp4"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accepts_allowed_types_under_limit() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_upload(mime, 500 * 1024).is_ok(), "{mime}");
        }
        assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/webp", "video/quicktime", "application/pdf", "", "IMAGE/PNG"] {
            let err = validate_upload(mime, 1).unwrap_err();
            assert!(matches!(err, ValidationError::UnsupportedType(_)));
            assert_eq!(err.to_string(), "Invalid file type");
        }
    }

    #[test]
    fn test_rejects_oversized() {
        let err = validate_upload("video/mp4", 15 * 1024 * 1024).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge(15 * 1024 * 1024));
        assert!(validate_upload("image/gif", MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn test_new_tag_trimmed() {
        assert_eq!(validate_new_tag(&[], "  beach ").unwrap(), "beach");
    }

    #[test]
    fn test_new_tag_rejects_empty() {
        assert_eq!(validate_new_tag(&[], "   "), Err(ValidationError::EmptyTag));
        assert_eq!(validate_new_tag(&[], ""), Err(ValidationError::EmptyTag));
    }

    #[test]
    fn test_new_tag_duplicate_is_case_sensitive() {
        let existing = tags(&["beach"]);
        assert_eq!(
            validate_new_tag(&existing, "beach"),
            Err(ValidationError::DuplicateTag("beach".to_string()))
        );
        assert_eq!(validate_new_tag(&existing, " beach "), Err(ValidationError::DuplicateTag("beach".to_string())));
        assert_eq!(validate_new_tag(&existing, "Beach").unwrap(), "Beach");
    }

    #[test]
    fn test_new_tag_length_limit() {
        let long = "x".repeat(MAX_TAG_LEN + 1);
        assert_eq!(validate_new_tag(&[], &long), Err(ValidationError::TagTooLong(51)));
        assert!(validate_new_tag(&[], &"x".repeat(MAX_TAG_LEN)).is_ok());
    }

    #[test]
    fn test_tags_without_only_tag() {
        assert!(tags_without(&tags(&["beach"]), "beach").is_empty());
        assert_eq!(tags_without(&tags(&["a", "b", "c"]), "b"), tags(&["a", "c"]));
        assert_eq!(tags_with(&tags(&["a"]), "b"), tags(&["a", "b"]));
    }

    #[test]
    fn test_credentials() {
        assert!(validate_credentials(&Credentials::new("a@b.c", "pw")).is_ok());
        assert_eq!(
            validate_credentials(&Credentials::new("", "pw")),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_credentials(&Credentials::new("a@b.c", "")),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_registration_password_mismatch() {
        let form = Registration::new("a@b.c", "secret", "secrte");
        assert_eq!(validate_registration(&form), Err(ValidationError::PasswordMismatch));
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
        assert!(validate_registration(&Registration::new("a@b.c", "s", "s")).is_ok());
    }

    #[test]
    fn test_mime_from_filename() {
        assert_eq!(mime_from_filename("IMG_01.JPG"), Some("image/jpeg"));
        assert_eq!(mime_from_filename("clip.mp4"), Some("video/mp4"));
        assert_eq!(mime_from_filename("notes.txt"), None);
        assert_eq!(mime_from_filename("README"), None);
    }
}
