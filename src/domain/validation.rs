use regex::Regex;
use std::sync::OnceLock;

use super::errors::{FieldError, ValidationErrors};
use super::models::{OrganizationDraft, UpdateDraft};

pub const NAME_MAX_LEN: usize = 50;
pub const SLUG_MAX_LEN: usize = 30;
pub const DESCRIPTION_MAX_LEN: usize = 160;
pub const TITLE_MAX_LEN: usize = 255;

fn website_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(https?://)?([a-z0-9-]+\.)+[a-z]{2,}(:\d{1,5})?(/\S*)?$").unwrap()
    })
}

/// Whether a string reads as a web address, scheme optional.
pub fn looks_like_url(value: &str) -> bool {
    website_pattern().is_match(value)
}

fn is_well_formed_slug(slug: &str) -> bool {
    slug.chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
}

/// Checks a draft against the platform's field rules.
///
/// Pure and side-effect free: no field is required here (the server
/// enforces presence), so an empty draft passes. Each field reports at
/// most one error.
///
/// ```
/// use gatherly::domain::{validate, OrganizationDraft};
///
/// let mut draft = OrganizationDraft::default();
/// draft.slug = "Has-Caps".to_string();
/// assert!(validate(&draft).get("slug").is_some());
/// ```
pub fn validate(draft: &OrganizationDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.name.chars().count() > NAME_MAX_LEN {
        errors.insert("name", FieldError::NameTooLong { max: NAME_MAX_LEN });
    }

    if draft.slug.chars().count() > SLUG_MAX_LEN {
        errors.insert("slug", FieldError::SlugTooLong { max: SLUG_MAX_LEN });
    } else if !draft.slug.is_empty() && !is_well_formed_slug(&draft.slug) {
        errors.insert("slug", FieldError::SlugFormat);
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.insert(
            "description",
            FieldError::DescriptionTooLong {
                max: DESCRIPTION_MAX_LEN,
            },
        );
    }

    if !draft.website.is_empty() && !looks_like_url(&draft.website) {
        errors.insert("website", FieldError::WebsiteInvalid);
    }

    errors
}

/// Checks an update draft before publishing.
///
/// Updates do require content: a title and a non-empty body.
pub fn validate_update(draft: &UpdateDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.insert("title", FieldError::TitleMissing);
    } else if draft.title.chars().count() > TITLE_MAX_LEN {
        errors.insert("title", FieldError::TitleTooLong { max: TITLE_MAX_LEN });
    }

    if draft.body.trim().is_empty() {
        errors.insert("body", FieldError::BodyMissing);
    }

    errors
}
