use std::collections::BTreeMap;

/// A single validation failure on one form field.
///
/// Variants carry only the parameters a message template needs; the
/// presentation layer resolves `message_key` to display text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    NameTooLong { max: usize },
    DescriptionTooLong { max: usize },
    SlugTooLong { max: usize },
    SlugFormat,
    WebsiteInvalid,
    TitleMissing,
    TitleTooLong { max: usize },
    BodyMissing,
}

impl FieldError {
    /// Catalog id of the display text for this error.
    pub fn message_key(&self) -> &'static str {
        match self {
            FieldError::NameTooLong { .. } => "createOrg.form.error.name",
            FieldError::DescriptionTooLong { .. } => "createOrg.form.error.description",
            FieldError::SlugTooLong { .. } => "createOrg.form.error.slug",
            FieldError::SlugFormat => "createOrg.form.error.slugHyphen",
            FieldError::WebsiteInvalid => "createOrg.form.error.website",
            FieldError::TitleMissing => "updates.new.error.title",
            FieldError::TitleTooLong { .. } => "updates.new.error.titleLength",
            FieldError::BodyMissing => "updates.new.error.body",
        }
    }

    /// Named parameters to interpolate into the message template.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            FieldError::NameTooLong { max }
            | FieldError::DescriptionTooLong { max }
            | FieldError::SlugTooLong { max }
            | FieldError::TitleTooLong { max } => vec![("max", max.to_string())],
            _ => Vec::new(),
        }
    }
}

/// Validation outcome for a whole draft, at most one error per field.
///
/// Iteration order is stable so rendering and tests see fields in a
/// deterministic order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

/// Why a platform call failed.
///
/// `Rejected` holds the server's own message and displays it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotAuthorized,
    Network(String),
    Rejected(String),
    InvalidResponse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotAuthorized => {
                write!(
                    f,
                    "Please verify that you are an authorized representative of this organization"
                )
            }
            ApiError::Network(msg) => {
                write!(f, "Network error: {}", msg)
            }
            ApiError::Rejected(msg) => {
                write!(f, "{}", msg)
            }
            ApiError::InvalidResponse(msg) => {
                write!(f, "Unexpected response from the platform: {}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_displays_verbatim() {
        let err = ApiError::Rejected("The slug airbnb is already taken".to_string());
        assert_eq!(err.to_string(), "The slug airbnb is already taken");
    }

    #[test]
    fn test_not_authorized_names_the_requirement() {
        assert!(ApiError::NotAuthorized.to_string().contains("authorized representative"));
    }

    #[test]
    fn test_length_errors_carry_the_limit() {
        let err = FieldError::NameTooLong { max: 50 };
        assert_eq!(err.params(), vec![("max", "50".to_string())]);
    }

    #[test]
    fn test_one_error_per_field() {
        let mut errors = ValidationErrors::new();
        errors.insert("slug", FieldError::SlugTooLong { max: 30 });
        errors.insert("slug", FieldError::SlugFormat);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("slug"), Some(&FieldError::SlugFormat));
    }

    #[test]
    fn test_iteration_is_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.insert("website", FieldError::WebsiteInvalid);
        errors.insert("name", FieldError::NameTooLong { max: 50 });
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["name", "website"]);
    }
}
