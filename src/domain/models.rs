use serde::{Deserialize, Serialize};

/// Canonical web host for public organization pages.
pub const SITE_URL: &str = "https://gatherly.org";

/// Everything the create-organization form collects before submission.
///
/// Field values are kept exactly as typed; validation decides what is
/// acceptable, nothing here normalizes input behind the user's back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrganizationDraft {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: String,
    pub co_admin: String,
    pub authorization_confirmed: bool,
}

/// A draft update to be published on an organization page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDraft {
    pub title: String,
    pub body: String,
}

/// What the platform hands back when a creation mutation succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEntity {
    pub id: String,
    pub slug: String,
}

/// Lifecycle of one submission attempt.
///
/// `Failure` carries user-presentable text; server rejection messages
/// pass through verbatim so "slug already taken" reads as the server
/// wrote it.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Pending,
    Success(CreatedEntity),
    Failure(String),
}

/// The signed-in account loaded from the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    /// First letter of every word in the display name, uppercased.
    ///
    /// ```
    /// use gatherly::domain::SessionUser;
    ///
    /// let user = SessionUser { name: "Joyce van Dam".to_string(), email: None };
    /// assert_eq!(user.initials(), "JVD");
    /// ```
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(|ch| ch.to_uppercase())
            .collect()
    }
}
