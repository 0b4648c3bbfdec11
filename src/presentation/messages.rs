//! Display text catalog and template interpolation.
//!
//! Screens and validation errors refer to text by message id, keeping
//! the wording in one place. Templates may contain `{param}`
//! placeholders filled in by [`format`]; unknown ids fall back to the
//! id itself so a missing entry is visible instead of fatal.

use crate::domain::FieldError;
use regex::Regex;
use std::sync::OnceLock;

fn template(key: &str) -> Option<&'static str> {
    let text = match key {
        "createOrg.form.nameLabel" => "What's the name of your organization?",
        "createOrg.form.urlLabel" => "What URL would you like?",
        "createOrg.form.descriptionLabel" => "What does your organization do?",
        "createOrg.form.descriptionHint" => "A short description, {max} characters max",
        "createOrg.form.websiteLabel" => "What's your organization's website?",
        "createOrg.form.coAdminLabel" => "Administrators",
        "createOrg.form.suggestedLabel" => "suggested",
        "createOrg.form.error.name" => "Please use fewer than {max} characters",
        "createOrg.form.error.description" => "Please use fewer than {max} characters",
        "createOrg.form.error.slug" => "Please use fewer than {max} characters",
        "createOrg.form.error.slugHyphen" => {
            "URLs can only contain lowercase letters, numbers and single hyphens"
        }
        "createOrg.form.error.website" => "Please enter a valid website address",
        "createOrganization.title" => "Create Organization",
        "createOrganization.button" => "Create Organization",
        "createOrganization.tos.label" => {
            "I verify that I am an authorized representative of this organization \
             and have the right to act on its behalf"
        }
        "createOrganization.success.title" => "Organization created!",
        "createOrganization.success.ready" => "{name} is ready to receive support.",
        "updates.new.title" => "New update",
        "updates.new.titleLabel" => "Title",
        "updates.new.bodyLabel" => "Body",
        "updates.new.publishButton" => "Publish update",
        "updates.new.error" => "Update failed: {err}",
        "updates.new.error.title" => "Please add a title",
        "updates.new.error.titleLength" => "Please use fewer than {max} characters",
        "updates.new.error.body" => "Your update is empty",
        "updates.published.title" => "Update published!",
        _ => return None,
    };
    Some(text)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Resolves a message id to its text, or to the id when unknown.
pub fn text(key: &str) -> String {
    template(key).unwrap_or(key).to_string()
}

/// Fills `{param}` placeholders in a template with the given values.
///
/// Parameter names match case-insensitively; placeholders with no
/// matching value stay in the output untouched.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &regex::Captures| {
            params
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&caps[1]))
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolves a message id and interpolates parameters in one step.
pub fn format(key: &str, params: &[(&str, &str)]) -> String {
    interpolate(&text(key), params)
}

/// Display text for a single field validation error.
pub fn field_error(error: &FieldError) -> String {
    let params = error.params();
    let borrowed: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    format(error.message_key(), &borrowed)
}
