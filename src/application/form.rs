//! Form state for the create-organization and new-update screens.
//!
//! All edits flow through a single reducer entry point per form
//! ([`OrgForm::apply`] / [`UpdateForm::apply`]), so each keystroke leaves
//! the form fully consistent: field values, the derived slug, and the
//! current validation errors always agree with one another.

use crate::domain::{
    FieldError, OrganizationDraft, UpdateDraft, ValidationErrors, suggest_slug, validate,
    validate_update,
};

/// One editing step applied to whichever field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Flips a checkbox; ignored by text fields.
    Toggle,
}

impl FormEvent {
    /// Whether the event can change a field's value (as opposed to
    /// only moving the cursor).
    pub fn edits_value(self) -> bool {
        matches!(
            self,
            FormEvent::Insert(_) | FormEvent::Backspace | FormEvent::Delete
        )
    }
}

/// A single-line text input with a character-indexed cursor.
///
/// `touched` records whether the user has directly edited the value;
/// programmatic updates through [`TextField::set_value`] leave it alone.
/// The cursor counts characters, not bytes, so multi-byte input moves
/// one glyph at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
    pub touched: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    /// Replaces the value and moves the cursor to the end without
    /// marking the field as touched.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Insert(ch) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
                self.touched = true;
            }
            FormEvent::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_offset(self.cursor - 1);
                    self.value.remove(at);
                    self.cursor -= 1;
                    self.touched = true;
                }
            }
            FormEvent::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    self.touched = true;
                }
            }
            FormEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            FormEvent::CursorRight => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
            }
            FormEvent::CursorHome => {
                self.cursor = 0;
            }
            FormEvent::CursorEnd => {
                self.cursor = self.char_len();
            }
            FormEvent::Toggle => {}
        }
    }
}

/// Focusable elements of the create-organization form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgField {
    Name,
    Slug,
    Description,
    Website,
    CoAdmin,
    Authorization,
    Submit,
}

impl OrgField {
    const ORDER: [OrgField; 7] = [
        OrgField::Name,
        OrgField::Slug,
        OrgField::Description,
        OrgField::Website,
        OrgField::CoAdmin,
        OrgField::Authorization,
        OrgField::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|field| *field == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// State of the create-organization form.
///
/// The slug mirrors the name (via [`suggest_slug`]) until the user edits
/// the slug field directly; from then on it is theirs. Validation runs
/// after every edit, but an error is only shown for a field the user has
/// touched, or for every field once a submission has been attempted.
///
/// # Examples
///
/// ```
/// use gatherly::application::{FormEvent, OrgForm};
///
/// let mut form = OrgForm::new();
/// for ch in "Dream Co".chars() {
///     form.apply(FormEvent::Insert(ch));
/// }
/// assert_eq!(form.slug.value, "dream-co");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrgForm {
    pub name: TextField,
    pub slug: TextField,
    pub description: TextField,
    pub website: TextField,
    pub co_admin: TextField,
    pub authorization_confirmed: bool,
    /// Which element currently receives editing events.
    pub focus: OrgField,
    /// Errors for the draft as it stands right now.
    pub errors: ValidationErrors,
    /// Message from the last failed submission, cleared on any edit.
    pub submit_error: Option<String>,
    /// Set once the user has tried to submit, which unhides all errors.
    pub submit_attempted: bool,
}

impl Default for OrgForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgForm {
    pub fn new() -> Self {
        Self {
            name: TextField::new(),
            slug: TextField::new(),
            description: TextField::new(),
            website: TextField::new(),
            co_admin: TextField::new(),
            authorization_confirmed: false,
            focus: OrgField::Name,
            errors: ValidationErrors::new(),
            submit_error: None,
            submit_attempted: false,
        }
    }

    /// Applies one editing event to the focused element.
    ///
    /// Any event that can change a value also clears the previous
    /// submission error and revalidates the draft. Name edits refresh
    /// the suggested slug while the slug field is still untouched.
    pub fn apply(&mut self, event: FormEvent) {
        match (self.focus, event) {
            (OrgField::Authorization, FormEvent::Toggle) => {
                self.authorization_confirmed = !self.authorization_confirmed;
            }
            (OrgField::Authorization, _) | (OrgField::Submit, _) => return,
            (field, event) => {
                if let Some(text) = self.field_mut(field) {
                    text.apply(event);
                }
                if self.focus == OrgField::Name && event.edits_value() && !self.slug.touched {
                    let suggestion = suggest_slug(&self.name.value);
                    self.slug.set_value(suggestion);
                }
            }
        }

        if event.edits_value() || event == FormEvent::Toggle {
            self.submit_error = None;
        }
        self.errors = validate(&self.draft());
    }

    fn field_mut(&mut self, field: OrgField) -> Option<&mut TextField> {
        match field {
            OrgField::Name => Some(&mut self.name),
            OrgField::Slug => Some(&mut self.slug),
            OrgField::Description => Some(&mut self.description),
            OrgField::Website => Some(&mut self.website),
            OrgField::CoAdmin => Some(&mut self.co_admin),
            OrgField::Authorization | OrgField::Submit => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Snapshot of the form as a draft ready for validation or submission.
    pub fn draft(&self) -> OrganizationDraft {
        OrganizationDraft {
            name: self.name.value.clone(),
            slug: self.slug.value.clone(),
            description: self.description.value.clone(),
            website: self.website.value.clone(),
            co_admin: self.co_admin.value.clone(),
            authorization_confirmed: self.authorization_confirmed,
        }
    }

    /// True while the slug still follows the name.
    pub fn slug_is_suggested(&self) -> bool {
        !self.slug.touched && !self.slug.value.is_empty()
    }

    /// The error to display for a field, honoring touched-state gating.
    pub fn visible_error(&self, field: OrgField) -> Option<&FieldError> {
        let (key, touched) = match field {
            OrgField::Name => ("name", self.name.touched),
            OrgField::Slug => ("slug", self.slug.touched),
            OrgField::Description => ("description", self.description.touched),
            OrgField::Website => ("website", self.website.touched),
            OrgField::CoAdmin | OrgField::Authorization | OrgField::Submit => return None,
        };
        if touched || self.submit_attempted {
            self.errors.get(key)
        } else {
            None
        }
    }
}

/// Focusable elements of the new-update form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Title,
    Body,
    Publish,
}

impl UpdateField {
    pub fn next(self) -> Self {
        match self {
            UpdateField::Title => UpdateField::Body,
            UpdateField::Body => UpdateField::Publish,
            UpdateField::Publish => UpdateField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            UpdateField::Title => UpdateField::Publish,
            UpdateField::Body => UpdateField::Title,
            UpdateField::Publish => UpdateField::Body,
        }
    }
}

/// State of the new-update form shown after an organization exists.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateForm {
    pub title: TextField,
    pub body: TextField,
    pub focus: UpdateField,
    pub errors: ValidationErrors,
    pub submit_error: Option<String>,
    pub submit_attempted: bool,
}

impl Default for UpdateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateForm {
    pub fn new() -> Self {
        Self {
            title: TextField::new(),
            body: TextField::new(),
            focus: UpdateField::Title,
            errors: ValidationErrors::new(),
            submit_error: None,
            submit_attempted: false,
        }
    }

    pub fn apply(&mut self, event: FormEvent) {
        match self.focus {
            UpdateField::Title => self.title.apply(event),
            UpdateField::Body => self.body.apply(event),
            UpdateField::Publish => return,
        }

        if event.edits_value() {
            self.submit_error = None;
        }
        self.errors = validate_update(&self.draft());
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn draft(&self) -> UpdateDraft {
        UpdateDraft {
            title: self.title.value.clone(),
            body: self.body.value.clone(),
        }
    }

    pub fn visible_error(&self, field: UpdateField) -> Option<&FieldError> {
        let (key, touched) = match field {
            UpdateField::Title => ("title", self.title.touched),
            UpdateField::Body => ("body", self.body.touched),
            UpdateField::Publish => return None,
        };
        if touched || self.submit_attempted {
            self.errors.get(key)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NAME_MAX_LEN, SLUG_MAX_LEN};

    fn type_into(form: &mut OrgForm, text: &str) {
        for ch in text.chars() {
            form.apply(FormEvent::Insert(ch));
        }
    }

    #[test]
    fn test_text_field_insert_moves_cursor() {
        let mut field = TextField::new();
        field.apply(FormEvent::Insert('h'));
        field.apply(FormEvent::Insert('i'));
        assert_eq!(field.value, "hi");
        assert_eq!(field.cursor, 2);
        assert!(field.touched);
    }

    #[test]
    fn test_text_field_insert_mid_value() {
        let mut field = TextField::new();
        field.set_value("hllo");
        field.cursor = 1;
        field.apply(FormEvent::Insert('e'));
        assert_eq!(field.value, "hello");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_text_field_backspace_and_delete() {
        let mut field = TextField::new();
        field.set_value("abc");
        field.apply(FormEvent::Backspace);
        assert_eq!(field.value, "ab");

        field.apply(FormEvent::CursorHome);
        field.apply(FormEvent::Delete);
        assert_eq!(field.value, "b");

        field.apply(FormEvent::Backspace);
        assert_eq!(field.value, "b");
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_text_field_cursor_counts_characters() {
        let mut field = TextField::new();
        field.set_value("café");
        assert_eq!(field.cursor, 4);
        field.apply(FormEvent::Backspace);
        assert_eq!(field.value, "caf");

        field.set_value("café");
        field.apply(FormEvent::CursorLeft);
        field.apply(FormEvent::CursorLeft);
        field.apply(FormEvent::Insert('f'));
        assert_eq!(field.value, "caffé");
    }

    #[test]
    fn test_text_field_home_end() {
        let mut field = TextField::new();
        field.set_value("word");
        field.apply(FormEvent::CursorHome);
        assert_eq!(field.cursor, 0);
        field.apply(FormEvent::CursorEnd);
        assert_eq!(field.cursor, 4);
        field.apply(FormEvent::CursorRight);
        assert_eq!(field.cursor, 4);
    }

    #[test]
    fn test_set_value_does_not_mark_touched() {
        let mut field = TextField::new();
        field.set_value("prefilled");
        assert!(!field.touched);
    }

    #[test]
    fn test_typing_name_suggests_slug() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Open Collective Inc.");
        assert_eq!(form.slug.value, "open-collective-inc");
        assert!(!form.slug.touched);
        assert!(form.slug_is_suggested());
    }

    #[test]
    fn test_suggestion_tracks_name_deletions() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Acme Co");
        assert_eq!(form.slug.value, "acme-co");
        for _ in 0.."Co".len() + 1 {
            form.apply(FormEvent::Backspace);
        }
        assert_eq!(form.slug.value, "acme");
    }

    #[test]
    fn test_slug_edit_stops_suggestions_permanently() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Acme");
        assert_eq!(form.slug.value, "acme");

        form.focus = OrgField::Slug;
        for _ in 0..4 {
            form.apply(FormEvent::Backspace);
        }
        type_into(&mut form, "oc");
        assert!(form.slug.touched);
        assert_eq!(form.slug.value, "oc");

        form.focus = OrgField::Name;
        type_into(&mut form, " Worldwide");
        assert_eq!(form.name.value, "Acme Worldwide");
        assert_eq!(form.slug.value, "oc");
        assert!(!form.slug_is_suggested());
    }

    #[test]
    fn test_cursor_moves_do_not_refresh_suggestion() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Acme");
        form.slug.set_value("acme"); // cursor at end either way
        form.apply(FormEvent::CursorLeft);
        assert_eq!(form.slug.value, "acme");
    }

    #[test]
    fn test_toggle_authorization() {
        let mut form = OrgForm::new();
        form.focus = OrgField::Authorization;
        form.apply(FormEvent::Toggle);
        assert!(form.authorization_confirmed);
        form.apply(FormEvent::Toggle);
        assert!(!form.authorization_confirmed);
    }

    #[test]
    fn test_toggle_does_nothing_on_text_fields() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Acme");
        form.apply(FormEvent::Toggle);
        assert_eq!(form.name.value, "Acme");
        assert!(!form.authorization_confirmed);
    }

    #[test]
    fn test_validation_follows_every_edit() {
        let mut form = OrgForm::new();
        type_into(&mut form, &"n".repeat(NAME_MAX_LEN + 1));
        assert!(form.errors.get("name").is_some());
        assert!(form.visible_error(OrgField::Name).is_some());

        form.apply(FormEvent::Backspace);
        assert!(form.errors.get("name").is_none());
        assert!(form.visible_error(OrgField::Name).is_none());
    }

    #[test]
    fn test_untouched_field_hides_error_until_submit_attempt() {
        let mut form = OrgForm::new();
        // A long name pushes the suggested slug over its own limit while
        // the slug field itself is still untouched.
        type_into(&mut form, &"a".repeat(SLUG_MAX_LEN + 5));
        assert!(form.errors.get("slug").is_some());
        assert!(form.visible_error(OrgField::Slug).is_none());

        form.submit_attempted = true;
        assert!(form.visible_error(OrgField::Slug).is_some());
    }

    #[test]
    fn test_edit_clears_submission_error() {
        let mut form = OrgForm::new();
        form.submit_error = Some("The slug acme is already taken".to_string());
        form.focus = OrgField::Slug;
        form.apply(FormEvent::Insert('x'));
        assert!(form.submit_error.is_none());
    }

    #[test]
    fn test_cursor_moves_keep_submission_error() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Acme");
        form.submit_error = Some("The slug acme is already taken".to_string());
        form.apply(FormEvent::CursorLeft);
        form.apply(FormEvent::CursorEnd);
        assert!(form.submit_error.is_some());
    }

    #[test]
    fn test_checking_the_box_clears_authorization_error() {
        let mut form = OrgForm::new();
        form.submit_error = Some("Please verify that you are an authorized...".to_string());
        form.focus = OrgField::Authorization;
        form.apply(FormEvent::Toggle);
        assert!(form.authorization_confirmed);
        assert!(form.submit_error.is_none());
    }

    #[test]
    fn test_focus_order_wraps_both_ways() {
        let mut form = OrgForm::new();
        for _ in 0..7 {
            form.focus_next();
        }
        assert_eq!(form.focus, OrgField::Name);

        form.focus_prev();
        assert_eq!(form.focus, OrgField::Submit);
        form.focus_next();
        assert_eq!(form.focus, OrgField::Name);
    }

    #[test]
    fn test_draft_collects_all_fields() {
        let mut form = OrgForm::new();
        type_into(&mut form, "Acme");
        form.focus = OrgField::Description;
        type_into(&mut form, "We make everything");
        form.focus = OrgField::Website;
        type_into(&mut form, "acme.example.org");
        form.focus = OrgField::CoAdmin;
        type_into(&mut form, "joyce");
        form.focus = OrgField::Authorization;
        form.apply(FormEvent::Toggle);

        let draft = form.draft();
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.slug, "acme");
        assert_eq!(draft.description, "We make everything");
        assert_eq!(draft.website, "acme.example.org");
        assert_eq!(draft.co_admin, "joyce");
        assert!(draft.authorization_confirmed);
    }

    #[test]
    fn test_update_form_requires_content() {
        let mut form = UpdateForm::new();
        form.submit_attempted = true;
        form.errors = validate_update(&form.draft());
        assert!(form.visible_error(UpdateField::Title).is_some());
        assert!(form.visible_error(UpdateField::Body).is_some());

        for ch in "March progress".chars() {
            form.apply(FormEvent::Insert(ch));
        }
        form.focus = UpdateField::Body;
        for ch in "We shipped the thing.\nMore soon.".chars() {
            form.apply(FormEvent::Insert(ch));
        }
        assert!(form.errors.is_empty());
        assert!(form.body.value.contains('\n'));
    }

    #[test]
    fn test_update_form_publish_focus_ignores_edits() {
        let mut form = UpdateForm::new();
        form.focus = UpdateField::Publish;
        form.apply(FormEvent::Insert('x'));
        assert!(form.title.value.is_empty());
        assert!(form.body.value.is_empty());
    }
}
