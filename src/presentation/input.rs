use crate::application::{Action, App, AppMode, FormEvent, OrgField, UpdateField};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Routes a key press to the handler for the current mode and
    /// returns the side effect the event loop should perform, if any.
    pub fn handle_key_event(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<Action> {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match app.mode {
            AppMode::SignedOut => Self::handle_signed_out(key),
            AppMode::OrgForm => Self::handle_org_form(app, key, modifiers),
            AppMode::Submitting | AppMode::UpdateSubmitting => Self::handle_submitting(key),
            AppMode::OrgCreated => Self::handle_org_created(app, key),
            AppMode::UpdateForm => Self::handle_update_form(app, key, modifiers),
            AppMode::UpdatePublished => Self::handle_update_published(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_signed_out(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::ReloadSession),
            _ => None,
        }
    }

    fn handle_org_form(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        app.status_message = None;

        match key {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::F(1) => {
                app.open_help();
                return None;
            }
            _ => {}
        }

        let focus = app.form.focus;
        match key {
            KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
            KeyCode::Enter => match focus {
                OrgField::Submit => return app.request_organization_submission(),
                OrgField::Authorization => app.form.apply(FormEvent::Toggle),
                _ => app.form.focus_next(),
            },
            // Space activates the checkbox and the button, so these two
            // arms must come before the catch-all character insert.
            KeyCode::Char(' ') if focus == OrgField::Authorization => {
                app.form.apply(FormEvent::Toggle);
            }
            KeyCode::Char(' ') if focus == OrgField::Submit => {
                return app.request_organization_submission();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.form.apply(FormEvent::Insert(c));
            }
            KeyCode::Backspace => app.form.apply(FormEvent::Backspace),
            KeyCode::Delete => app.form.apply(FormEvent::Delete),
            KeyCode::Left => app.form.apply(FormEvent::CursorLeft),
            KeyCode::Right => app.form.apply(FormEvent::CursorRight),
            KeyCode::Home => app.form.apply(FormEvent::CursorHome),
            KeyCode::End => app.form.apply(FormEvent::CursorEnd),
            _ => {}
        }
        None
    }

    /// The form is frozen while a request is in flight; only quitting
    /// still works.
    fn handle_submitting(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn handle_org_created(app: &mut App, key: KeyCode) -> Option<Action> {
        app.status_message = None;
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('u') => {
                app.show_update_form();
                None
            }
            KeyCode::Char('c') => app
                .created
                .as_ref()
                .map(|created| Action::CopyToClipboard(created.url())),
            KeyCode::F(1) => {
                app.open_help();
                None
            }
            _ => None,
        }
    }

    fn handle_update_form(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        app.status_message = None;

        match key {
            KeyCode::Esc => {
                app.leave_update_form();
                return None;
            }
            KeyCode::F(1) => {
                app.open_help();
                return None;
            }
            _ => {}
        }

        let focus = app.update_form.focus;
        match key {
            KeyCode::Tab => app.update_form.focus_next(),
            KeyCode::BackTab => app.update_form.focus_prev(),
            KeyCode::Enter => match focus {
                UpdateField::Title => app.update_form.focus_next(),
                // The body is multi-line, Enter types a newline there.
                UpdateField::Body => app.update_form.apply(FormEvent::Insert('\n')),
                UpdateField::Publish => return app.request_update_submission(),
            },
            KeyCode::Char(' ') if focus == UpdateField::Publish => {
                return app.request_update_submission();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.update_form.apply(FormEvent::Insert(c));
            }
            KeyCode::Backspace => app.update_form.apply(FormEvent::Backspace),
            KeyCode::Delete => app.update_form.apply(FormEvent::Delete),
            KeyCode::Left => app.update_form.apply(FormEvent::CursorLeft),
            KeyCode::Right => app.update_form.apply(FormEvent::CursorRight),
            KeyCode::Home => app.update_form.apply(FormEvent::CursorHome),
            KeyCode::End => app.update_form.apply(FormEvent::CursorEnd),
            _ => {}
        }
        None
    }

    fn handle_update_published(app: &mut App, key: KeyCode) -> Option<Action> {
        app.status_message = None;
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('n') => {
                app.start_new_update();
                None
            }
            KeyCode::Char('c') => app
                .published_update
                .as_ref()
                .map(|update| Action::CopyToClipboard(update.url())),
            KeyCode::F(1) => {
                app.open_help();
                None
            }
            _ => None,
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, AppMode};
    use crate::domain::{CreatedEntity, SubmissionResult};

    fn press(app: &mut App, key: KeyCode) -> Option<Action> {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn filled_valid_form(app: &mut App) {
        type_str(app, "Acme Inc");
        app.form.focus = OrgField::Authorization;
        press(app, KeyCode::Char(' '));
    }

    fn created_app() -> App {
        let mut app = App::default();
        type_str(&mut app, "Acme Inc");
        app.begin_submission();
        app.set_submission_result(SubmissionResult::Success(CreatedEntity {
            id: "org_1".to_string(),
            slug: "acme-inc".to_string(),
        }));
        app
    }

    #[test]
    fn test_typing_fills_field_and_suggests_slug() {
        let mut app = App::default();

        type_str(&mut app, "Dream Co");

        assert_eq!(app.form.name.value, "Dream Co");
        assert_eq!(app.form.slug.value, "dream-co");
    }

    #[test]
    fn test_tab_cycles_through_all_fields() {
        let mut app = App::default();
        assert_eq!(app.form.focus, OrgField::Name);

        for expected in [
            OrgField::Slug,
            OrgField::Description,
            OrgField::Website,
            OrgField::CoAdmin,
            OrgField::Authorization,
            OrgField::Submit,
            OrgField::Name,
        ] {
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.form.focus, expected);
        }

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.focus, OrgField::Submit);
    }

    #[test]
    fn test_enter_advances_to_next_field() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.focus, OrgField::Slug);
    }

    #[test]
    fn test_space_toggles_authorization_checkbox() {
        let mut app = App::default();
        app.form.focus = OrgField::Authorization;

        press(&mut app, KeyCode::Char(' '));
        assert!(app.form.authorization_confirmed);

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.form.authorization_confirmed);
    }

    #[test]
    fn test_space_still_types_into_text_fields() {
        let mut app = App::default();
        type_str(&mut app, "a b");
        assert_eq!(app.form.name.value, "a b");
    }

    #[test]
    fn test_submit_blocked_while_fields_invalid() {
        let mut app = App::default();
        type_str(&mut app, &"x".repeat(60));
        app.form.focus = OrgField::Submit;

        let action = press(&mut app, KeyCode::Enter);

        assert_eq!(action, None);
        assert_eq!(app.mode, AppMode::OrgForm);
        assert!(app.form.submit_attempted);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_submit_without_authorization_fails_without_action() {
        let mut app = App::default();
        type_str(&mut app, "Acme Inc");
        app.form.focus = OrgField::Submit;

        let action = press(&mut app, KeyCode::Enter);

        assert_eq!(action, None);
        assert_eq!(app.mode, AppMode::OrgForm);
        let error = app.form.submit_error.as_deref().unwrap();
        assert!(error.contains("authorized representative"));
    }

    #[test]
    fn test_submit_returns_action_when_valid() {
        let mut app = App::default();
        filled_valid_form(&mut app);
        app.form.focus = OrgField::Submit;

        let action = press(&mut app, KeyCode::Enter);

        match action {
            Some(Action::SubmitOrganization(draft)) => {
                assert_eq!(draft.name, "Acme Inc");
                assert_eq!(draft.slug, "acme-inc");
                assert!(draft.authorization_confirmed);
            }
            other => panic!("expected a submission action, got {:?}", other),
        }
    }

    #[test]
    fn test_space_on_button_also_submits() {
        let mut app = App::default();
        filled_valid_form(&mut app);
        app.form.focus = OrgField::Submit;

        let action = press(&mut app, KeyCode::Char(' '));
        assert!(matches!(action, Some(Action::SubmitOrganization(_))));
    }

    #[test]
    fn test_keys_frozen_while_submitting() {
        let mut app = App::default();
        filled_valid_form(&mut app);
        app.begin_submission();

        assert_eq!(press(&mut app, KeyCode::Char('z')), None);
        assert_eq!(press(&mut app, KeyCode::Tab), None);
        assert_eq!(app.form.name.value, "Acme Inc");

        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        for mode in [
            AppMode::SignedOut,
            AppMode::OrgForm,
            AppMode::Submitting,
            AppMode::OrgCreated,
            AppMode::UpdateForm,
            AppMode::UpdateSubmitting,
            AppMode::UpdatePublished,
            AppMode::Help,
        ] {
            let mut app = App::default();
            app.mode = mode;
            let action =
                InputHandler::handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(action, Some(Action::Quit), "mode {:?}", mode);
        }
    }

    #[test]
    fn test_org_created_screen_keys() {
        let mut app = created_app();
        assert_eq!(app.mode, AppMode::OrgCreated);

        let action = press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            action,
            Some(Action::CopyToClipboard(
                "https://gatherly.org/acme-inc".to_string()
            ))
        );

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.mode, AppMode::UpdateForm);
    }

    #[test]
    fn test_enter_in_body_inserts_newline() {
        let mut app = created_app();
        press(&mut app, KeyCode::Char('u'));

        type_str(&mut app, "Title");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.update_form.focus, UpdateField::Body);

        type_str(&mut app, "line one");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "line two");

        assert_eq!(app.update_form.body.value, "line one\nline two");
    }

    #[test]
    fn test_publish_returns_update_action() {
        let mut app = created_app();
        press(&mut app, KeyCode::Char('u'));

        type_str(&mut app, "Big news");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "We moved.");
        app.update_form.focus = UpdateField::Publish;

        let action = press(&mut app, KeyCode::Enter);

        match action {
            Some(Action::SubmitUpdate {
                organization_id,
                draft,
            }) => {
                assert_eq!(organization_id, "org_1");
                assert_eq!(draft.title, "Big news");
                assert_eq!(draft.body, "We moved.");
            }
            other => panic!("expected an update action, got {:?}", other),
        }
    }

    #[test]
    fn test_esc_leaves_update_form_and_keeps_draft() {
        let mut app = created_app();
        press(&mut app, KeyCode::Char('u'));
        type_str(&mut app, "Draft title");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::OrgCreated);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.update_form.title.value, "Draft title");
    }

    #[test]
    fn test_help_opens_scrolls_and_closes() {
        let mut app = App::default();

        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.help_scroll, 6);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.help_scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::OrgForm);
    }

    #[test]
    fn test_help_returns_to_the_screen_it_came_from() {
        let mut app = created_app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::OrgCreated);
    }

    #[test]
    fn test_signed_out_keys() {
        let mut app = App::signed_out("bad session".to_string());

        assert_eq!(
            press(&mut app, KeyCode::Char('r')),
            Some(Action::ReloadSession)
        );
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(press(&mut app, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_update_published_screen_keys() {
        let mut app = created_app();
        press(&mut app, KeyCode::Char('u'));
        type_str(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "World");
        app.update_form.focus = UpdateField::Publish;
        if let Some(Action::SubmitUpdate { .. }) = press(&mut app, KeyCode::Enter) {
            app.begin_update_submission();
        }
        app.set_submission_result(SubmissionResult::Success(CreatedEntity {
            id: "upd_1".to_string(),
            slug: "hello".to_string(),
        }));
        assert_eq!(app.mode, AppMode::UpdatePublished);

        let action = press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            action,
            Some(Action::CopyToClipboard(
                "https://gatherly.org/acme-inc/updates/hello".to_string()
            ))
        );

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, AppMode::UpdateForm);
        assert!(app.update_form.title.value.is_empty());
    }
}
