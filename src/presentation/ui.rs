use super::messages;
use crate::application::{App, AppMode, OrgField, OrgForm, TextField, UpdateField, UpdateForm};
use crate::domain::DESCRIPTION_MAX_LEN;
use crate::infrastructure::{SESSION_ENV, SessionStore};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const NAME_PLACEHOLDER: &str = "i.e. Salesforce, Airbnb";
const SLUG_PLACEHOLDER: &str = "airbnb";
const DESCRIPTION_PLACEHOLDER: &str = "Making the world a better place";
const WEBSITE_PLACEHOLDER: &str = "www.airbnb.com";
const CO_ADMIN_PLACEHOLDER: &str = "Username of another admin";
const TITLE_PLACEHOLDER: &str = "Normal title";
const BODY_PLACEHOLDER: &str = "What would you like to say?";
const SLUG_PREFIX: &str = "gatherly.org/";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let body_mode = if app.mode == AppMode::Help {
        app.help_return
    } else {
        app.mode
    };

    render_header(f, app, body_mode, chunks[0]);

    match body_mode {
        AppMode::SignedOut => render_signed_out(f, app, chunks[1]),
        AppMode::OrgForm | AppMode::Submitting => render_org_form(f, app, chunks[1]),
        AppMode::OrgCreated => render_org_created(f, app, chunks[1]),
        AppMode::UpdateForm | AppMode::UpdateSubmitting => render_update_form(f, app, chunks[1]),
        AppMode::UpdatePublished => render_update_published(f, app, chunks[1]),
        AppMode::Help => {}
    }

    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, body_mode: AppMode, area: Rect) {
    let account = app
        .user
        .as_ref()
        .map(|user| format!(" | {} [{}]", user.name, user.initials()))
        .unwrap_or_default();
    let header = Paragraph::new(format!("gatherly - {}{}", screen_title(body_mode), account))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn screen_title(mode: AppMode) -> String {
    match mode {
        AppMode::SignedOut => "Sign in".to_string(),
        AppMode::OrgForm | AppMode::Submitting => messages::text("createOrganization.title"),
        AppMode::OrgCreated => messages::text("createOrganization.success.title"),
        AppMode::UpdateForm | AppMode::UpdateSubmitting => messages::text("updates.new.title"),
        AppMode::UpdatePublished => messages::text("updates.published.title"),
        AppMode::Help => "Help".to_string(),
    }
}

fn render_org_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let submitting = app.mode == AppMode::Submitting;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let focus = |field: OrgField| !submitting && form.focus == field;
    let error_text = |field: OrgField| form.visible_error(field).map(messages::field_error);

    render_input(
        f,
        chunks[0],
        messages::text("createOrg.form.nameLabel"),
        "",
        &form.name,
        NAME_PLACEHOLDER,
        focus(OrgField::Name),
        error_text(OrgField::Name),
        None,
    );

    let slug_hint = if form.slug_is_suggested() {
        Some(messages::text("createOrg.form.suggestedLabel"))
    } else {
        None
    };
    render_input(
        f,
        chunks[1],
        messages::text("createOrg.form.urlLabel"),
        SLUG_PREFIX,
        &form.slug,
        SLUG_PLACEHOLDER,
        focus(OrgField::Slug),
        error_text(OrgField::Slug),
        slug_hint,
    );

    let max = DESCRIPTION_MAX_LEN.to_string();
    render_input(
        f,
        chunks[2],
        messages::text("createOrg.form.descriptionLabel"),
        "",
        &form.description,
        DESCRIPTION_PLACEHOLDER,
        focus(OrgField::Description),
        error_text(OrgField::Description),
        Some(messages::format(
            "createOrg.form.descriptionHint",
            &[("max", max.as_str())],
        )),
    );

    render_input(
        f,
        chunks[3],
        messages::text("createOrg.form.websiteLabel"),
        "",
        &form.website,
        WEBSITE_PLACEHOLDER,
        focus(OrgField::Website),
        error_text(OrgField::Website),
        None,
    );

    render_co_admin(f, app, chunks[4], focus(OrgField::CoAdmin));
    render_authorization(f, form, chunks[5], focus(OrgField::Authorization));
    render_submit_button(f, app, chunks[6], focus(OrgField::Submit), submitting);

    if let Some(error) = form.submit_error.as_deref() {
        render_banner(f, error.to_string(), chunks[7]);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_input(
    f: &mut Frame,
    area: Rect,
    label: String,
    prefix: &str,
    field: &TextField,
    placeholder: &str,
    focused: bool,
    error: Option<String>,
    hint: Option<String>,
) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(label);
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(hint) = hint {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", hint),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let paragraph = Paragraph::new(input_line(prefix, field, placeholder, focused)).block(block);
    f.render_widget(paragraph, area);
}

fn input_line(prefix: &str, field: &TextField, placeholder: &str, focused: bool) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if !prefix.is_empty() {
        spans.push(Span::styled(
            prefix.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if field.value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else if focused {
        spans.extend(cursor_spans(&field.value, field.cursor));
    } else {
        spans.push(Span::raw(field.value.clone()));
    }
    Line::from(spans)
}

/// Splits a value at the cursor and renders the character under it
/// reversed, standing in for the terminal cursor.
fn cursor_spans(value: &str, cursor: usize) -> Vec<Span<'static>> {
    let chars: Vec<char> = value.chars().collect();
    let at = cursor.min(chars.len());
    let before: String = chars[..at].iter().collect();
    let under: String = chars
        .get(at)
        .map(|ch| ch.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = if at < chars.len() {
        chars[at + 1..].iter().collect()
    } else {
        String::new()
    };
    vec![
        Span::raw(before),
        Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ]
}

fn render_co_admin(f: &mut Frame, app: &App, area: Rect, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(messages::text("createOrg.form.coAdminLabel"));

    let mut spans: Vec<Span<'static>> = Vec::new();
    if let Some(user) = &app.user {
        spans.push(Span::styled(
            format!(" {} {} ", user.initials(), user.name),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ));
        spans.push(Span::raw("  "));
    }
    spans.extend(input_line("", &app.form.co_admin, CO_ADMIN_PLACEHOLDER, focused).spans);

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_authorization(f: &mut Frame, form: &OrgForm, area: Rect, focused: bool) {
    let marker = if form.authorization_confirmed {
        "[x]"
    } else {
        "[ ]"
    };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(format!(
        "{} {}",
        marker,
        messages::text("createOrganization.tos.label")
    ))
    .style(style)
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_submit_button(f: &mut Frame, app: &App, area: Rect, focused: bool, submitting: bool) {
    let label = if submitting {
        format!("Submitting{}", spinner_dots(app.tick))
    } else {
        messages::text("createOrganization.button")
    };
    let style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

fn render_banner(f: &mut Frame, message: String, area: Rect) {
    if area.height == 0 {
        return;
    }
    let banner = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    f.render_widget(banner, area);
}

fn render_update_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.update_form;
    let submitting = app.mode == AppMode::UpdateSubmitting;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(area);

    let focus = |field: UpdateField| !submitting && form.focus == field;

    render_input(
        f,
        chunks[0],
        messages::text("updates.new.titleLabel"),
        "",
        &form.title,
        TITLE_PLACEHOLDER,
        focus(UpdateField::Title),
        form.visible_error(UpdateField::Title).map(messages::field_error),
        None,
    );

    render_body(f, form, chunks[1], focus(UpdateField::Body));
    render_publish_button(f, app, chunks[2], focus(UpdateField::Publish), submitting);

    if let Some(error) = form.submit_error.as_deref() {
        let banner = messages::format("updates.new.error", &[("err", error)]);
        render_banner(f, banner, chunks[3]);
    }
}

fn render_body(f: &mut Frame, form: &UpdateForm, area: Rect, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(messages::text("updates.new.bodyLabel"));
    if let Some(error) = form.visible_error(UpdateField::Body).map(messages::field_error) {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        )));
    }

    let text = if form.body.value.is_empty() && !focused {
        Text::from(Span::styled(
            BODY_PLACEHOLDER.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else if focused {
        body_text(&form.body)
    } else {
        Text::from(form.body.value.clone())
    };

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Multi-line variant of [`cursor_spans`]: the body may contain
/// newlines, so the cursor has to land on the right line.
fn body_text(field: &TextField) -> Text<'static> {
    let segments: Vec<&str> = field.value.split('\n').collect();
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut consumed = 0usize;
    let mut placed = false;
    for segment in &segments {
        let seg_chars = segment.chars().count();
        if !placed && field.cursor <= consumed + seg_chars {
            lines.push(Line::from(cursor_spans(segment, field.cursor - consumed)));
            placed = true;
        } else {
            lines.push(Line::from(segment.to_string()));
        }
        consumed += seg_chars + 1;
    }
    Text::from(lines)
}

fn render_publish_button(f: &mut Frame, app: &App, area: Rect, focused: bool, submitting: bool) {
    let label = if submitting {
        format!("Publishing{}", spinner_dots(app.tick))
    } else {
        messages::text("updates.new.publishButton")
    };
    let style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

fn render_org_created(f: &mut Frame, app: &App, area: Rect) {
    let Some(created) = &app.created else { return };
    let lines = vec![
        Line::from(Span::styled(
            messages::text("createOrganization.success.title"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(messages::format(
            "createOrganization.success.ready",
            &[("name", created.name.as_str())],
        )),
        Line::from(Span::styled(
            created.url(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("u: publish an update   c: copy link   q: quit"),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_update_published(f: &mut Frame, app: &App, area: Rect) {
    let Some(update) = &app.published_update else { return };
    let lines = vec![
        Line::from(Span::styled(
            messages::text("updates.published.title"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("\u{201c}{}\u{201d}", update.title)),
        Line::from(Span::styled(update.url(), Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from("n: write another   c: copy link   q: quit"),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_signed_out(f: &mut Frame, app: &App, area: Rect) {
    let reason = app
        .signed_out_reason
        .as_deref()
        .unwrap_or("No session found");
    let lines = vec![
        Line::from(Span::styled(
            "Sign in to continue",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from("Create a personal token in your account settings on the web,"),
        Line::from("then save it to:"),
        Line::from(Span::styled(
            SessionStore::path(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(r#"  { "token": "<your token>", "user": { "name": "<your name>" } }"#),
        Line::from(""),
        Line::from(format!(
            "The {} environment variable overrides the location.",
            SESSION_ENV
        )),
        Line::from(""),
        Line::from("r: retry   q: quit"),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Signed out"));
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let base = match app.mode {
        AppMode::SignedOut => "r: retry | q: quit".to_string(),
        AppMode::OrgForm => {
            "Tab/\u{2191}\u{2193}: fields | Enter: next field, submit on the button | Space: toggle | F1: help | Esc: quit"
                .to_string()
        }
        AppMode::Submitting => format!("Submitting your organization{}", spinner_dots(app.tick)),
        AppMode::OrgCreated => "u: publish an update | c: copy link | q: quit".to_string(),
        AppMode::UpdateForm => {
            "Tab: fields | Enter in body: new line | F1: help | Esc: back".to_string()
        }
        AppMode::UpdateSubmitting => format!("Publishing your update{}", spinner_dots(app.tick)),
        AppMode::UpdatePublished => "n: another update | c: copy link | q: quit".to_string(),
        AppMode::Help => {
            "\u{2191}\u{2193}/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"
                .to_string()
        }
    };

    let text = match app.mode {
        AppMode::OrgForm
        | AppMode::OrgCreated
        | AppMode::UpdateForm
        | AppMode::UpdatePublished => app.status_message.clone().unwrap_or(base),
        _ => base,
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::SignedOut => Style::default().fg(Color::Red),
            AppMode::OrgForm => Style::default(),
            AppMode::Submitting | AppMode::UpdateSubmitting => Style::default().fg(Color::Yellow),
            AppMode::OrgCreated | AppMode::UpdatePublished => Style::default().fg(Color::Green),
            AppMode::UpdateForm => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn spinner_dots(tick: usize) -> String {
    ".".repeat(1 + tick % 3)
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "gatherly Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"GATHERLY TERMINAL CLIENT

=== CREATE AN ORGANIZATION ===
Fill the form top to bottom. The URL follows the name with a suggested
slug until you edit the URL field yourself; from then on it is yours.

Field rules:
• Name             up to 50 characters
• URL              gatherly.org/<slug>: up to 30 characters, lowercase
                   letters, numbers and single hyphens only
• Description      up to 160 characters
• Website          optional, must look like a web address
• Administrators   username of another admin to invite (optional)
• Checkbox         confirm you may act for this organization (required)

Validation runs as you type. A field shows its error once you have
edited it, or after you try to submit.

=== FORM KEYS ===
Tab / Down        Next field
Shift+Tab / Up    Previous field
Enter             Next field; on the button, submit
Space             Toggle the checkbox; activate the button
Left/Right        Move the cursor inside a field
Home/End          Jump to the start/end of a field
F1                This help
Esc               Quit

=== WHILE SUBMITTING ===
The form freezes and the status bar shows progress. On success you get
the public link to the new organization page. On failure the form comes
back exactly as you left it, with the server's message underneath the
button. Esc or q quits even while a submission is running.

=== AFTER SUCCESS ===
u                 Write an update for the new organization
c                 Copy the public link to the clipboard
q                 Quit

=== UPDATES ===
An update needs a title and a body. Enter inserts a new line while the
body has focus; publish with the button. Esc returns to the success
screen and keeps your draft.

=== SESSION ===
The client reads ~/.config/gatherly/session.json, written when you
create a personal token in the web app. Set GATHERLY_SESSION to use a
different file. Your token never leaves the machine except toward the
configured API endpoint.

=== HELP NAVIGATION ===
↑↓ or j/k         Scroll one line
Page Up/Down      Scroll five lines
Home              Jump to the top
Esc/F1/q          Close this window"#
        .to_string()
}
