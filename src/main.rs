//! Gatherly - Terminal Client
//!
//! A terminal client for the Gatherly platform. Fill in a form, submit it,
//! and get the public link to your new organization page; then publish
//! updates to it. Submissions run on a background thread so the interface
//! stays responsive while the API answers.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{Action, App};
use infrastructure::{ApiClient, PendingSubmission, SessionStore, Submitter};
use presentation::{render_ui, InputHandler};

/// Entry point for the Gatherly terminal client.
///
/// Loads the session file, sets up the terminal interface, and runs the
/// main event loop until the user quits. A missing or broken session
/// does not abort: the client starts on the signed-out screen and
/// explains how to fix it.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (mut app, mut submitter) = load_session();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut submitter);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn load_session() -> (App, Option<Submitter>) {
    match SessionStore::load() {
        Ok(session) => match ApiClient::new(&session.api_url, &session.token) {
            Ok(client) => (App::signed_in(session.user), Some(Submitter::new(client))),
            Err(e) => (App::signed_out(e.to_string()), None),
        },
        Err(reason) => (App::signed_out(reason), None),
    }
}

/// Main application event loop.
///
/// Redraws the screen, polls the in-flight submission if there is one,
/// and processes keyboard input. Input polling uses a short timeout so
/// a finished submission is picked up even while no key is pressed; the
/// idle ticks also drive the progress dots.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    submitter: &mut Option<Submitter>,
) -> io::Result<()> {
    let mut pending: Option<PendingSubmission> = None;

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Some(handle) = &pending {
            if let Some(result) = handle.poll() {
                app.set_submission_result(result);
                pending = None;
            }
        }

        if !event::poll(Duration::from_millis(100))? {
            app.tick = app.tick.wrapping_add(1);
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match InputHandler::handle_key_event(app, key.code, key.modifiers) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::SubmitOrganization(draft)) => {
                    if let Some(submitter) = submitter {
                        app.begin_submission();
                        pending = Some(submitter.submit_organization(draft));
                    } else {
                        app.form.submit_error = Some("You are not signed in".to_string());
                    }
                }
                Some(Action::SubmitUpdate {
                    organization_id,
                    draft,
                }) => {
                    if let Some(submitter) = submitter {
                        app.begin_update_submission();
                        pending = Some(submitter.submit_update(organization_id, draft));
                    } else {
                        app.update_form.submit_error = Some("You are not signed in".to_string());
                    }
                }
                Some(Action::CopyToClipboard(text)) => {
                    app.status_message = Some(match copy_to_clipboard(&text) {
                        Ok(()) => "Link copied to clipboard".to_string(),
                        Err(e) => format!("Clipboard error: {}", e),
                    });
                }
                Some(Action::ReloadSession) => {
                    let (reloaded, new_submitter) = load_session();
                    *app = reloaded;
                    *submitter = new_submitter;
                }
                None => {}
            }
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| e.to_string())
}
