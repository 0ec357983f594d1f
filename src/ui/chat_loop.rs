//! Main chat event loop and terminal lifecycle.
//!
//! Owns the alternate screen: raw mode is entered only after the session is
//! fully prepared, and restored on every exit path out of the loop.

use crate::api::CompletionClient;
use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::core::config::Config;
use crate::core::session::{initialize_logging, resolve_env_credentials, SessionContext};
use crate::core::settings::GenerationSettings;
use crate::ui::renderer::ui;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, time::Duration};

pub async fn run_chat(
    model: Option<String>,
    temperature: Option<f64>,
    log: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    let credentials = match resolve_env_credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let settings = match GenerationSettings::resolve(
        model.as_deref(),
        temperature,
        config.default_model,
        config.default_temperature,
    ) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let logging = initialize_logging(log);
    let session = SessionContext::new(settings, logging);
    let client = CompletionClient::new(credentials.base_url, credentials.api_key);
    let mut app = App::new(session, Box::new(client));

    tracing::info!(model = %app.session.settings.model, "starting chat session");

    // Setup terminal only after successful app creation
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if app.exit_requested {
            return Ok(());
        }

        // A submission begun on the previous iteration has had its frame
        // drawn (user turn plus thinking indicator), so the blocking call
        // can go out now. The UI stays frozen until it resolves.
        if app.pending {
            let result = app
                .backend
                .complete(&app.session.settings, &app.session.transcript)
                .await;
            app.finish_submission(result);
            continue;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) && (c == 'c' || c == 'C') {
                        return Ok(());
                    }
                    app.input.push(c);
                }
                KeyCode::Backspace => {
                    app.input.pop();
                }
                KeyCode::Enter => {
                    let input = app.take_input();
                    if input.trim().is_empty() {
                        continue;
                    }
                    match process_input(app, &input) {
                        CommandResult::Continue => {}
                        CommandResult::ProcessAsMessage(text) => app.begin_submission(text),
                    }
                }
                KeyCode::Up => app.scroll_up(1),
                KeyCode::Down => app.scroll_down(1),
                KeyCode::PageUp => app.scroll_up(10),
                KeyCode::PageDown => app.scroll_down(10),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_up(3),
                MouseEventKind::ScrollDown => app.scroll_down(3),
                _ => {}
            },
            _ => {}
        }
    }
}
