use std::{
    io::{self, IsTerminal},
    sync::Arc,
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use recall_client::MemoryApi;
use recall_core::state::AppState;
use tokio::sync::mpsc;
use tracing::info;

pub mod app;
pub mod request;
pub mod resource;
pub mod router;
pub mod views;
mod ui;

use app::{App, AppEvent};
use request::Command;

/// Runs the TUI until the user quits. The app state is torn down on every
/// exit path, including terminal setup or restore failures.
pub async fn run(state: AppState, api: Arc<dyn MemoryApi>) -> anyhow::Result<()> {
    let res = run_terminal(&state, api).await;
    state.teardown();
    res
}

async fn run_terminal(state: &AppState, api: Arc<dyn MemoryApi>) -> anyhow::Result<()> {
    if !io::stdout().is_terminal() {
        anyhow::bail!("stdout is not a terminal");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, event::EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(state.counter.clone(), &state.config.initial_route);
    info!("🖥️ TUI started on {}", app.router.current().path());

    let res = run_app(&mut terminal, &mut app, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, event::DisableBracketedPaste)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: Arc<dyn MemoryApi>,
) -> anyhow::Result<()> {
    let (tx_events, mut rx_events) = mpsc::channel::<AppEvent>(32);

    loop {
        if app.should_quit {
            return Ok(());
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(cmd) = app.handle_key(key) {
                        dispatch(cmd, &api, &tx_events);
                    }
                }
                Event::Paste(text) => app.paste(&text),
                _ => {}
            }
        }

        // Handle finished requests
        while let Ok(event) = rx_events.try_recv() {
            app.handle_event(event);
        }
    }
}

/// Runs a view's network request in the background. The outcome comes back
/// through `tx` tagged with the request id it was issued under.
pub fn dispatch(cmd: Command, api: &Arc<dyn MemoryApi>, tx: &mpsc::Sender<AppEvent>) {
    let api = Arc::clone(api);
    let tx = tx.clone();

    match cmd {
        Command::Search { request, query } => {
            tokio::spawn(async move {
                let outcome = api.search(&query).await.map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::SearchFinished { request, outcome }).await;
            });
        }
        Command::FetchMemory { request, id } => {
            tokio::spawn(async move {
                let outcome = api.fetch_memory(id).await.map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::MemoryLoaded { request, outcome }).await;
            });
        }
    }
}
