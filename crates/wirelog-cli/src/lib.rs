mod app;
mod args;
mod logging;
mod ui;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use wirelog_runtime::{Config, ConnectionManager, Transport, WsTransport};

use app::App;
pub use args::Cli;

/// How long one loop iteration waits on the feed before redrawing.
const TICK: Duration = Duration::from_millis(50);

pub fn run(cli: Cli) -> Result<()> {
    let _log_guard = logging::init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if cli.secure {
        config.secure = true;
    }

    let transport = Arc::new(WsTransport::new()?);
    run_console(&config, transport)
}

fn run_console(config: &Config, transport: Arc<dyn Transport>) -> Result<()> {
    let (status_tx, status_rx) = mpsc::channel();
    let view_active = Arc::new(AtomicBool::new(true));
    let query_flag = view_active.clone();

    let mut manager = ConnectionManager::new(
        config,
        transport,
        Box::new(move |up| {
            let _ = status_tx.send(up);
        }),
        Box::new(move || query_flag.load(Ordering::SeqCst)),
    );
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        std::process::exit(0);
    })?;

    tracing::info!(endpoint = %config.endpoint_url(), "starting console");
    manager.connect();

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, &app))?;

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                handle_key(&mut app, key.code);
            }
        }

        for msg in manager.poll(TICK) {
            app.on_message(msg);
        }
        for up in status_rx.try_iter() {
            app.on_status(up);
        }
    }

    // Stop gating reconnects before teardown so the final close cannot arm
    // a retry timer.
    view_active.store(false, Ordering::SeqCst);
    manager.disconnect();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) {
    if app.is_filter_editing() {
        match code {
            KeyCode::Esc | KeyCode::Enter => app.finish_filter_edit(),
            KeyCode::Backspace => app.filter_backspace(),
            KeyCode::Char(c) => app.filter_push(c),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('/') => app.start_filter_edit(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        _ => {}
    }
}
