use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use owltune::config::Config;
use owltune::controller::AppController;
use owltune::logging;
use owltune::model::{AppModel, HttpBackend};
use owltune::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== OwlTune Starting ===");

    let backend = HttpBackend::new(
        &config.backend_url,
        config.session_cookie.as_deref(),
        config.request_timeout(),
    )
    .context("Invalid backend configuration")?;

    if config.session_cookie.is_none() {
        tracing::warn!("No session cookie configured, the backend will likely answer 401");
    }

    let mut app_model = AppModel::new();
    app_model.set_backend(Arc::new(backend));
    app_model.set_backend_url(config.backend_url.clone()).await;

    tracing::info!(backend_url = %config.backend_url, "Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    // First load runs in the background so the empty list renders at once
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.initialize().await;
    });

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("OwlTune shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let (ui_state, content_state, should_quit) = {
            let model_guard = model.lock().await;

            model_guard.auto_clear_old_notices().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
