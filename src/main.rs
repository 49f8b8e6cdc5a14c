mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::AppConfig;
use controller::AppController;
use model::{AppModel, CatalogClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let _log_guard = match logging::init_logging(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {:#}", e);
            None
        }
    };

    tracing::info!("=== bookscout starting ===");
    tracing::debug!(?config, "Configuration loaded");

    let catalog = CatalogClient::new(config.catalog_url.clone(), config.request_timeout)?;
    tracing::info!(url = catalog.base_url(), "Catalog client ready");

    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone(), Arc::new(catalog));

    if controller.search_for(&config.initial_query).await.is_some() {
        tracing::info!(query = %config.initial_query, "Initial search started");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("bookscout shutting down");
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

        // Short poll so fetch completions show up without a key press
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
