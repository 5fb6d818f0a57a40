mod config;
mod controller;
mod host;
mod logging;
mod model;
mod transport;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;

use config::AppConfig;
use controller::AppController;
use host::{CatalogLibrary, ClockPlayer, JsonFileStore};
use model::AppModel;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(
        library = %config.library_path.display(),
        state = %config.state_dir.display(),
        "=== SayItAgain Starting ==="
    );

    let library = CatalogLibrary::open(&config.library_path);
    let store = JsonFileStore::open_or_empty(config.settings_path());
    let app_model = AppModel::new(Box::new(library), Box::new(ClockPlayer::new()), Box::new(store));

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone(), config);

    controller.initialize_library().await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("SayItAgain shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let (playback, ui_state, content_state, should_quit) = {
            let mut model_guard = model.lock().await;

            model_guard.auto_clear_old_errors();
            model_guard.tick();

            (
                model_guard.playback_info(),
                model_guard.ui_state.clone(),
                model_guard.content_state(),
                model_guard.should_quit(),
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &content_state);
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                    model.lock().await.set_error(AppController::format_error(&e));
                }
            }
        }
    }

    Ok(())
}
