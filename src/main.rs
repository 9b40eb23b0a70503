//! Measurements Dashboard binary
//!
//! Usage:
//!   measurements-dashboard [--api-base URL] [--timeout SECS] [--config FILE] [tui]
//!   measurements-dashboard search [--patient-id ID] [--from T] [--to T] [--json]

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{poll, read, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use measurements_dashboard::cli::{run_search, Args, Mode, EXIT_CONFIG_ERROR, EXIT_QUERY_FAILED};
use measurements_dashboard::config::Config;
use measurements_dashboard::logging::{self, default_log_dir, LogTarget};
use measurements_dashboard::store::{HttpStore, Store};
use measurements_dashboard::ui::{handle_key_event, App, AppState};

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::resolve(&args.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    match args.mode() {
        Mode::Search(search) => {
            let _guard = init_logging(&LogTarget::Stderr);
            let code = match run_search(&config, &search) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    EXIT_QUERY_FAILED
                }
            };
            std::process::exit(code);
        }
        Mode::Tui => {
            let log_dir = args.log_dir.clone().unwrap_or_else(default_log_dir);
            let _guard = init_logging(&LogTarget::File(log_dir));
            run_tui_mode(&config)
        }
    }
}

/// Logging failures are reported but never stop the dashboard
fn init_logging(target: &LogTarget) -> Option<logging::LogGuard> {
    match logging::init(target) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    }
}

fn run_tui_mode(config: &Config) -> io::Result<()> {
    let store = match HttpStore::from_config(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: cannot build HTTP client: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    tracing::info!(base_url = %config.base_url(), "starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Store::Http(store));
    let result = event_loop(&mut terminal, &mut app);

    // Cleanup (also after a loop error)
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while app.state() != AppState::Quitting {
        measurements_dashboard::ui::render(terminal, app)?;

        // Block for input (100ms timeout)
        if poll(Duration::from_millis(100))? {
            if let Event::Key(key) = read()? {
                handle_key_event(app, key);
            }
        }

        // Apply any finished searches; next render shows them
        app.process_search_events();
    }
    Ok(())
}
