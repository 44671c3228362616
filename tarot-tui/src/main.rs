//! tarot-tui - Terminal UI for tarot readings
//!
//! Pick a deck and spread, ask a question, cut the shuffled deck and reveal
//! the drawn cards one by one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use libtarot::config::resolve_data_path;
use libtarot::logging::{self, LogOutput};
use libtarot::Config;
use tui_textarea::TextArea;

use tarot_tui::{
    app::event::{EventHandler, TuiEvent},
    app::{is_editor_key, reduce, Action, AppState, Route, UiConfig},
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui, TuiError,
};

#[derive(Parser, Debug)]
#[command(name = "tarot-tui")]
#[command(version, about = "Terminal client for the tarot reading service")]
#[command(long_about = r#"Terminal client for the tarot reading service.

EXAMPLES:
    # Start on the home screen
    tarot-tui

    # Talk to a different backend
    tarot-tui --api-url http://tarot.local:8000/api

    # Reopen a reading you already drew
    tarot-tui --open /reading/42

ENVIRONMENT:
    TAROT_CONFIG       Path to config.toml
    TAROT_API_URL      Base URL of the reading service
    TAROT_LOG_LEVEL    Log filter (default: info)
    TAROT_LOG_FORMAT   text, json or pretty
    NO_COLOR           Disable colors

EXIT CODES:
    0 - Success
    1 - Error (bad config, terminal failure)
    3 - Invalid input (unknown route)
"#)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the reading service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Screen to open at start (/, /shuffle or /reading/{id})
    #[arg(long, value_name = "ROUTE", default_value = "/")]
    open: String,

    /// Log file (defaults to the data directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<TuiError>()
            .map(TuiError::exit_code)
            .or_else(|| e.downcast_ref::<libtarot::TarotError>().map(|e| e.exit_code()))
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let log_file = match &cli.log_file {
        Some(path) => path.clone(),
        None => resolve_data_path()?.join("tarot-tui.log"),
    };
    let mut logging = logging::from_env(LogOutput::File(log_file.clone()));
    logging.verbose = cli.verbose;
    logging
        .init()
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let route = Route::parse(&cli.open)?;
    tracing::info!(%route, base_url = %config.api.base_url, "Starting tarot-tui");

    let services = ServiceHandle::from_config(&config)?;
    let state = AppState::open(route, UiConfig::from(&config.ui));

    install_panic_hook();
    let mut terminal = setup_terminal().context("Failed to set up terminal")?;

    let result = run_app(&mut terminal, state, services);

    restore_terminal(terminal)?;

    Ok(result?)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_env_overrides(),
        None => Config::load().context("Failed to load config")?,
    };

    let config = match &cli.api_url {
        Some(url) => {
            let mut config = config;
            config.api.base_url = url.clone();
            config
        }
        None => config,
    };

    Ok(config.validated()?)
}

fn run_app(
    terminal: &mut Tui,
    mut state: AppState,
    mut services: ServiceHandle,
) -> tarot_tui::Result<()> {
    let colors = state.config.colors_enabled;
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    // Question editor (stateful widget), rebuilt whenever home is re-entered
    let mut question = TextArea::default();
    let mut epoch = state.epoch;
    let mut route = state.route;

    // Entry effects of the first screen
    for command in state.take_commands() {
        services.execute(command);
    }

    loop {
        if let Some(home) = state.home() {
            ui::home::style_question(&mut question, home, colors);
        }

        terminal.draw(|frame| {
            ui::render(frame, &state, &question);
        })?;

        let action = match event_handler.next()? {
            TuiEvent::Key(key) if is_editor_key(&state, key) => {
                question.input(key);
                Action::QuestionChanged(question.lines().join("\n"))
            }
            other => other.into(),
        };
        state = reduce(state, action);

        // Results from finished service calls
        while let Ok(action) = services.events().try_recv() {
            state = reduce(state, action);
        }

        for command in state.take_commands() {
            services.execute(command);
        }

        if state.epoch != epoch {
            tracing::info!(from = %route, to = %state.route, "Navigated");
            if state.home().is_some() {
                question = TextArea::default();
            }
            epoch = state.epoch;
            route = state.route;
        }

        if state.should_quit {
            tracing::info!("Quitting");
            break;
        }
    }

    Ok(())
}
