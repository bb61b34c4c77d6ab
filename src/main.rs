mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use anyhow::Context;
use cfb_api::client::CfbApi;
use cfb_api::present::{present, rank_by_watchability};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

enum Command {
    Tui,
    Dump,
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match handle_cli_args() {
        Command::Exit => return Ok(()),
        Command::Dump => return dump_scoreboard(&AppSettings::load()).await,
        Command::Tui => {}
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let settings = AppSettings::load();
    let client = CfbApi::new(settings.source.clone());
    let refresh = settings.refresh;
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic refetch thread
    let periodic_task = refresh.map(|period| {
        info!("refetching every {}s", period.as_secs());
        tokio::spawn(PeriodicRefresher::new(network_req_tx.clone(), period).run())
    });

    // Trigger the first fetch on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    if let Some(task) = periodic_task {
        task.abort();
    }

    cleanup_terminal();
    Ok(())
}

fn handle_cli_args() -> Command {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Command::Tui;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Command::Exit
        }
        "-V" | "--version" => {
            println!("cfbwatch {}", env!("CARGO_PKG_VERSION"));
            Command::Exit
        }
        "--dump" => Command::Dump,
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cfbwatch - college football scoreboard, most watchable games first

Usage:
  cfbwatch
  cfbwatch --dump      fetch once and print the ranked games as JSON
  cfbwatch --help
  cfbwatch --version

Environment:
  CFBWATCH_SCOREBOARD_JSON   Path to a local scoreboard JSON snapshot (skips the network)
  CFBWATCH_ENDPOINT          Scoreboard URL (default ESPN college football scoreboard)
  CFBWATCH_DATES             ESPN dates value, e.g. 20241019 (default today + 6 days)
  CFBWATCH_LIMIT             Maximum events per fetch (default 300)
  CFBWATCH_GROUPS            ESPN group id (default 80, FBS)
  CFBWATCH_REFRESH_SECS      Refetch interval in seconds, 0 disables (default 60)
  CFBWATCH_LOG               Log level: error, warn, info, debug, trace"
}

/// One fetch cycle straight to stdout. A failed fetch is the process' error.
async fn dump_scoreboard(settings: &AppSettings) -> anyhow::Result<()> {
    let client = CfbApi::new(settings.source.clone());
    let response = client
        .fetch_scoreboard()
        .await
        .context("fetching scoreboard")?;

    let mut cards = present(&response);
    rank_by_watchability(&mut cards);
    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::FetchScoreboard).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::FetchStarted => {
            app.lock().await.on_fetch_started();
        }
        NetworkResponse::ScoreboardLoaded { cards } => {
            info!("loaded {} games", cards.len());
            app.lock().await.on_scoreboard_loaded(cards);
        }
        NetworkResponse::FetchFailed { error } => {
            error!("Network error: {error}");
            app.lock().await.on_fetch_failed(error);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort: also runs from the panic hook, where there is nobody to
/// report a failure to.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
