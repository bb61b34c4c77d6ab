use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Scoreboard),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Scoreboard navigation
        (MenuItem::Scoreboard, Char('j') | KeyCode::Down, _) => {
            guard.state.scoreboard.select_next();
        }
        (MenuItem::Scoreboard, Char('k') | KeyCode::Up, _) => {
            guard.state.scoreboard.select_prev();
        }
        (MenuItem::Scoreboard, Char('g') | KeyCode::Home, _) => {
            guard.state.scoreboard.select_first();
        }
        (MenuItem::Scoreboard, Char('G') | KeyCode::End, _) => {
            guard.state.scoreboard.select_last();
        }
        (MenuItem::Scoreboard, Char('s'), _) => guard.state.scoreboard.toggle_ranked(),

        // Global
        (_, Char('r'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::FetchScoreboard).await;
        }
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
