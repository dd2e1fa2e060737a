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
    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Team),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Schedule navigation
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => guard.schedule_down(),
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => guard.schedule_up(),
        (MenuItem::Schedule, Char('n') | KeyCode::Home, _) => guard.schedule_jump_to_next(),
        (MenuItem::Schedule, KeyCode::Esc, _) => guard.update_tab(MenuItem::Team),

        // Network
        (_, Char('r'), _) => request = Some(NetworkRequest::RefreshReport),
        (_, Char('c'), _) => request = Some(NetworkRequest::ClearBadgeCache),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
