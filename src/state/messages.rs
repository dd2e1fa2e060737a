use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use rink_api::TeamSnapshot;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadReport,
    RefreshReport,
    /// Forget every memoized badge and fetch the report again.
    ClearBadgeCache,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ReportLoaded { snapshot: TeamSnapshot },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Once per second, keeps kickoff countdowns current.
    ClockTick,
}
