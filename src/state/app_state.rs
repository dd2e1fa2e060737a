use crate::app::MenuItem;
use rink_api::{MatchRecord, ParseStats, TeamReport};

// ---------------------------------------------------------------------------
// Team overview state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamState {
    pub report: Option<TeamReport>,
    pub stats: ParseStats,
    /// Wall-clock time of the last successful load, "HH:MM:SS".
    pub updated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Schedule list state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScheduleState {
    /// Tracked team's fixtures in page order.
    pub games: Vec<MatchRecord>,
    pub selected: usize,
}

impl ScheduleState {
    /// Replace the fixture list. The first load selects the next upcoming
    /// game; later loads keep the cursor where it was.
    pub fn load(&mut self, games: Vec<MatchRecord>) {
        let first_load = self.games.is_empty();
        self.games = games;
        self.selected = if first_load {
            self.next_upcoming_index().unwrap_or(0)
        } else {
            self.selected.min(self.games.len().saturating_sub(1))
        };
    }

    pub fn navigate_down(&mut self) {
        if self.selected + 1 < self.games.len() {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn jump_to_next_upcoming(&mut self) {
        if let Some(idx) = self.next_upcoming_index() {
            self.selected = idx;
        }
    }

    pub fn selected_game(&self) -> Option<&MatchRecord> {
        self.games.get(self.selected)
    }

    pub fn next_upcoming_index(&self) -> Option<usize> {
        self.games.iter().position(MatchRecord::is_upcoming)
    }

    /// First visible row so that the selection stays inside `height` rows.
    pub fn window_start(&self, height: usize) -> usize {
        if height == 0 {
            return self.selected;
        }
        self.selected.saturating_sub(height - 1)
    }
}

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub team: TeamState,
    pub schedule: ScheduleState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            team: TeamState::default(),
            schedule: ScheduleState::default(),
        }
    }
}
