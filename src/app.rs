use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::Local;
use rink_api::TeamSnapshot;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Team,
    Schedule,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_report_loaded(&mut self, snapshot: TeamSnapshot) {
        self.state.last_error = None;
        self.state.team.report = Some(snapshot.report);
        self.state.team.stats = snapshot.stats;
        self.state.team.updated_at = Some(Local::now().format("%H:%M:%S").to_string());
        self.state.schedule.load(snapshot.tracked);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Schedule navigation, delegated to ScheduleState
    // -----------------------------------------------------------------------

    pub fn schedule_down(&mut self) {
        self.state.schedule.navigate_down();
    }

    pub fn schedule_up(&mut self) {
        self.state.schedule.navigate_up();
    }

    pub fn schedule_jump_to_next(&mut self) {
        self.state.schedule.jump_to_next_upcoming();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_api::{MatchRecord, TeamQuery, TeamReport};

    fn snapshot() -> TeamSnapshot {
        let tracked = vec![MatchRecord {
            home_team: "MoDo Hockey".into(),
            away_team: "IF Björklöven".into(),
            ..Default::default()
        }];
        TeamSnapshot {
            report: TeamReport::from_records(&tracked, &TeamQuery::new("modo")),
            tracked,
            stats: Default::default(),
        }
    }

    #[test]
    fn report_clears_previous_error() {
        let mut app = App::new(AppSettings::default());
        app.on_error("Network error".into());
        app.on_report_loaded(snapshot());

        assert!(app.state.last_error.is_none());
        assert!(app.state.team.updated_at.is_some());
        assert_eq!(app.state.schedule.games.len(), 1);
        assert_eq!(
            app.state.team.report.as_ref().map(|r| r.team_name.as_str()),
            Some("MoDo Hockey")
        );
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = App::new(AppSettings::default());
        app.update_tab(MenuItem::Schedule);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Schedule);
    }
}
