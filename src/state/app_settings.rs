use log::LevelFilter;
use rink_api::TeamQuery;
use rink_api::config::{self, SourceConfig};
use std::time::Duration;

pub const LOG_LEVEL_ENV: &str = "RINKSIDE_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub team: TeamQuery,
    pub source: SourceConfig,
    pub refresh_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            team: TeamQuery::new(config::DEFAULT_TEAM_TAG),
            source: SourceConfig::default(),
            refresh_interval: Duration::from_secs(config::DEFAULT_REFRESH_SECS),
        }
    }
}

impl AppSettings {
    /// Read settings from the environment. `team_override` (from `--team`)
    /// wins over `RINKSIDE_TEAM_TAG`.
    pub fn load(team_override: Option<&str>) -> Self {
        let team = team_override
            .filter(|t| !t.trim().is_empty())
            .map(TeamQuery::new)
            .unwrap_or_else(config::team_query_from_env);

        Self {
            full_screen: false,
            log_level: std::env::var(LOG_LEVEL_ENV)
                .ok()
                .and_then(|raw| parse_log_level(&raw)),
            team,
            source: SourceConfig::from_env(),
            refresh_interval: config::refresh_interval_from_env(),
        }
    }
}

fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parsing_is_case_insensitive() {
        assert_eq!(parse_log_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_log_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_log_level("loud"), None);
    }

    #[test]
    fn team_override_wins() {
        let settings = AppSettings::load(Some("Leksand"));
        assert_eq!(settings.team.tag(), "leksand");
    }
}
