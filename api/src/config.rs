//! Source endpoints and tracked-team configuration.
//!
//! Everything is read once from the environment into plain values and then
//! passed around explicitly.

use std::time::Duration;

use crate::TeamQuery;
use crate::parser::{ParseOptions, TimeMarkerPolicy};

pub const TEAM_TAG_ENV: &str = "RINKSIDE_TEAM_TAG";
pub const SCHEDULE_URL_ENV: &str = "RINKSIDE_SCHEDULE_URL";
pub const SPORTSDB_KEY_ENV: &str = "RINKSIDE_SPORTSDB_KEY";
pub const SPORTSDB_URL_ENV: &str = "RINKSIDE_SPORTSDB_URL";
pub const TIME_MARKERS_ENV: &str = "RINKSIDE_TIME_MARKERS";
pub const REFRESH_SECS_ENV: &str = "RINKSIDE_REFRESH_SECS";

pub const DEFAULT_TEAM_TAG: &str = "modo";
/// 2025-2026 SHL schedule and results.
pub const DEFAULT_SCHEDULE_URL: &str =
    "https://stats.swehockey.se/ScheduleAndResults/Schedule/18266";
pub const DEFAULT_SPORTSDB_URL: &str = "https://www.thesportsdb.com/api/v1/json";
pub const DEFAULT_SPORTSDB_KEY: &str = "123"; // public test key
pub const DEFAULT_REFRESH_SECS: u64 = 300;
pub const MIN_REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub schedule_url: String,
    pub sportsdb_base: String,
    pub sportsdb_key: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// `(substring, query)`: names containing `substring` are looked up as `query`.
    pub badge_aliases: Vec<(String, String)>,
    pub parse: ParseOptions,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            schedule_url: DEFAULT_SCHEDULE_URL.to_owned(),
            sportsdb_base: DEFAULT_SPORTSDB_URL.to_owned(),
            sportsdb_key: DEFAULT_SPORTSDB_KEY.to_owned(),
            timeout: Duration::from_secs(10),
            // The schedule site rejects non-browser agents.
            user_agent: "Mozilla/5.0".to_owned(),
            badge_aliases: vec![("modo".to_owned(), "Modo".to_owned())],
            parse: ParseOptions::default(),
        }
    }
}

impl SourceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = get(SCHEDULE_URL_ENV) {
            config.schedule_url = url;
        }
        if let Some(base) = get(SPORTSDB_URL_ENV) {
            config.sportsdb_base = base.trim_end_matches('/').to_owned();
        }
        if let Some(key) = get(SPORTSDB_KEY_ENV) {
            config.sportsdb_key = key;
        }
        match get(TIME_MARKERS_ENV).as_deref() {
            Some("paired") => config.parse.time_markers = TimeMarkerPolicy::Paired,
            Some("lenient") | None => {}
            Some(other) => log::warn!("ignoring unknown {TIME_MARKERS_ENV} value {other:?}"),
        }
        config
    }
}

pub fn team_query_from_env() -> TeamQuery {
    team_query_from_lookup(|key| std::env::var(key).ok())
}

pub fn team_query_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TeamQuery {
    let tag = lookup(TEAM_TAG_ENV).filter(|t| !t.trim().is_empty());
    TeamQuery::new(tag.as_deref().unwrap_or(DEFAULT_TEAM_TAG))
}

pub fn refresh_interval_from_env() -> Duration {
    refresh_interval_from_lookup(|key| std::env::var(key).ok())
}

/// Refresh period in seconds, clamped to at least [`MIN_REFRESH_SECS`].
pub fn refresh_interval_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Duration {
    let secs = lookup(REFRESH_SECS_ENV)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_REFRESH_SECS);
    Duration::from_secs(secs.max(MIN_REFRESH_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SourceConfig::from_lookup(env(&[]));
        assert_eq!(config.schedule_url, DEFAULT_SCHEDULE_URL);
        assert_eq!(config.sportsdb_key, "123");
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.parse, ParseOptions::default());
        assert_eq!(team_query_from_lookup(env(&[])).tag(), "modo");
        assert_eq!(refresh_interval_from_lookup(env(&[])), Duration::from_secs(300));
    }

    #[test]
    fn overrides_are_applied() {
        let lookup = env(&[
            (SCHEDULE_URL_ENV, "http://localhost/schedule"),
            (SPORTSDB_URL_ENV, "http://localhost/sdb/"),
            (SPORTSDB_KEY_ENV, " 3 "),
            (TIME_MARKERS_ENV, "paired"),
            (TEAM_TAG_ENV, "Leksand"),
        ]);
        let config = SourceConfig::from_lookup(&lookup);
        assert_eq!(config.schedule_url, "http://localhost/schedule");
        assert_eq!(config.sportsdb_base, "http://localhost/sdb");
        assert_eq!(config.sportsdb_key, "3");
        assert_eq!(config.parse.time_markers, TimeMarkerPolicy::Paired);
        assert_eq!(team_query_from_lookup(&lookup).tag(), "leksand");
    }

    #[test]
    fn refresh_interval_is_clamped() {
        assert_eq!(
            refresh_interval_from_lookup(env(&[(REFRESH_SECS_ENV, "5")])),
            Duration::from_secs(MIN_REFRESH_SECS)
        );
        assert_eq!(
            refresh_interval_from_lookup(env(&[(REFRESH_SECS_ENV, "soon")])),
            Duration::from_secs(DEFAULT_REFRESH_SECS)
        );
    }
}
