use crate::badge::{BadgeCache, badge_query, normalize_badge_url};
use crate::classify::tracked_matches;
use crate::config::SourceConfig;
use crate::flatten::html_to_lines;
use crate::parser::{ParsedSchedule, ScheduleParser};
use crate::sportsdb::SearchTeamsResponse;
use crate::{GameCard, TeamQuery, TeamReport, TeamSnapshot};
use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

/// Schedule page + TheSportsDB client.
#[derive(Debug, Clone)]
pub struct RinkApi {
    client: Client,
    config: SourceConfig,
}

impl Default for RinkApi {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::NotFound(_) | ApiError::Other(_) => None,
        }
    }
}

impl RinkApi {
    pub fn new(config: SourceConfig) -> Self {
        let client = match Client::builder().user_agent(config.user_agent.clone()).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(
                    "http client with user agent {:?} unavailable, falling back to defaults: {e}",
                    config.user_agent
                );
                Client::default()
            }
        };
        Self { client, config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Download the schedule page and flatten it to text lines.
    pub async fn fetch_schedule_lines(&self) -> ApiResult<Vec<String>> {
        let html = self.get_text(&self.config.schedule_url).await?;
        let lines = html_to_lines(&html);
        debug!("schedule page flattened to {} lines", lines.len());
        Ok(lines)
    }

    /// Every fixture on the schedule page, in page order.
    pub async fn fetch_matches(&self) -> ApiResult<ParsedSchedule> {
        let lines = self.fetch_schedule_lines().await?;
        let parser = ScheduleParser::new(self.config.parse.clone());
        let parsed = parser.parse(&lines);
        debug!(
            "parsed {} records ({} dropped bodies, {} skipped lines) with {:?}",
            parsed.stats.records,
            parsed.stats.dropped_bodies,
            parsed.stats.skipped_lines,
            parser.options()
        );
        Ok(parsed)
    }

    /// Badge URL for `team`, memoized in `cache`.
    ///
    /// Lookup failures are logged and yield `None` without being cached so a
    /// later refresh can retry.
    pub async fn fetch_badge(&self, team: &str, cache: &mut BadgeCache) -> Option<String> {
        let team = team.trim();
        if team.is_empty() {
            return None;
        }
        if let Some(hit) = cache.get(team) {
            return hit;
        }

        match self.lookup_badge(team).await {
            Ok(url) => {
                cache.insert(team, url.clone());
                url
            }
            Err(e) => {
                warn!("badge lookup for {team} failed: {e}");
                None
            }
        }
    }

    /// Fill in badge URLs for both games of a report.
    pub async fn attach_badges(&self, report: &mut TeamReport, cache: &mut BadgeCache) {
        for card in [&mut report.last_game, &mut report.next_game] {
            self.attach_card_badges(card, cache).await;
        }
    }

    /// Fetch, parse and classify in one go.
    pub async fn fetch_team_snapshot(
        &self,
        query: &TeamQuery,
        cache: &mut BadgeCache,
    ) -> ApiResult<TeamSnapshot> {
        let ParsedSchedule { records, stats } = self.fetch_matches().await?;
        let mut report = TeamReport::from_records(&records, query);
        self.attach_badges(&mut report, cache).await;
        Ok(TeamSnapshot {
            report,
            tracked: tracked_matches(&records, query),
            stats,
        })
    }

    pub async fn fetch_team_report(
        &self,
        query: &TeamQuery,
        cache: &mut BadgeCache,
    ) -> ApiResult<TeamReport> {
        Ok(self.fetch_team_snapshot(query, cache).await?.report)
    }

    async fn attach_card_badges(&self, card: &mut GameCard, cache: &mut BadgeCache) {
        card.home_badge = self.fetch_badge(&card.record.home_team, cache).await;
        card.away_badge = self.fetch_badge(&card.record.away_team, cache).await;
    }

    async fn lookup_badge(&self, team: &str) -> ApiResult<Option<String>> {
        let query = badge_query(team, &self.config.badge_aliases);
        let url = self.search_teams_url(query)?;
        let raw: SearchTeamsResponse = self.get_json(url.as_str()).await?;
        Ok(raw.first_badge().and_then(normalize_badge_url))
    }

    fn search_teams_url(&self, query: &str) -> ApiResult<Url> {
        let base = format!(
            "{}/{}/searchteams.php",
            self.config.sportsdb_base.trim_end_matches('/'),
            self.config.sportsdb_key
        );
        Url::parse_with_params(&base, &[("t", query)])
            .map_err(|e| ApiError::Other(format!("invalid TheSportsDB url {base}: {e}")))
    }

    async fn get_text(&self, url: &str) -> ApiResult<String> {
        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .text()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(ApiError::NotFound(format!("schedule page {url}")))
            }
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    async fn get_json<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let api = RinkApi::new(SourceConfig {
            sportsdb_base: "https://www.thesportsdb.com/api/v1/json/".into(),
            ..Default::default()
        });
        let url = api.search_teams_url("Luleå HF").unwrap();
        assert_eq!(url.path(), "/api/v1/json/123/searchteams.php");
        assert_eq!(
            url.query_pairs().next().map(|(k, v)| (k.into_owned(), v.into_owned())),
            Some(("t".to_string(), "Luleå HF".to_string()))
        );
    }

    #[test]
    fn unusable_user_agent_still_builds_a_client() {
        let api = RinkApi::new(SourceConfig {
            user_agent: "Mozilla/5.0\nbroken".into(),
            ..Default::default()
        });
        assert_eq!(api.config().user_agent, "Mozilla/5.0\nbroken");
        assert!(api.search_teams_url("Modo").is_ok());
    }

    #[test]
    fn error_display_names_the_failure() {
        let err = ApiError::NotFound("schedule page http://x".into());
        assert_eq!(err.to_string(), "Not found: schedule page http://x");
        assert!(std::error::Error::source(&err).is_none());
    }
}
