/// TheSportsDB raw wire types: serde shapes for `searchteams.php` responses.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SearchTeamsResponse {
    pub teams: Option<Vec<SportsDbTeam>>, // null when nothing matched
}

impl SearchTeamsResponse {
    /// Badge of the first team in the response.
    pub fn first_badge(&self) -> Option<&str> {
        self.teams.as_ref()?.first()?.badge_url()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SportsDbTeam {
    #[serde(rename = "strTeam")]
    pub name: Option<String>,
    #[serde(rename = "strBadge")]
    pub badge: Option<String>,
    /// Older responses carry the badge under this key instead.
    #[serde(rename = "strTeamBadge")]
    pub team_badge: Option<String>,
}

impl SportsDbTeam {
    pub fn badge_url(&self) -> Option<&str> {
        [&self.badge, &self.team_badge]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_str_badge_then_team_badge() {
        let raw = r#"{"teams":[{"strTeam":"Modo","strBadge":"","strTeamBadge":"https://www.thesportsdb.com/t.png"}]}"#;
        let resp: SearchTeamsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_badge(), Some("https://www.thesportsdb.com/t.png"));

        let raw = r#"{"teams":[{"strTeam":"Modo","strBadge":"b.png","strTeamBadge":"t.png"}]}"#;
        let resp: SearchTeamsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_badge(), Some("b.png"));
    }

    #[test]
    fn null_teams_has_no_badge() {
        let resp: SearchTeamsResponse = serde_json::from_str(r#"{"teams":null}"#).unwrap();
        assert_eq!(resp.first_badge(), None);
        assert_eq!(SearchTeamsResponse::default().first_badge(), None);
    }
}
