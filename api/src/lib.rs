pub mod badge;
pub mod classify;
pub mod client;
pub mod config;
pub mod flatten;
pub mod grammar;
pub mod parser;
pub mod sportsdb;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub use parser::ParseStats;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of page layout and wire formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// One scheduled or completed fixture.
///
/// Scores live in a single `Option<Score>` so a record is either played
/// (both sides known) or upcoming (neither known). `Default` is the empty
/// placeholder returned when no fixture matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: String, // "YYYY-MM-DD", empty until the first date line
    pub time: String, // "HH:MM"
    pub home_team: String,
    pub away_team: String,
    pub score: Option<Score>,
    pub venue: String,
    pub spectators: Option<u32>,
}

impl MatchRecord {
    pub fn home_score(&self) -> Option<u32> {
        self.score.map(|s| s.home)
    }

    pub fn away_score(&self) -> Option<u32> {
        self.score.map(|s| s.away)
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn is_upcoming(&self) -> bool {
        self.score.is_none()
    }

    /// True for the placeholder record (no teams parsed).
    pub fn is_empty(&self) -> bool {
        self.home_team.is_empty() && self.away_team.is_empty()
    }

    /// Local kickoff time when both `date` and `time` parse.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }
}

// Flat field layout matching the JSON consumers already read.
impl Serialize for MatchRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MatchRecord", 8)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("time", &self.time)?;
        s.serialize_field("home_team", &self.home_team)?;
        s.serialize_field("away_team", &self.away_team)?;
        s.serialize_field("home_score", &self.home_score())?;
        s.serialize_field("away_score", &self.away_score())?;
        s.serialize_field("venue", &self.venue)?;
        s.serialize_field("spectators", &self.spectators)?;
        s.end()
    }
}

/// Tracked team's result in a played fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Outcome {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "loss")]
    Loss,
    #[serde(rename = "draw")]
    Draw,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
            Outcome::Unknown => "",
        }
    }
}

/// Case-insensitive substring tag identifying the tracked team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamQuery {
    tag: String,
}

impl TeamQuery {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.trim().to_lowercase(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.tag)
    }
}

/// A fixture plus the badge URLs resolved for both teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameCard {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub home_badge: Option<String>,
    pub away_badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_result: Option<Outcome>,
}

impl GameCard {
    pub fn new(record: MatchRecord) -> Self {
        Self {
            record,
            ..Default::default()
        }
    }
}

/// Last and next game of the tracked team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamReport {
    pub team_tag: String,
    pub team_name: String,
    pub last_game: GameCard,
    pub next_game: GameCard,
}

/// Everything one refresh produces: the report, every tracked fixture in
/// source order, and the parser diagnostics for the page.
#[derive(Debug, Clone, Default)]
pub struct TeamSnapshot {
    pub report: TeamReport,
    pub tracked: Vec<MatchRecord>,
    pub stats: ParseStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played() -> MatchRecord {
        MatchRecord {
            date: "2025-11-28".into(),
            time: "19:00".into(),
            home_team: "MoDo Hockey".into(),
            away_team: "Östersunds IK".into(),
            score: Some(Score { home: 3, away: 1 }),
            venue: "Hägglunds Arena".into(),
            spectators: Some(7298),
        }
    }

    #[test]
    fn score_accessors_are_paired() {
        let rec = played();
        assert_eq!(rec.home_score(), Some(3));
        assert_eq!(rec.away_score(), Some(1));
        assert!(rec.is_played());

        let upcoming = MatchRecord {
            score: None,
            ..played()
        };
        assert_eq!((upcoming.home_score(), upcoming.away_score()), (None, None));
        assert!(upcoming.is_upcoming());
    }

    #[test]
    fn kickoff_requires_date_and_time() {
        let rec = played();
        let kickoff = rec.kickoff().unwrap();
        assert_eq!(kickoff.to_string(), "2025-11-28 19:00:00");

        let no_date = MatchRecord {
            date: String::new(),
            ..played()
        };
        assert!(no_date.kickoff().is_none());
    }

    #[test]
    fn record_serializes_flat_scores() {
        let json = serde_json::to_value(played()).unwrap();
        assert_eq!(json["home_score"], 3);
        assert_eq!(json["away_score"], 1);
        assert_eq!(json["spectators"], 7298);

        let json = serde_json::to_value(MatchRecord::default()).unwrap();
        assert!(json["home_score"].is_null());
        assert!(json["away_score"].is_null());
        assert_eq!(json["venue"], "");
    }

    #[test]
    fn game_card_flattens_record_and_hides_missing_result() {
        let card = GameCard {
            record: played(),
            home_badge: Some("https://r2.thesportsdb.com/modo.png".into()),
            away_badge: None,
            team_result: Some(Outcome::Win),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["home_team"], "MoDo Hockey");
        assert_eq!(json["team_result"], "win");
        assert!(json["away_badge"].is_null());

        let json = serde_json::to_value(GameCard::new(played())).unwrap();
        assert!(json.get("team_result").is_none());
    }

    #[test]
    fn outcome_strings() {
        assert_eq!(Outcome::Unknown.as_str(), "");
        assert_eq!(serde_json::to_value(Outcome::Loss).unwrap(), "loss");
        assert_eq!(serde_json::to_value(Outcome::Unknown).unwrap(), "");
    }

    #[test]
    fn team_query_is_trimmed_and_case_insensitive() {
        let q = TeamQuery::new("  MoDo ");
        assert_eq!(q.tag(), "modo");
        assert!(q.matches("MODO HOCKEY"));
        assert!(!q.matches("Leksands IF"));
    }
}
