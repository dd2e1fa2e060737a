use crate::{GameCard, MatchRecord, Outcome, TeamQuery, TeamReport};

/// Whether either side of `record` contains the tracked tag.
pub fn is_tracked_match(record: &MatchRecord, query: &TeamQuery) -> bool {
    query.matches(&record.home_team) || query.matches(&record.away_team)
}

/// The tracked team's result. When the tag matches both sides the home side
/// is taken as the tracked one.
pub fn classify_outcome(record: &MatchRecord, query: &TeamQuery) -> Outcome {
    let Some(score) = record.score else {
        return Outcome::Unknown;
    };

    let (ours, theirs) = if query.matches(&record.home_team) {
        (score.home, score.away)
    } else if query.matches(&record.away_team) {
        (score.away, score.home)
    } else {
        return Outcome::Unknown;
    };

    match ours.cmp(&theirs) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Less => Outcome::Loss,
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

/// First team name (home checked before away) containing the tag, or the
/// tag itself when no record mentions it.
pub fn resolve_display_name(records: &[MatchRecord], query: &TeamQuery) -> String {
    records
        .iter()
        .flat_map(|r| [&r.home_team, &r.away_team])
        .find(|name| query.matches(name))
        .cloned()
        .unwrap_or_else(|| query.tag().to_owned())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub last_played: MatchRecord,
    pub next_upcoming: MatchRecord,
}

/// Last played and first upcoming record in source order. An empty
/// partition yields the placeholder record.
pub fn select_fixtures(records: &[MatchRecord]) -> Fixtures {
    let last_played = records
        .iter()
        .rev()
        .find(|r| r.is_played())
        .cloned()
        .unwrap_or_default();
    let next_upcoming = records
        .iter()
        .find(|r| r.is_upcoming())
        .cloned()
        .unwrap_or_default();
    Fixtures {
        last_played,
        next_upcoming,
    }
}

/// Records involving the tracked team, in source order.
pub fn tracked_matches(records: &[MatchRecord], query: &TeamQuery) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| is_tracked_match(r, query))
        .cloned()
        .collect()
}

impl TeamReport {
    /// Build the report from already-parsed records. Badges are left empty;
    /// the client fills them in.
    pub fn from_records(records: &[MatchRecord], query: &TeamQuery) -> Self {
        let tracked = tracked_matches(records, query);
        let Fixtures {
            last_played,
            next_upcoming,
        } = select_fixtures(&tracked);

        let team_result = classify_outcome(&last_played, query);
        TeamReport {
            team_tag: query.tag().to_owned(),
            team_name: resolve_display_name(&tracked, query),
            last_game: GameCard {
                record: last_played,
                team_result: Some(team_result),
                ..Default::default()
            },
            next_game: GameCard::new(next_upcoming),
        }
    }
}
