//! Line-oriented schedule parser.
//!
//! Input is the flattened schedule page: an ordered sequence of trimmed,
//! non-empty text lines. Date lines set the running date, time lines open a
//! match, and the lines after a time marker are the match body in one of two
//! layouts:
//!
//! ```text
//! inline                                  multi-line
//! 19:00                                   19:00
//! 19:00                                   MoDo Hockey
//! MoDo Hockey - Östersunds IK 3 - 1 (…)   -
//!   7298 Hägglunds Arena                  Östersunds IK
//!                                         3 - 1
//!                                         (0-0, 1-1, 2-0)
//!                                         7298
//!                                         Hägglunds Arena
//! ```
//!
//! The layout is detected per match, so one page can mix both. Anything that
//! does not decompose is counted and skipped; parsing never aborts.

use crate::MatchRecord;
use crate::grammar::{self, Token};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeMarkerPolicy {
    /// A single or a duplicated time line opens a match.
    #[default]
    Lenient,
    /// Only a duplicated time line opens a match. Single time lines are
    /// skipped like any other unrecognised line.
    Paired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    Inline,
    MultiLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub time_markers: TimeMarkerPolicy,
    /// Body layouts in the order they are attempted.
    pub shapes: Vec<BodyShape>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            time_markers: TimeMarkerPolicy::Lenient,
            shapes: vec![BodyShape::Inline, BodyShape::MultiLine],
        }
    }
}

/// Per-invocation diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    /// Time markers whose body could not be decomposed.
    pub dropped_bodies: usize,
    /// Lines that were neither markers nor consumed by a match.
    pub skipped_lines: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedSchedule {
    pub records: Vec<MatchRecord>,
    pub stats: ParseStats,
}

/// Parse with the default options.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Vec<MatchRecord> {
    ScheduleParser::default().parse(lines).records
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleParser {
    options: ParseOptions,
}

impl ScheduleParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> ParsedSchedule {
        let mut cursor = Cursor::new(lines);
        let mut out = ParsedSchedule::default();
        let mut current_date = String::new();

        while let Some(line) = cursor.peek(0) {
            if let Some(date) = grammar::date_marker(line) {
                current_date = date.to_owned();
                cursor.advance(1);
                continue;
            }

            if grammar::is_time_marker(line) {
                let paired = cursor.peek(1) == Some(line);
                if paired || self.options.time_markers == TimeMarkerPolicy::Lenient {
                    cursor.advance(if paired { 2 } else { 1 });
                    match self.read_body(&mut cursor) {
                        Some(mut record) => {
                            record.date = current_date.clone();
                            record.time = line.to_owned();
                            out.records.push(record);
                        }
                        None => {
                            out.stats.dropped_bodies += 1;
                            let candidate = cursor.peek(0);
                            log::debug!(
                                "dropping match body after {current_date} {line} at line {}: {candidate:?}",
                                cursor.pos
                            );
                            // The next date or time marker starts fresh context.
                            if candidate.is_some_and(|l| !grammar::is_marker(l)) {
                                cursor.advance(1);
                                out.stats.skipped_lines += 1;
                            }
                        }
                    }
                    continue;
                }
            }

            out.stats.skipped_lines += 1;
            cursor.advance(1);
        }

        out.stats.records = out.records.len();
        out
    }

    fn read_body<S: AsRef<str>>(&self, cursor: &mut Cursor<'_, S>) -> Option<MatchRecord> {
        for shape in &self.options.shapes {
            let mut probe = *cursor;
            let record = match shape {
                BodyShape::Inline => inline_body(&mut probe),
                BodyShape::MultiLine => multi_line_body(&mut probe),
            };
            if let Some(record) = record {
                *cursor = probe;
                return Some(record);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

struct Cursor<'a, S> {
    lines: &'a [S],
    pos: usize,
}

// Manual impls: the cursor is copyable whatever `S` is.
impl<S> Clone for Cursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Cursor<'_, S> {}

impl<'a, S: AsRef<str>> Cursor<'a, S> {
    fn new(lines: &'a [S]) -> Self {
        Self { lines, pos: 0 }
    }

    fn peek(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.pos + offset).map(|l| l.as_ref().trim())
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.lines.len());
    }
}

// ---------------------------------------------------------------------------
// Body shapes
// ---------------------------------------------------------------------------

/// `<home> - <away> [<score>|-] [(<periods>)] [<attendance>] [<venue>]`
///
/// Details missing from the line continue on the following lines.
fn inline_body<S: AsRef<str>>(cursor: &mut Cursor<'_, S>) -> Option<MatchRecord> {
    let line = cursor.peek(0)?;
    if !is_team_line(line) {
        return None;
    }

    let (home, rest) = line.split_once(" - ")?;
    let home = home.trim();
    if home.is_empty() {
        return None;
    }

    let mut record = MatchRecord {
        home_team: home.to_owned(),
        ..Default::default()
    };

    let (away, details, result_seen) = if let Some((start, end, score)) = grammar::find_score(rest)
    {
        record.score = Some(score);
        (&rest[..start], &rest[end..], true)
    } else if let Some(idx) = grammar::find_placeholder(rest) {
        (&rest[..idx], &rest[idx + 1..], true)
    } else {
        (rest, "", false)
    };

    let away = away.trim();
    if away.is_empty() {
        return None;
    }
    record.away_team = away.to_owned();
    cursor.advance(1);

    let details = details.trim();
    if details.is_empty() {
        read_tail(cursor, &mut record, !result_seen);
    } else {
        apply_details(&mut record, details);
    }
    Some(record)
}

/// `<home>` / `-` / `<away>` on three lines, then the tail.
fn multi_line_body<S: AsRef<str>>(cursor: &mut Cursor<'_, S>) -> Option<MatchRecord> {
    let home = cursor.peek(0)?;
    let separator = cursor.peek(1)?;
    let away = cursor.peek(2)?;

    let separated = grammar::classify_line(separator) == Token::NoScore;
    if !separated || !is_team_line(home) || !is_team_line(away) {
        return None;
    }

    let mut record = MatchRecord {
        home_team: home.to_owned(),
        away_team: away.to_owned(),
        ..Default::default()
    };
    cursor.advance(3);
    read_tail(cursor, &mut record, true);
    Some(record)
}

/// Result, optional period and attendance lines, then the venue.
/// Date and time markers are never consumed here.
fn read_tail<S: AsRef<str>>(cursor: &mut Cursor<'_, S>, record: &mut MatchRecord, expect_result: bool) {
    if expect_result {
        match cursor.peek(0).map(grammar::classify_line) {
            None | Some(Token::Date(_) | Token::Time(_)) => {}
            Some(Token::Score(score)) => {
                record.score = Some(score);
                cursor.advance(1);
            }
            // "-", "Uppskjuten", "3 - 2 OT": the result cell is taken but
            // the match stays unplayed.
            Some(_) => cursor.advance(1),
        }
    }

    if let Some(Token::PeriodScore(_)) = cursor.peek(0).map(grammar::classify_line) {
        cursor.advance(1);
    }

    if let Some(Token::Integer(n)) = cursor.peek(0).map(grammar::classify_line) {
        record.spectators = Some(n);
        cursor.advance(1);
    }

    if let Some(venue) = cursor.peek(0).filter(|l| !grammar::is_marker(l)) {
        record.venue = venue.to_owned();
        cursor.advance(1);
    }
}

/// Markers and result cells never name a team.
fn is_team_line(line: &str) -> bool {
    !matches!(
        grammar::classify_line(line),
        Token::Date(_) | Token::Time(_) | Token::Score(_) | Token::NoScore
    )
}

/// Same-line trailing details: `[(<periods>)] [<attendance>] [<venue>]`.
fn apply_details(record: &mut MatchRecord, details: &str) {
    let mut rest = details;
    if let Some((_, after)) = grammar::split_period(rest) {
        rest = after;
    }
    if let Some((n, after)) = grammar::split_integer(rest) {
        record.spectators = Some(n);
        rest = after;
    }
    record.venue = rest.trim().to_owned();
}
