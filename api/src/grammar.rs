//! Token grammar for flattened schedule text.
//!
//! The schedule page reaches us as trimmed text lines with no field
//! separators. Each recognizer below answers for exactly one token kind so
//! the parser can compose them per body shape:
//!
//! | Token         | Shape                                               |
//! |---------------|-----------------------------------------------------|
//! | `Date`        | line starting with `DDDD-DD-DD`                     |
//! | `Time`        | whole line `DD:DD`                                  |
//! | `Score`       | `<digits> - <digits>`, spacing around `-` optional  |
//! | `NoScore`     | the literal `-` (fixture not played yet)            |
//! | `Integer`     | ASCII digits only (attendance)                      |
//! | `PeriodScore` | anything starting with `(`                          |
//! | `Text`        | everything else (team names, venue remainder)       |

use crate::Score;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Date(&'a str),
    Time(&'a str),
    Score(Score),
    NoScore,
    Integer(u32),
    PeriodScore(&'a str),
    Text(&'a str),
}

/// Result cell of a fixture: either a final score or the `-` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultToken {
    Played(Score),
    Unplayed,
}

/// Classify a whole line as a single token. Recognizers run from the most
/// to the least specific, so `"2025-11-28"` is a date and never text.
pub fn classify_line(line: &str) -> Token<'_> {
    if let Some(date) = date_marker(line) {
        return Token::Date(date);
    }
    if is_time_marker(line) {
        return Token::Time(line);
    }
    match result_token(line) {
        Some(ResultToken::Played(score)) => return Token::Score(score),
        Some(ResultToken::Unplayed) => return Token::NoScore,
        None => {}
    }
    if let Some(n) = integer_token(line) {
        return Token::Integer(n);
    }
    if is_period_score(line) {
        return Token::PeriodScore(line);
    }
    Token::Text(line)
}

/// `YYYY-MM-DD` prefix of a date line. Anything after the first ten
/// characters (the page often repeats the date) is ignored.
pub fn date_marker(line: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());
    re.find(line).map(|m| m.as_str())
}

pub fn is_time_marker(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap());
    re.is_match(line)
}

/// Date and time lines open new context and must never be swallowed as a
/// trailing field of the previous match.
pub fn is_marker(line: &str) -> bool {
    date_marker(line).is_some() || is_time_marker(line)
}

pub fn score_token(text: &str) -> Option<Score> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^([0-9]+)\s*-\s*([0-9]+)$").unwrap());

    let caps = re.captures(text.trim())?;
    Some(Score {
        home: caps.get(1)?.as_str().parse().ok()?,
        away: caps.get(2)?.as_str().parse().ok()?,
    })
}

pub fn is_placeholder(text: &str) -> bool {
    text.trim() == "-"
}

pub fn result_token(text: &str) -> Option<ResultToken> {
    if is_placeholder(text) {
        return Some(ResultToken::Unplayed);
    }
    score_token(text).map(ResultToken::Played)
}

/// Attendance figures: ASCII digits only, no separators, must fit a `u32`.
pub fn integer_token(text: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap());

    if !re.is_match(text) {
        return None;
    }
    text.parse().ok()
}

pub fn is_period_score(text: &str) -> bool {
    text.starts_with('(')
}

/// Locate the first score token embedded in a longer line.
///
/// Returns the byte span `(start, end)` of the token together with the
/// score. Both digit runs must be bounded by whitespace or the line ends,
/// which keeps period breakdowns like `(0-0, 1-1, 2-0)` from matching.
pub fn find_score(text: &str) -> Option<(usize, usize, Score)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?:^|\s)([0-9]+)\s*-\s*([0-9]+)(?:\s|$)").unwrap()
    });

    re.captures_iter(text).find_map(|caps| {
        let (home, away) = (caps.get(1)?, caps.get(2)?);
        let score = Score {
            home: home.as_str().parse().ok()?,
            away: away.as_str().parse().ok()?,
        };
        Some((home.start(), away.end(), score))
    })
}

/// Byte offset of a standalone `-` (whitespace before it, whitespace or end
/// of line after it) inside a longer line.
pub fn find_placeholder(text: &str) -> Option<usize> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s(-)(?:\s|$)").unwrap());

    re.captures(text)?.get(1).map(|m| m.start())
}

/// Split a leading `( … )` period breakdown off `text`.
pub fn split_period(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if !is_period_score(text) {
        return None;
    }
    let close = text.find(')')?;
    Some((&text[..=close], &text[close + 1..]))
}

/// Split a leading all-digit word (attendance) off `text`.
pub fn split_integer(text: &str) -> Option<(u32, &str)> {
    let text = text.trim_start();
    let word = text.split_whitespace().next()?;
    let n = integer_token(word)?;
    Some((n, &text[word.len()..]))
}
