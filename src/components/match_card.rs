use chrono::{NaiveDateTime, TimeDelta};
use rink_api::{GameCard, Outcome};
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

use crate::draw::default_border;

/// One fixture rendered as a bordered card: teams, score or countdown,
/// venue, attendance and badge links.
pub struct MatchCard<'a> {
    pub title: &'a str,
    pub card: &'a GameCard,
    pub now: NaiveDateTime,
    pub empty_text: &'a str,
}

impl Widget for MatchCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let record = &self.card.record;
        let border = match self.card.team_result {
            Some(outcome) if !record.is_empty() => outcome_color(outcome),
            _ => Color::DarkGray,
        };
        let block = default_border(border).title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if record.is_empty() {
            Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let dim = Style::default().fg(Color::DarkGray);
        let team = Style::default().add_modifier(Modifier::BOLD);

        let centre = match record.score {
            Some(score) => Span::styled(
                format!("{} - {}", score.home, score.away),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("vs", dim),
        };

        let mut lines = vec![
            Line::from(Span::styled(format!("{}  {}", record.date, record.time), dim)),
            Line::from(""),
            Line::from(Span::styled(record.home_team.as_str(), team)),
            Line::from(centre),
            Line::from(Span::styled(record.away_team.as_str(), team)),
            Line::from(""),
        ];

        let mut venue = if record.venue.is_empty() {
            "venue not announced".to_string()
        } else {
            record.venue.clone()
        };
        if let Some(n) = record.spectators {
            venue.push_str(&format!("  ·  {} spectators", format_spectators(n)));
        }
        lines.push(Line::from(Span::styled(venue, Style::default().fg(Color::Gray))));
        lines.push(self.status_line());

        let badges: Vec<&str> = [&self.card.home_badge, &self.card.away_badge]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !badges.is_empty() && inner.height as usize > lines.len() + 1 {
            lines.push(Line::from(""));
            for url in badges {
                lines.push(Line::from(Span::styled(url, dim)));
            }
        }

        Paragraph::new(lines).alignment(Alignment::Center).render(inner, buf);
    }
}

impl MatchCard<'_> {
    fn status_line(&self) -> Line<'static> {
        let record = &self.card.record;
        if record.is_played() {
            let outcome = self.card.team_result.unwrap_or_default();
            let label = match outcome {
                Outcome::Unknown => "FINAL".to_string(),
                other => other.as_str().to_uppercase(),
            };
            return Line::from(Span::styled(
                label,
                Style::default()
                    .fg(outcome_color(outcome))
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let text = match record.kickoff() {
            Some(kickoff) => format_countdown(kickoff, self.now),
            None => "kickoff time unknown".to_string(),
        };
        Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
    }
}

pub fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Win => Color::Green,
        Outcome::Loss => Color::Red,
        Outcome::Draw => Color::Yellow,
        Outcome::Unknown => Color::White,
    }
}

/// "starts in 2d 4h", "starts in 3h 05m", "starts in 12m".
pub fn format_countdown(kickoff: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = kickoff - now;
    if delta <= TimeDelta::zero() {
        return "awaiting result".to_string();
    }

    let minutes = delta.num_minutes();
    let (days, hours, mins) = (minutes / 1440, minutes % 1440 / 60, minutes % 60);
    match (days, hours) {
        (0, 0) => format!("starts in {mins}m"),
        (0, _) => format!("starts in {hours}h {mins:02}m"),
        _ => format!("starts in {days}d {hours}h"),
    }
}

/// Thousands separated by a space, as the source prints them.
pub fn format_spectators(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn countdown_units() {
        let kickoff = at(28, 19, 0);
        assert_eq!(format_countdown(kickoff, at(28, 18, 48)), "starts in 12m");
        assert_eq!(format_countdown(kickoff, at(28, 15, 55)), "starts in 3h 05m");
        assert_eq!(format_countdown(kickoff, at(26, 15, 0)), "starts in 2d 4h");
        assert_eq!(format_countdown(kickoff, at(28, 19, 30)), "awaiting result");
    }

    #[test]
    fn spectators_grouping() {
        assert_eq!(format_spectators(7298), "7 298");
        assert_eq!(format_spectators(512), "512");
        assert_eq!(format_spectators(1_234_567), "1 234 567");
    }

    #[test]
    fn renders_upcoming_card() {
        use rink_api::MatchRecord;

        let card = GameCard::new(MatchRecord {
            date: "2025-11-28".into(),
            time: "19:00".into(),
            home_team: "MoDo Hockey".into(),
            away_team: "IF Björklöven".into(),
            venue: "Hägglunds Arena".into(),
            ..Default::default()
        });
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        MatchCard {
            title: "Next game",
            card: &card,
            now: at(28, 18, 0),
            empty_text: "No upcoming game",
        }
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Next game"));
        assert!(text.contains("MoDo Hockey"));
        assert!(text.contains("starts in 1h 00m"));
    }
}
