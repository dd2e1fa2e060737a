use chrono::Local;
use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_card::{MatchCard, format_spectators, outcome_color};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use rink_api::MatchRecord;
use rink_api::classify::classify_outcome;

static TABS: &[&str; 2] = &["Team", "Schedule"];

const HELP_TEXT: &str = "\
q        quit
1 / 2    Team / Schedule
?        this help (Esc to go back)
j / k    move through the schedule
n        jump to the next upcoming game
r        reload the schedule page now
c        forget cached badges and reload
f        toggle full screen
\"        toggle the log pane";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::Schedule => draw_schedule(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Team => 0,
        MenuItem::Schedule => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let team = &app.state.team;
    let title = match team.report.as_ref() {
        Some(report) => format!(" {} ", report.team_name),
        None => format!(" {} ", app.settings.team.tag()),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(report) = team.report.as_ref() else {
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("Schedule load failed:\n{err}"),
            None => "Loading schedule...".to_string(),
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [cards, status] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    // Side by side when there is room, stacked otherwise.
    let [last_area, next_area] = if cards.width >= 70 {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(cards)
    } else {
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(cards)
    };

    let now = Local::now().naive_local();
    f.render_widget(
        MatchCard {
            title: "Last game",
            card: &report.last_game,
            now,
            empty_text: "No played games yet",
        },
        last_area,
    );
    f.render_widget(
        MatchCard {
            title: "Next game",
            card: &report.next_game,
            now,
            empty_text: "No upcoming games",
        },
        next_area,
    );

    f.render_widget(Paragraph::new(status_line(app)), status);
}

fn status_line(app: &App) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    if let Some(err) = app.state.last_error.as_deref() {
        return Line::from(Span::styled(
            format!("refresh failed: {err}"),
            Style::default().fg(Color::Red),
        ));
    }

    let team = &app.state.team;
    let updated = team.updated_at.as_deref().unwrap_or("--:--:--");
    let mut text = format!(
        "updated {updated}  ·  {} tracked of {} parsed",
        app.state.schedule.games.len(),
        team.stats.records
    );
    if team.stats.dropped_bodies > 0 {
        text.push_str(&format!("  ·  {} unreadable", team.stats.dropped_bodies));
    }
    Line::from(Span::styled(text, dim))
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Schedule ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let schedule = &app.state.schedule;
    if schedule.games.is_empty() {
        f.render_widget(
            Paragraph::new("No games for this team on the schedule page.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [rows_area, detail_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);

    let visible = rows_area.height as usize;
    let start = schedule.window_start(visible);
    let lines: Vec<Line> = schedule
        .games
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(idx, game)| schedule_row(game, idx == schedule.selected, app))
        .collect();
    f.render_widget(Paragraph::new(lines), rows_area);

    if let Some(game) = schedule.selected_game() {
        let mut detail = if game.venue.is_empty() {
            "venue not announced".to_string()
        } else {
            game.venue.clone()
        };
        if let Some(n) = game.spectators {
            detail.push_str(&format!("  ·  {} spectators", format_spectators(n)));
        }
        f.render_widget(
            Paragraph::new(detail).style(Style::default().fg(Color::Gray)),
            detail_area,
        );
    }
}

fn schedule_row<'a>(game: &'a MatchRecord, selected: bool, app: &App) -> Line<'a> {
    let marker = if selected { ">" } else { " " };
    let base = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let result = match game.score {
        Some(score) => {
            let outcome = classify_outcome(game, &app.settings.team);
            Span::styled(
                format!("{:>2} - {:<2}", score.home, score.away),
                Style::default().fg(outcome_color(outcome)),
            )
        }
        None => Span::styled("  -    ", Style::default().fg(Color::DarkGray)),
    };

    Line::from(vec![
        Span::styled(format!("{marker} {} {} ", game.date, game.time), base),
        Span::styled(format!("{:>22} ", truncate_name(&game.home_team, 22)), base),
        result,
        Span::styled(format!(" {}", truncate_name(&game.away_team, 22)), base),
    ])
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray))
        .style_trace(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
