use std::ops::Range;

use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::probability_bar::{ProbabilityBarWidget, hex_color};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use cfb_api::client::{FetchError, FetchState};
use cfb_api::present::{GameCard, LineScoreRow, TeamDisplay};

static TABS: &[&str; 1] = &["Scoreboard"];

/// Border plus five content rows.
pub const CARD_HEIGHT: u16 = 7;
/// Rank, abbreviation and record ahead of the period columns.
const TEAM_COLUMN: usize = 17;

const HELP_TEXT: &str = "\
q / Ctrl-C   quit
1            scoreboard
?            this help (Esc to go back)
j / k        next / previous game
g / G        first / last game
s            sort by watchability or feed order
r            refetch now
f            toggle full screen
\"            toggle log pane";

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
            draw_tabs(f, layout.tab_bar);
        }

        match app.state.active_tab {
            MenuItem::Scoreboard => draw_scoreboard(f, layout.main, app, loading),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
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

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2]) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(0)
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

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let scoreboard = &app.state.scoreboard;
    match &scoreboard.fetch {
        FetchState::Loading => draw_loading_panel(f, area, loading),
        FetchState::Failure(error) => draw_error_panel(f, area, error),
        FetchState::Success(_) => {
            let block = default_border(Color::White).title(" Scoreboard ");
            let inner = block.inner(area);
            f.render_widget(block, area);

            let [header, list] =
                Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

            let cards = scoreboard.cards();
            let order = if scoreboard.ranked {
                "most watchable first"
            } else {
                "feed order"
            };
            let fetched = scoreboard.fetched_at.as_deref().unwrap_or("-");
            f.render_widget(
                Paragraph::new(format!(
                    "{} games | {order} | updated {fetched} | s=sort r=refresh",
                    cards.len()
                ))
                .style(Style::default().fg(Color::DarkGray)),
                header,
            );

            if cards.is_empty() {
                f.render_widget(
                    Paragraph::new("No games on the board for these dates")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center),
                    list,
                );
                return;
            }

            let per_page = usize::from(list.height / CARD_HEIGHT);
            let window = visible_range(scoreboard.selected, cards.len(), per_page);
            for (row, idx) in window.enumerate() {
                let y = list.y + row as u16 * CARD_HEIGHT;
                let card_area = Rect::new(list.x, y, list.width, CARD_HEIGHT);
                draw_game_card(f, card_area, &cards[idx], idx == scoreboard.selected);
            }
        }
    }
}

fn draw_loading_panel(f: &mut Frame, area: Rect, loading: LoadingState) {
    let block = default_border(Color::DarkGray).title(" Scoreboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_, message, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new(format!("{} Loading scoreboard...", loading.spinner_char))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        message,
    );
}

fn draw_error_panel(f: &mut Frame, area: Rect, error: &FetchError) {
    let block = default_border(Color::Red).title(" Scoreboard unavailable ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            error.kind(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(detail) = error.detail() {
        lines.push(Line::from(detail));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press r to try again",
        Style::default().fg(Color::DarkGray),
    )));

    let [_, message] =
        Layout::vertical([Constraint::Percentage(30), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), message);
}

fn draw_game_card(f: &mut Frame, area: Rect, card: &GameCard, selected: bool) {
    let border = if selected { Color::Yellow } else { Color::DarkGray };
    let block = default_border(border)
        .title(format!(" {} ", card.status_detail))
        .title(
            Line::from(Span::styled(
                format!(" {} ", card.watchability),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, first, second, bar_row, info] =
        Layout::vertical([Constraint::Length(1); 5]).areas(inner);

    f.render_widget(
        Paragraph::new(line_score_header()).style(Style::default().fg(Color::DarkGray)),
        header,
    );
    f.render_widget(Paragraph::new(team_line(&card.first, &card.first_line)), first);
    f.render_widget(Paragraph::new(team_line(&card.second, &card.second_line)), second);

    let [left, track, right] = Layout::horizontal([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(5),
    ])
    .areas(bar_row);
    f.render_widget(Paragraph::new(percent(card.bar.first.proportion)), left);
    f.render_widget(ProbabilityBarWidget { bar: &card.bar }, track);
    f.render_widget(
        Paragraph::new(percent(card.bar.second.proportion)).alignment(Alignment::Right),
        right,
    );

    f.render_widget(
        Paragraph::new(info_line(card)).style(Style::default().fg(Color::Gray)),
        info,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
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

/// Cards to draw so that `selected` stays on screen.
pub fn visible_range(selected: usize, len: usize, per_page: usize) -> Range<usize> {
    if per_page == 0 || len == 0 {
        return 0..0;
    }
    let start = (selected + 1).saturating_sub(per_page).min(len.saturating_sub(per_page));
    start..(start + per_page).min(len)
}

fn line_score_header() -> String {
    format!(
        "{:<width$}{:>4}{:>4}{:>4}{:>4}{:>4}{:>5}",
        "",
        "1",
        "2",
        "3",
        "4",
        "OT",
        "T",
        width = TEAM_COLUMN
    )
}

fn team_line(team: &TeamDisplay, line: &LineScoreRow) -> Line<'static> {
    let name_style = if team.fallback {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(hex_color(&team.primary_color).unwrap_or(Color::White))
            .add_modifier(Modifier::BOLD)
    };

    let mut periods = String::new();
    for points in line.periods {
        match points {
            Some(p) => periods.push_str(&format!("{p:>4}")),
            None => periods.push_str("   -"),
        }
    }
    match line.overtime {
        Some(p) => periods.push_str(&format!("{p:>4}")),
        None => periods.push_str("    "),
    }

    Line::from(vec![
        Span::styled(format!("{:>3} ", team.rank_label), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:<5}", team.abbreviation), name_style),
        Span::styled(format!("{:<8}", team.record), Style::default().fg(Color::Gray)),
        Span::raw(periods),
        Span::styled(
            format!("{:>5}", line.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

fn percent(proportion: f64) -> String {
    format!("{:.0}%", proportion * 100.0)
}

fn info_line(card: &GameCard) -> String {
    let situation = match (&card.down_distance, &card.possession_text) {
        (Some(dd), Some(spot)) => Some(format!("{dd} at {spot}")),
        (Some(dd), None) => Some(dd.clone()),
        (None, Some(spot)) => Some(spot.clone()),
        (None, None) => None,
    }
    .map(|s| if card.red_zone { format!("{s} (RZ)") } else { s });

    [
        Some(card.broadcast.clone()).filter(|b| !b.is_empty()),
        card.odds.clone(),
        situation,
        card.last_play.clone(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ")
}
