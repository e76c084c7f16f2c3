use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::mode::TuiState;
use super::sliders::draw_slider_bank;
use crate::curve::position_to_volume;
use crate::shared::{DisplayState, PlayerStatus};

const HELP: &str =
    "space play/pause  p play  s stop  ←→ focus  ↑↓ move  +/- all  x random  r reset  [ ] album  q quit";

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title + status
            Constraint::Length(3), // album selector + buttons
            Constraint::Min(8),    // slider bank
            Constraint::Length(3), // tooltip + help
        ])
        .split(area);

    draw_header(frame, sections[0], state);
    draw_controls(frame, sections[1], state);
    draw_slider_bank(frame, sections[2], &state.sliders, ts.focused);
    draw_footer(frame, sections[3], state, ts);

    if let Some(text) = &state.notice {
        draw_notice(frame, area, text);
    }
}

fn status_style(status: PlayerStatus) -> Style {
    let color = match status {
        PlayerStatus::Playing => Color::LightGreen,
        PlayerStatus::Paused => Color::Yellow,
        PlayerStatus::Stopped => Color::LightRed,
        PlayerStatus::Idle => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let line = Line::from(vec![
        Span::styled(state.window_title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format!("[{}]", state.status.label()), status_style(state.status)),
    ]);
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_controls(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    // dropdown stand-in: ◀ selected title ▶ (n/total)
    let album = match state.selected_album.and_then(|i| state.album_titles.get(i).map(|t| (i, t))) {
        Some((i, title)) => format!("◀ {title} ▶  ({}/{})", i + 1, state.album_titles.len()),
        None => "no albums".to_string(),
    };
    frame.render_widget(
        Paragraph::new(album).block(Block::default().borders(Borders::ALL).title("Album")),
        halves[0],
    );

    let play_style = if state.status.is_active() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let buttons = Line::from(vec![
        Span::styled(format!("[{}]", state.play_label), play_style),
        Span::raw(" "),
        Span::raw(format!("[{}]", state.pause_label)),
        Span::raw(" "),
        Span::raw(format!("[{}]", state.stop_label)),
    ]);
    frame.render_widget(Paragraph::new(buttons).block(Block::default().borders(Borders::ALL)), halves[1]);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState) {
    let slider = &state.sliders[ts.focused as usize];
    let mut tip = if slider.tooltip.is_empty() {
        format!("channel {}", ts.focused)
    } else {
        format!("channel {}: {}", ts.focused, slider.tooltip)
    };
    if slider.in_use {
        tip.push_str(&format!("  gain {:.2}", position_to_volume(slider.position)));
    }
    let lines = vec![
        Line::from(tip),
        Line::styled(HELP, Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_notice(frame: &mut Frame, area: Rect, text: &str) {
    let popup = centered(area, 60, 40);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed))
        .title("Notice")
        .title_bottom(Line::from("any key to close").centered());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), popup);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (area.width as u32 * percent_x as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y as u32 / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
