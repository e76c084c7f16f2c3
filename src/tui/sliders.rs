use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::curve::MAX_POSITION;
use crate::shared::{NUM_CHANNELS, SliderView};

// one vertical fader per channel, left to right
pub fn draw_slider_bank(frame: &mut Frame, area: Rect, sliders: &[SliderView; NUM_CHANNELS], focused: u8) {
    let col_constraints = [Constraint::Ratio(1, NUM_CHANNELS as u32); NUM_CHANNELS];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(col_constraints)
        .split(area);

    for (ch, cell_area) in cols.iter().enumerate() {
        draw_slider(frame, *cell_area, ch, &sliders[ch], ch == focused as usize);
    }
}

fn draw_slider(frame: &mut Frame, area: Rect, channel: usize, slider: &SliderView, focused: bool) {
    let fill = if slider.in_use {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let border = match (focused, slider.enabled) {
        (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Gray),
        (false, _) => Style::default().fg(Color::DarkGray),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::from(format!("{channel}")).centered())
        .title_bottom(Line::from(format!("{:>3}", slider.position)).centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = filled_rows(slider.position, inner.height);
    let bar = "█".repeat(inner.width as usize);
    let lines: Vec<Line> = (0..inner.height)
        .map(|row| {
            // rows count down from the top; the bar grows from the bottom
            if inner.height - row <= rows {
                Line::styled(bar.clone(), fill)
            } else {
                Line::from("")
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn filled_rows(position: u8, height: u16) -> u16 {
    let position = position.min(MAX_POSITION) as u32;
    ((position * height as u32 + MAX_POSITION as u32 / 2) / MAX_POSITION as u32) as u16
}
