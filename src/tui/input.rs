use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use super::mode::TuiState;
use crate::shared::{ChannelId, InputEvent};

const FINE_STEP: i16 = 1;
const COARSE_STEP: i16 = 10;

// poll for input from the terminal, resolve keys against the tui state into
// semantic input events for the middle layer
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code, ts));
    }
    Ok(vec![])
}

fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    // an open notice swallows the next key
    if ts.notice_open {
        ts.notice_open = false;
        return vec![InputEvent::DismissNotice];
    }

    match code {
        KeyCode::Esc | KeyCode::Char('q') => vec![InputEvent::Quit],

        // transport
        KeyCode::Char(' ') => vec![InputEvent::PlayPause],
        KeyCode::Char('p') => vec![InputEvent::Play],
        KeyCode::Char('s') => vec![InputEvent::Stop],

        // focus stays in the tui
        KeyCode::Left | KeyCode::Char('h') => { ts.focus_prev(); vec![] }
        KeyCode::Right | KeyCode::Char('l') => { ts.focus_next(); vec![] }
        KeyCode::Char(c @ '0'..='9') => {
            ts.focused = digit_to_channel(c);
            vec![]
        }

        // focused slider
        KeyCode::Up | KeyCode::Char('k') => move_focused(ts, FINE_STEP),
        KeyCode::Down | KeyCode::Char('j') => move_focused(ts, -FINE_STEP),
        KeyCode::PageUp => move_focused(ts, COARSE_STEP),
        KeyCode::PageDown => move_focused(ts, -COARSE_STEP),

        // whole bank
        KeyCode::Char('+') | KeyCode::Char('=') => vec![InputEvent::BulkUp],
        KeyCode::Char('-') => vec![InputEvent::BulkDown],
        KeyCode::Char('x') => vec![InputEvent::Randomize],
        KeyCode::Char('r') => vec![InputEvent::Reset],

        // album selector
        KeyCode::Char('[') => select_neighbour(ts, -1),
        KeyCode::Char(']') => select_neighbour(ts, 1),

        _ => vec![],
    }
}

fn move_focused(ts: &TuiState, delta: i16) -> Vec<InputEvent> {
    vec![InputEvent::MoveSlider { channel: ChannelId(ts.focused), delta }]
}

fn select_neighbour(ts: &TuiState, step: isize) -> Vec<InputEvent> {
    match ts.neighbour_album(step) {
        Some(index) => vec![InputEvent::SelectAlbum(index)],
        None => vec![],
    }
}

// keyboard order: 1..9 are channels 0..8, 0 is channel 9
fn digit_to_channel(c: char) -> u8 {
    match c.to_digit(10) {
        Some(0) | None => 9,
        Some(d) => d as u8 - 1,
    }
}
