use crate::shared::{DisplayState, NUM_CHANNELS};

// state local to the tui: which slider has focus, plus the bits of
// DisplayState that key resolution needs, synced once per loop
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    pub focused: u8,
    // synced from DisplayState each frame
    pub notice_open: bool,
    pub album_titles: Vec<String>,
    pub selected_album: Option<usize>,
}

impl TuiState {
    pub fn sync(&mut self, ds: &DisplayState) {
        self.notice_open = ds.notice.is_some();
        self.selected_album = ds.selected_album;
        if self.album_titles != ds.album_titles {
            self.album_titles = ds.album_titles.clone();
        }
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + NUM_CHANNELS as u8 - 1) % NUM_CHANNELS as u8;
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % NUM_CHANNELS as u8;
    }

    // index of the album `step` places away from the selected one, wrapping
    pub fn neighbour_album(&self, step: isize) -> Option<usize> {
        let n = self.album_titles.len() as isize;
        if n == 0 {
            return None;
        }
        // nothing selected yet: next lands on the first album, previous on the last
        let from = match self.selected_album {
            Some(i) => i as isize,
            None if step > 0 => -1,
            None => 0,
        };
        Some((from + step).rem_euclid(n) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_albums(selected: Option<usize>) -> TuiState {
        TuiState {
            album_titles: vec!["Cafe".into(), "Forest".into(), "Rain".into()],
            selected_album: selected,
            ..TuiState::default()
        }
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut ts = TuiState::default();
        ts.focus_prev();
        assert_eq!(ts.focused, 9);
        ts.focus_next();
        assert_eq!(ts.focused, 0);
    }

    #[test]
    fn album_neighbours_wrap() {
        let ts = with_albums(Some(0));
        assert_eq!(ts.neighbour_album(1), Some(1));
        assert_eq!(ts.neighbour_album(-1), Some(2));
        let ts = with_albums(Some(2));
        assert_eq!(ts.neighbour_album(1), Some(0));
    }

    #[test]
    fn unselected_starts_from_the_ends() {
        let ts = with_albums(None);
        assert_eq!(ts.neighbour_album(1), Some(0));
        assert_eq!(ts.neighbour_album(-1), Some(2));
    }

    #[test]
    fn repeated_titles_still_step_forward() {
        let ts = TuiState {
            album_titles: vec!["Rain".into(), "Rain".into()],
            selected_album: Some(0),
            ..TuiState::default()
        };
        assert_eq!(ts.neighbour_album(1), Some(1));
    }

    #[test]
    fn no_albums_no_neighbours() {
        assert_eq!(TuiState::default().neighbour_album(1), None);
    }
}
