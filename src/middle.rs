// The middle layer: owns the player status, the current album and the ten
// sliders, turns ui events into mixer commands, and hands the tui a
// DisplayState to draw. Nothing in here touches the terminal or the audio
// device, so the whole state machine runs in tests.
//
//   IDLE ──play──▶ PLAYING ◀──unpause── PAUSED
//                   │  └──────pause──────▶ │
//                   └──stop──▶ STOPPED ◀──stop
//   STOPPED ──play / album switch──▶ PLAYING

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::audio_api::{AudioCommand, SampleBuffer};
use crate::curve::{MAX_POSITION, position_to_volume};
use crate::loader::album_index::{AlbumLibrary, LibraryError};
use crate::loader::sample_loader;
use crate::pipeline::config::{AppConfig, ButtonLabels};
use crate::shared::{
    APP_TITLE, BULK_STEP, ChannelId, DisplayState, InputEvent, NUM_CHANNELS, PlayerStatus,
    RANDOM_CEILING, SliderView,
};

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("no album selected")]
    NoAlbum,

    #[error("nothing to play in {album}:\n{missing}")]
    NothingPlayable { album: String, missing: String },

    #[error(transparent)]
    Lookup(#[from] LibraryError),
}

#[derive(Clone, Debug, Default)]
struct Slider {
    position: u8,
    enabled: bool,
    in_use: bool, // its channel is looping on the mixer right now
    tooltip: String,
}

pub struct Middle {
    library: AlbumLibrary,
    current: Option<usize>,
    status: PlayerStatus,
    sliders: [Slider; NUM_CHANNELS], // indexed by channel
    default_position: u8,
    labels: ButtonLabels,
    sample_rate: u32,
    mixer_initialized: bool,
    loaded: HashMap<PathBuf, Arc<SampleBuffer>>, // decoded sources of the current album
    window_title: String,
    notice: Option<String>,
    rng: StdRng,
}

impl Middle {
    pub fn new(library: AlbumLibrary, config: &AppConfig, sample_rate: u32) -> Self {
        Self::with_rng(library, config, sample_rate, StdRng::from_entropy())
    }

    pub fn with_rng(library: AlbumLibrary, config: &AppConfig, sample_rate: u32, rng: StdRng) -> Self {
        let default_position = config.default_position();
        let current = if library.is_empty() { None } else { Some(0) };
        Self {
            library,
            current,
            status: PlayerStatus::Idle,
            sliders: std::array::from_fn(|_| Slider {
                position: default_position,
                ..Slider::default() // disabled until something plays
            }),
            default_position,
            labels: config.labels.clone(),
            sample_rate,
            mixer_initialized: false,
            loaded: HashMap::new(),
            window_title: APP_TITLE.to_string(),
            notice: None,
            rng,
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn current_album_dir(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.library.get(i))
            .map(|a| a.dir.as_str())
    }

    // Pre-select an album by folder name without starting playback
    pub fn select_album_dir(&mut self, dir: &str) -> Result<(), LibraryError> {
        self.current = Some(self.library.find_by_dir(dir)?);
        Ok(())
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<AudioCommand> {
        match event {
            InputEvent::PlayPause => match self.status {
                PlayerStatus::Playing => self.pause(),
                PlayerStatus::Paused => self.unpause(),
                PlayerStatus::Idle | PlayerStatus::Stopped => self.play_reporting(),
            },
            InputEvent::Play => self.play_reporting(),
            InputEvent::Stop => self.stop(),
            InputEvent::MoveSlider { channel, delta } => self.move_slider(channel, delta),
            InputEvent::BulkUp => self.bulk_shift(BULK_STEP as i16),
            InputEvent::BulkDown => self.bulk_shift(-(BULK_STEP as i16)),
            InputEvent::Randomize => self.randomize(),
            InputEvent::Reset => self.reset(),
            InputEvent::SelectAlbum(index) => match self.switch_album(index) {
                Ok(cmds) => cmds,
                Err(e) => {
                    log::error!("album switch failed: {e}");
                    self.show_notice(e.to_string());
                    vec![]
                }
            },
            InputEvent::DismissNotice => {
                self.notice = None;
                vec![]
            }
            InputEvent::Quit => vec![],
        }
    }

    fn play_reporting(&mut self) -> Vec<AudioCommand> {
        match self.play() {
            Ok(cmds) => cmds,
            Err(e) => {
                log::error!("play failed: {e}");
                self.show_notice(e.to_string());
                vec![]
            }
        }
    }

    // ── Transport ─────────────────────────────────────────────────

    pub fn play(&mut self) -> Result<Vec<AudioCommand>, PlayError> {
        let album = self
            .current
            .and_then(|i| self.library.get(i))
            .ok_or(PlayError::NoAlbum)?
            .clone();

        // resolve every source first, so a dead album leaves the player untouched
        let mut resolved: Vec<(ChannelId, String, Result<Arc<SampleBuffer>, String>)> =
            Vec::with_capacity(album.channels.len());
        let mut wanted: Vec<PathBuf> = Vec::with_capacity(album.channels.len());
        for assignment in &album.channels {
            let path = self.library.source_path(&album, assignment);
            let shown = format!("{}/{}", album.dir, assignment.file.display());
            let source = if !path.is_file() {
                Err(format!("File not exist: {shown}"))
            } else if let Some(buffer) = self.loaded.get(&path) {
                Ok(Arc::clone(buffer))
            } else {
                match sample_loader::load(&path, self.sample_rate) {
                    Ok(buffer) => {
                        self.loaded.insert(path.clone(), Arc::clone(&buffer));
                        Ok(buffer)
                    }
                    Err(e) => Err(format!("Could not decode {shown}: {e:#}")),
                }
            };
            wanted.push(path);
            resolved.push((assignment.channel, assignment.title.clone(), source));
        }

        let missing: Vec<String> = resolved
            .iter()
            .filter_map(|(_, _, source)| source.as_ref().err().cloned())
            .collect();
        if missing.len() == resolved.len() {
            return Err(PlayError::NothingPlayable {
                album: album.title,
                missing: missing.join("\n"),
            });
        }

        self.loaded.retain(|path, _| wanted.contains(path));
        let mut cmds = vec![AudioCommand::Init { channels: NUM_CHANNELS }];
        self.mixer_initialized = true;

        // channels the manifest doesn't mention stay dark and untitled
        for slider in &mut self.sliders {
            slider.enabled = false;
            slider.in_use = false;
            slider.tooltip.clear();
        }

        for (channel, title, source) in resolved {
            let slider = &mut self.sliders[channel.index()];
            match source {
                Ok(buffer) => {
                    slider.enabled = true;
                    slider.in_use = true;
                    slider.tooltip = title;
                    cmds.push(AudioCommand::Play {
                        channel: channel.index(),
                        buffer,
                        gain: position_to_volume(slider.position),
                    });
                }
                Err(reason) => log::warn!("{reason}"), // slider stays disabled
            }
        }

        self.status = PlayerStatus::Playing;
        self.window_title = format!("{} - {}", album.title, APP_TITLE);
        log::info!(
            "playing {} ({} of {} channel(s))",
            album.dir,
            self.sliders.iter().filter(|s| s.in_use).count(),
            album.channels.len()
        );
        if !missing.is_empty() {
            self.show_notice(missing.join("\n"));
        }
        Ok(cmds)
    }

    pub fn pause(&mut self) -> Vec<AudioCommand> {
        if self.status != PlayerStatus::Playing {
            return vec![];
        }
        self.status = PlayerStatus::Paused;
        vec![AudioCommand::PauseAll]
    }

    pub fn unpause(&mut self) -> Vec<AudioCommand> {
        if self.status != PlayerStatus::Paused {
            return vec![];
        }
        self.status = PlayerStatus::Playing;
        vec![AudioCommand::UnpauseAll]
    }

    pub fn stop(&mut self) -> Vec<AudioCommand> {
        self.status = PlayerStatus::Stopped;
        for slider in &mut self.sliders {
            slider.enabled = false;
            slider.in_use = false;
        }
        vec![AudioCommand::StopAll]
    }

    // Stop then play the new album. The new album is resolved before anything
    // is stopped: if it has nothing playable the old one keeps sounding and
    // stays selected.
    pub fn switch_album(&mut self, index: usize) -> Result<Vec<AudioCommand>, PlayError> {
        let dir = self.library.album_at(index)?.dir.clone();
        if self.current == Some(index) {
            return Ok(vec![]);
        }
        let previous = self.current.replace(index);
        log::info!("selected album {dir}");

        if !self.mixer_initialized {
            return Ok(vec![]);
        }
        // play() resets every slider and the status itself
        match self.play() {
            Ok(fresh) => {
                let mut cmds = vec![AudioCommand::StopAll];
                cmds.extend(fresh);
                Ok(cmds)
            }
            Err(e) => {
                self.current = previous;
                Err(e)
            }
        }
    }

    // ── Sliders ───────────────────────────────────────────────────

    fn gain_cmd(&self, channel: usize) -> AudioCommand {
        AudioCommand::SetVolume {
            channel,
            gain: position_to_volume(self.sliders[channel].position),
        }
    }

    pub fn move_slider(&mut self, channel: ChannelId, delta: i16) -> Vec<AudioCommand> {
        let Some(slider) = self.sliders.get_mut(channel.index()) else {
            return vec![];
        };
        if !slider.enabled {
            return vec![];
        }
        slider.position = shift(slider.position, delta);
        if self.status.is_active() && slider.in_use {
            vec![self.gain_cmd(channel.index())]
        } else {
            vec![]
        }
    }

    // every slider moves, only sounding channels get a new gain
    pub fn bulk_shift(&mut self, delta: i16) -> Vec<AudioCommand> {
        if !self.status.is_active() {
            return vec![];
        }
        for slider in &mut self.sliders {
            slider.position = shift(slider.position, delta);
        }
        (0..NUM_CHANNELS)
            .filter(|&ch| self.sliders[ch].in_use)
            .map(|ch| self.gain_cmd(ch))
            .collect()
    }

    pub fn randomize(&mut self) -> Vec<AudioCommand> {
        if !self.status.is_active() {
            return vec![];
        }
        let mut cmds = Vec::new();
        for ch in 0..NUM_CHANNELS {
            if !self.sliders[ch].in_use {
                continue;
            }
            self.sliders[ch].position = self.rng.gen_range(0..RANDOM_CEILING);
            cmds.push(self.gain_cmd(ch));
        }
        cmds
    }

    pub fn reset(&mut self) -> Vec<AudioCommand> {
        for slider in &mut self.sliders {
            slider.position = self.default_position;
        }
        if !self.status.is_active() {
            return vec![];
        }
        // silent slots ignore SetVolume, so all ten are fine
        (0..NUM_CHANNELS).map(|ch| self.gain_cmd(ch)).collect()
    }

    // ── Display ───────────────────────────────────────────────────

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            window_title: self.window_title.clone(),
            status: self.status,
            sliders: std::array::from_fn(|ch| {
                let s = &self.sliders[ch];
                SliderView {
                    position: s.position,
                    enabled: s.enabled,
                    in_use: s.in_use,
                    tooltip: s.tooltip.clone(),
                }
            }),
            album_titles: self.library.albums().iter().map(|a| a.title.clone()).collect(),
            selected_album: self.current,
            play_label: self.labels.play.clone(),
            pause_label: if self.status == PlayerStatus::Paused {
                self.labels.unpause.clone()
            } else {
                self.labels.pause.clone()
            },
            stop_label: self.labels.stop.clone(),
            notice: self.notice.clone(),
        }
    }
}

fn shift(position: u8, delta: i16) -> u8 {
    (position as i16 + delta).clamp(0, MAX_POSITION as i16) as u8
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::pipeline::test_fixture::{add_album, FIXTURE_RATE};

    fn config(collection: &Path) -> AppConfig {
        AppConfig::from_json(
            Path::new("config.json"),
            &serde_json::json!({
                "collection_folder": collection,
                "default_channel_volume": 20,
            })
            .to_string(),
        )
        .unwrap()
    }

    fn middle(collection: &Path) -> Middle {
        let library = AlbumLibrary::scan(collection).unwrap();
        Middle::with_rng(library, &config(collection), FIXTURE_RATE, StdRng::seed_from_u64(7))
    }

    // Rain: channels 0, 1, 2 all present. Cafe: channel 0 present, channel 1 missing.
    fn collection() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        add_album(
            dir.path(),
            "rain",
            "Rain",
            &[(0, "Drizzle", "drizzle.wav"), (1, "Roof", "roof.wav"), (2, "Thunder", "thunder.wav")],
            &["drizzle.wav", "roof.wav", "thunder.wav"],
        );
        add_album(
            dir.path(),
            "cafe",
            "Cafe",
            &[(0, "Chatter", "chatter.wav"), (1, "Cups", "cups.wav")],
            &["chatter.wav"],
        );
        dir
    }

    fn enabled(m: &Middle) -> Vec<bool> {
        m.display_state().sliders.iter().map(|s| s.enabled).collect()
    }

    fn positions(m: &Middle) -> Vec<u8> {
        m.display_state().sliders.iter().map(|s| s.position).collect()
    }

    fn volume_channels(cmds: &[AudioCommand]) -> Vec<usize> {
        cmds.iter()
            .filter_map(|c| match c {
                AudioCommand::SetVolume { channel, .. } => Some(*channel),
                _ => None,
            })
            .collect()
    }

    fn played_channels(cmds: &[AudioCommand]) -> Vec<usize> {
        cmds.iter()
            .filter_map(|c| match c {
                AudioCommand::Play { channel, .. } => Some(*channel),
                _ => None,
            })
            .collect()
    }

    fn playing_rain(dir: &Path) -> Middle {
        let mut m = middle(dir);
        m.select_album_dir("rain").unwrap();
        m.play().unwrap();
        m
    }

    #[test]
    fn starts_idle_with_default_positions_and_dark_sliders() {
        let dir = collection();
        let m = middle(dir.path());
        let ds = m.display_state();
        assert_eq!(ds.status, PlayerStatus::Idle);
        assert_eq!(ds.window_title, APP_TITLE);
        assert_eq!(ds.album_titles, vec!["Cafe", "Rain"]);
        assert_eq!(ds.selected_album, Some(0));
        assert!(ds.sliders.iter().all(|s| s.position == 20 && !s.enabled));
    }

    #[test]
    fn missing_second_file_leaves_first_channel_playing() {
        let dir = collection();
        let mut m = middle(dir.path());
        m.select_album_dir("cafe").unwrap();

        let cmds = m.play().unwrap();
        assert!(matches!(cmds[0], AudioCommand::Init { channels: NUM_CHANNELS }));
        assert_eq!(played_channels(&cmds), vec![0]);

        let ds = m.display_state();
        assert_eq!(ds.status, PlayerStatus::Playing);
        assert!(ds.sliders[0].enabled && ds.sliders[0].in_use);
        assert_eq!(ds.sliders[0].tooltip, "Chatter");
        assert!(!ds.sliders[1].enabled);
        assert!(ds.sliders[1].tooltip.is_empty());
        assert!(ds.notice.as_deref().unwrap_or_default().contains("cafe/cups.wav"));
        assert_eq!(ds.window_title, "Cafe - Noise Generator");
    }

    #[test]
    fn missing_channel_three_only_disables_channel_three() {
        let dir = tempfile::tempdir().unwrap();
        add_album(
            dir.path(),
            "storm",
            "Storm",
            &[(0, "a", "a.wav"), (2, "b", "b.wav"), (3, "c", "c.wav"), (5, "d", "d.wav")],
            &["a.wav", "b.wav", "d.wav"],
        );
        let mut m = middle(dir.path());

        let cmds = m.handle_input(InputEvent::Play);
        assert_eq!(played_channels(&cmds), vec![0, 2, 5]);
        let on = enabled(&m);
        assert_eq!(on, vec![true, false, true, false, false, true, false, false, false, false]);
        assert_eq!(m.status(), PlayerStatus::Playing);
    }

    #[test]
    fn enabled_always_matches_sounding() {
        let dir = collection();
        let mut m = middle(dir.path());
        m.handle_input(InputEvent::Play);
        assert!(m.display_state().sliders.iter().all(|s| s.enabled == s.in_use));
        m.handle_input(InputEvent::SelectAlbum(1));
        assert!(m.display_state().sliders.iter().all(|s| s.enabled == s.in_use));
        m.handle_input(InputEvent::Stop);
        assert!(m.display_state().sliders.iter().all(|s| s.enabled == s.in_use));
    }

    #[test]
    fn play_uses_the_curve_for_starting_gain() {
        let dir = collection();
        let mut m = middle(dir.path());
        m.select_album_dir("rain").unwrap();
        let cmds = m.play().unwrap();
        for cmd in &cmds {
            if let AudioCommand::Play { gain, .. } = cmd {
                assert_eq!(*gain, position_to_volume(20));
            }
        }
    }

    #[test]
    fn album_with_nothing_on_disk_does_not_start() {
        let dir = tempfile::tempdir().unwrap();
        add_album(dir.path(), "ghost", "Ghost", &[(0, "a", "a.wav")], &[]);
        let mut m = middle(dir.path());

        assert!(matches!(m.play(), Err(PlayError::NothingPlayable { .. })));
        let cmds = m.handle_input(InputEvent::Play);
        assert!(cmds.is_empty());
        assert_eq!(m.status(), PlayerStatus::Idle);
        assert!(m.display_state().notice.is_some());
    }

    #[test]
    fn undecodable_file_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        add_album(dir.path(), "odd", "Odd", &[(0, "a", "a.wav"), (1, "b", "b.wav")], &["a.wav"]);
        std::fs::write(dir.path().join("odd").join("b.wav"), b"definitely not riff").unwrap();
        let mut m = middle(dir.path());

        let cmds = m.handle_input(InputEvent::Play);
        assert_eq!(played_channels(&cmds), vec![0]);
        assert!(!m.display_state().sliders[1].enabled);
    }

    #[test]
    fn play_without_albums_reports_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = middle(dir.path());
        assert!(matches!(m.play(), Err(PlayError::NoAlbum)));
        assert!(m.handle_input(InputEvent::PlayPause).is_empty());
        assert_eq!(m.display_state().notice.as_deref(), Some("no album selected"));
    }

    #[test]
    fn one_button_toggles_pause() {
        let dir = collection();
        let mut m = middle(dir.path());

        let cmds = m.handle_input(InputEvent::PlayPause);
        assert_eq!(played_channels(&cmds), vec![0]);
        assert_eq!(m.display_state().pause_label, "Pause");

        let cmds = m.handle_input(InputEvent::PlayPause);
        assert!(matches!(cmds.as_slice(), [AudioCommand::PauseAll]));
        assert_eq!(m.status(), PlayerStatus::Paused);
        assert_eq!(m.display_state().pause_label, "UnPause");

        let cmds = m.handle_input(InputEvent::PlayPause);
        assert!(matches!(cmds.as_slice(), [AudioCommand::UnpauseAll]));
        assert_eq!(m.status(), PlayerStatus::Playing);
    }

    #[test]
    fn pause_and_unpause_outside_their_state_do_nothing() {
        let dir = collection();
        let mut m = middle(dir.path());
        assert!(m.pause().is_empty());
        assert!(m.unpause().is_empty());
        assert_eq!(m.status(), PlayerStatus::Idle);

        m.play().unwrap();
        assert!(m.unpause().is_empty());
        assert_eq!(m.status(), PlayerStatus::Playing);
    }

    #[test]
    fn stop_silences_and_locks_sliders() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        m.handle_input(InputEvent::PlayPause); // paused

        let cmds = m.handle_input(InputEvent::Stop);
        assert!(matches!(cmds.as_slice(), [AudioCommand::StopAll]));
        assert_eq!(m.status(), PlayerStatus::Stopped);
        assert!(enabled(&m).iter().all(|e| !e));

        let before = positions(&m);
        assert!(m.handle_input(InputEvent::MoveSlider { channel: ChannelId(0), delta: 10 }).is_empty());
        assert!(m.handle_input(InputEvent::BulkUp).is_empty());
        assert!(m.handle_input(InputEvent::Randomize).is_empty());
        assert_eq!(positions(&m), before);

        // play again from stopped
        let cmds = m.handle_input(InputEvent::PlayPause);
        assert_eq!(played_channels(&cmds), vec![0, 1, 2]);
        assert_eq!(m.status(), PlayerStatus::Playing);
    }

    #[test]
    fn slider_move_applies_curve_to_sounding_channel() {
        let dir = collection();
        let mut m = playing_rain(dir.path());

        let cmds = m.handle_input(InputEvent::MoveSlider { channel: ChannelId(1), delta: 30 });
        assert_eq!(m.display_state().sliders[1].position, 50);
        match cmds.as_slice() {
            [AudioCommand::SetVolume { channel: 1, gain }] => assert_eq!(*gain, position_to_volume(50)),
            other => panic!("unexpected commands {other:?}"),
        }

        // channel 7 isn't in the album, so it is disabled and silent
        assert!(m.handle_input(InputEvent::MoveSlider { channel: ChannelId(7), delta: 5 }).is_empty());
        assert_eq!(m.display_state().sliders[7].position, 20);
    }

    #[test]
    fn slider_moves_while_paused_still_reach_the_mixer() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        m.pause();
        let cmds = m.move_slider(ChannelId(2), -20);
        assert_eq!(volume_channels(&cmds), vec![2]);
        assert_eq!(m.display_state().sliders[2].position, 0);
    }

    #[test]
    fn slider_positions_stay_on_the_scale() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        m.move_slider(ChannelId(0), 500);
        m.move_slider(ChannelId(1), -500);
        let p = positions(&m);
        assert_eq!((p[0], p[1]), (100, 0));
    }

    #[test]
    fn bulk_down_floors_at_zero_and_bulk_up_caps_at_hundred() {
        let dir = collection();
        let mut m = playing_rain(dir.path());

        for _ in 0..10 {
            m.handle_input(InputEvent::BulkDown);
        }
        assert!(positions(&m).iter().all(|&p| p == 0));

        for _ in 0..30 {
            m.handle_input(InputEvent::BulkUp);
        }
        assert!(positions(&m).iter().all(|&p| p == 100));
    }

    #[test]
    fn bulk_moves_every_slider_but_only_regains_sounding_ones() {
        let dir = collection();
        let mut m = playing_rain(dir.path());

        let cmds = m.handle_input(InputEvent::BulkUp);
        assert_eq!(volume_channels(&cmds), vec![0, 1, 2]);
        assert!(positions(&m).iter().all(|&p| p == 25));

        let cmds = m.handle_input(InputEvent::BulkDown);
        assert_eq!(volume_channels(&cmds), vec![0, 1, 2]);
        assert!(positions(&m).iter().all(|&p| p == 20));
    }

    #[test]
    fn bulk_is_ignored_when_idle() {
        let dir = collection();
        let mut m = middle(dir.path());
        assert!(m.handle_input(InputEvent::BulkUp).is_empty());
        assert!(positions(&m).iter().all(|&p| p == 20));
    }

    #[test]
    fn randomize_only_touches_channels_in_use() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        m.move_slider(ChannelId(0), 70); // 90, well outside the random range

        for _ in 0..20 {
            let cmds = m.handle_input(InputEvent::Randomize);
            assert_eq!(volume_channels(&cmds), vec![0, 1, 2]);
            let p = positions(&m);
            assert!(p[..3].iter().all(|&x| x < RANDOM_CEILING));
            assert!(p[3..].iter().all(|&x| x == 20));
        }
    }

    #[test]
    fn reset_restores_default_and_regains_all_channels_when_active() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        m.handle_input(InputEvent::BulkUp);
        m.handle_input(InputEvent::BulkUp);

        let cmds = m.handle_input(InputEvent::Reset);
        assert_eq!(volume_channels(&cmds), (0..NUM_CHANNELS).collect::<Vec<_>>());
        assert!(positions(&m).iter().all(|&p| p == 20));
    }

    #[test]
    fn reset_while_stopped_only_moves_sliders() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        m.handle_input(InputEvent::BulkUp);
        m.handle_input(InputEvent::Stop);

        assert!(m.handle_input(InputEvent::Reset).is_empty());
        assert!(positions(&m).iter().all(|&p| p == 20));
    }

    #[test]
    fn switching_album_before_first_play_only_selects() {
        let dir = collection();
        let mut m = middle(dir.path());
        assert!(m.handle_input(InputEvent::SelectAlbum(1)).is_empty());
        assert_eq!(m.current_album_dir(), Some("rain"));
        assert_eq!(m.status(), PlayerStatus::Idle);
    }

    #[test]
    fn switching_album_after_play_restarts_on_the_new_album() {
        let dir = collection();
        let mut m = middle(dir.path());
        m.handle_input(InputEvent::Play); // cafe
        m.handle_input(InputEvent::Stop);

        let cmds = m.handle_input(InputEvent::SelectAlbum(1));
        assert!(matches!(cmds[0], AudioCommand::StopAll));
        assert!(matches!(cmds[1], AudioCommand::Init { .. }));
        assert_eq!(played_channels(&cmds), vec![0, 1, 2]);
        assert_eq!(m.status(), PlayerStatus::Playing);
        assert_eq!(m.display_state().window_title, "Rain - Noise Generator");
        assert_eq!(m.display_state().sliders[1].tooltip, "Roof");
    }

    #[test]
    fn reselecting_the_current_album_is_a_noop() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        assert!(m.handle_input(InputEvent::SelectAlbum(1)).is_empty());
        assert_eq!(m.status(), PlayerStatus::Playing);
    }

    #[test]
    fn unknown_album_aborts_the_switch() {
        let dir = collection();
        let mut m = playing_rain(dir.path());

        let cmds = m.handle_input(InputEvent::SelectAlbum(7));
        assert!(cmds.is_empty());
        assert_eq!(m.current_album_dir(), Some("rain"));
        assert_eq!(m.status(), PlayerStatus::Playing);
        assert!(m.display_state().notice.unwrap().contains("7"));

        m.handle_input(InputEvent::DismissNotice);
        assert!(m.display_state().notice.is_none());

        assert!(matches!(m.select_album_dir("ocean"), Err(LibraryError::UnknownAlbum { .. })));
    }

    #[test]
    fn switching_to_a_dead_album_keeps_the_old_one_playing() {
        let dir = collection();
        add_album(dir.path(), "ghost", "Ghost", &[(0, "Wind", "wind.wav")], &[]);
        let mut m = playing_rain(dir.path()); // albums: Cafe, Ghost, Rain

        let cmds = m.handle_input(InputEvent::SelectAlbum(1));
        assert!(cmds.is_empty());
        assert_eq!(m.current_album_dir(), Some("rain"));
        assert_eq!(m.status(), PlayerStatus::Playing);
        assert_eq!(enabled(&m)[..4], [true, true, true, false]);
        assert!(m.display_state().sliders.iter().all(|s| s.enabled == s.in_use));
        assert!(m.display_state().notice.unwrap().contains("ghost/wind.wav"));

        // still adjustable, and a restart needs no fresh decode
        assert_eq!(volume_channels(&m.move_slider(ChannelId(0), 5)), vec![0]);
        assert_eq!(m.loaded.len(), 3);
    }

    #[test]
    fn albums_sharing_a_title_are_each_selectable() {
        let dir = tempfile::tempdir().unwrap();
        add_album(dir.path(), "a", "Rain", &[(0, "Drizzle", "drizzle.wav")], &["drizzle.wav"]);
        add_album(dir.path(), "b", "Rain", &[(0, "Roof", "roof.wav")], &["roof.wav"]);
        let mut m = middle(dir.path());
        m.handle_input(InputEvent::Play);
        assert_eq!(m.current_album_dir(), Some("a"));

        let cmds = m.handle_input(InputEvent::SelectAlbum(1));
        assert_eq!(played_channels(&cmds), vec![0]);
        assert_eq!(m.current_album_dir(), Some("b"));
        assert_eq!(m.display_state().sliders[0].tooltip, "Roof");
    }

    #[test]
    fn replay_reuses_decoded_sources() {
        let dir = collection();
        let mut m = playing_rain(dir.path());
        let first = match &m.play().unwrap()[1] {
            AudioCommand::Play { buffer, .. } => Arc::clone(buffer),
            other => panic!("unexpected {other:?}"),
        };
        let second = match &m.play().unwrap()[1] {
            AudioCommand::Play { buffer, .. } => Arc::clone(buffer),
            other => panic!("unexpected {other:?}"),
        };
        assert!(Arc::ptr_eq(&first, &second));
    }
}
