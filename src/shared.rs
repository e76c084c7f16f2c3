// Keybinds (resolved in tui/input.rs):
//
//   Space         //  PlayPause (one button, dispatches on player status)
//   p             //  Play
//   s             //  Stop
//   Left / h      //  focus previous slider (tui-local)
//   Right / l     //  focus next slider (tui-local)
//   1..9, 0       //  focus channel 0..8, 9 (tui-local)
//   Up / k        //  MoveSlider(+1) on the focused channel
//   Down / j      //  MoveSlider(-1)
//   PgUp / PgDn   //  MoveSlider(+/-10)
//   + / -         //  BulkUp / BulkDown
//   x             //  Randomize
//   r             //  Reset
//   [ / ]         //  SelectAlbum(previous / next), wraps around
//   Esc / q       //  Quit
//
// The tui only renders the DisplayState the middle layer hands it each frame;
// all playback and slider state lives in middle.rs.

pub const NUM_CHANNELS: usize = 10;
pub const APP_TITLE: &str = "Noise Generator";

// bulk up/down step
pub const BULK_STEP: u8 = 5;
// randomize picks positions in [0, RANDOM_CEILING)
pub const RANDOM_CEILING: u8 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u8);

impl ChannelId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
}

impl PlayerStatus {
    // PLAYING and PAUSED are the only states where sliders drive the mixer
    pub fn is_active(self) -> bool {
        matches!(self, PlayerStatus::Playing | PlayerStatus::Paused)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerStatus::Idle => "IDLE",
            PlayerStatus::Playing => "PLAYING",
            PlayerStatus::Paused => "PAUSED",
            PlayerStatus::Stopped => "STOPPED",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // transport
    PlayPause,
    Play,
    Stop,

    // sliders
    MoveSlider { channel: ChannelId, delta: i16 },
    BulkUp,
    BulkDown,
    Randomize,
    Reset,

    // album selector, by position in the title-sorted list (titles may repeat)
    SelectAlbum(usize),

    DismissNotice,
    Quit,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliderView {
    pub position: u8,
    pub enabled: bool,
    pub in_use: bool,
    pub tooltip: String,
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub window_title: String,
    pub status: PlayerStatus,
    pub sliders: [SliderView; NUM_CHANNELS],
    pub album_titles: Vec<String>,
    pub selected_album: Option<usize>,
    pub play_label: String,
    pub pause_label: String,
    pub stop_label: String,
    pub notice: Option<String>, // modal popup, any key dismisses
}
