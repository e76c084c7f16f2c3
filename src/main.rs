mod audio;
mod audio_api;
mod curve;
mod loader;
mod middle;
mod pipeline;
mod shared;
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use loader::album_index::AlbumLibrary;
use middle::Middle;
use pipeline::config::{self, DEFAULT_CONFIG_FILE};
use pipeline::session::{self, Session};
use shared::InputEvent;

const LOG_FILE: &str = "noisetty.log";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_logging()?;
    log::info!("noisetty starting up");

    // everything that can fail fatally happens before the terminal goes raw
    let config_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = config::load_config(&config_path)?;
    let library = AlbumLibrary::scan(&config.collection_folder)?;
    let audio = audio::start_audio()?;

    let mut middle = Middle::new(library, &config, audio.sample_rate());
    select_initial_album(&mut middle, &config);

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    crossterm::execute!(std::io::stdout(), terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    if config.auto_play {
        for cmd in middle.handle_input(InputEvent::Play) {
            audio.send(cmd);
        }
    }

    let tick_rate = std::time::Duration::from_millis(16); // ~60fps
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let ds = middle.display_state();
        tui_state.sync(&ds);

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds, &tui_state);
        })?;

        for event in tui::input::poll_input(tick_rate, &mut tui_state)? {
            if event == InputEvent::Quit {
                log::info!("quitting ({})", middle.status().label());
                let session = Session {
                    album_dir: middle.current_album_dir().map(str::to_owned),
                };
                if let Err(e) = session::save_session(&config.collection_folder, &session) {
                    log::warn!("could not save session: {e:#}");
                }
                drop(term);
                drop(audio);
                return Ok(());
            }
            for cmd in middle.handle_input(event) {
                audio.send(cmd);
            }
        }
    }
}

// Last session's album wins over the configured default; an unknown default
// only costs the selection, the first album stays selected.
fn select_initial_album(middle: &mut Middle, config: &config::AppConfig) {
    if let Some(dir) = session::load_session(&config.collection_folder).and_then(|s| s.album_dir) {
        match middle.select_album_dir(&dir) {
            Ok(()) => return,
            Err(e) => log::info!("previous session album is gone: {e}"),
        }
    }
    if let Some(dir) = &config.default_album_folder {
        if let Err(e) = middle.select_album_dir(dir) {
            log::error!("default album: {e}");
            middle.show_notice(format!("Default album: {e}"));
        }
    }
    if middle.current_album_dir().is_none() {
        middle.show_notice(format!("No albums found in {}", config.collection_folder.display()));
    }
}

// The tui owns stdout, so logs go to a file (NOISETTY_LOG, default noisetty.log).
// Set RUST_LOG=debug for verbose output.
fn init_logging() -> anyhow::Result<()> {
    let path = std::env::var_os("NOISETTY_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOG_FILE));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
