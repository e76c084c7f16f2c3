// Called on startup and quit; remembers which album was selected last time.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const NOISETTY_DIR: &str = ".noisetty";
const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub album_dir: Option<String>,
}

// <collection>/.noisetty/session.json
fn session_file_path(collection: &Path) -> PathBuf {
    collection.join(NOISETTY_DIR).join(SESSION_FILE)
}

// missing or broken session files just mean "no previous session"
pub fn load_session(collection: &Path) -> Option<Session> {
    let path = session_file_path(collection);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("ignoring unreadable session {}: {e}", path.display());
            None
        }
    }
}

// Save the session, making .noisetty/ if it doesn't exist already
pub fn save_session(collection: &Path, session: &Session) -> anyhow::Result<()> {
    let path = session_file_path(collection);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(&path, json)?;
    Ok(())
}
