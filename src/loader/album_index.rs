// Scans the collection folder for albums: every immediate subfolder holding a
// data.json manifest becomes one selectable album.
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pipeline::album::{Album, AlbumManifest, ChannelAssignment, MANIFEST_FILE};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("collection folder {} is not readable: {source}", .path.display())]
    Collection {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no album with {key} {value:?}")]
    UnknownAlbum { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AlbumLibrary {
    root: PathBuf,
    albums: Vec<Album>, // sorted by title
}

impl AlbumLibrary {
    pub fn scan(root: &Path) -> Result<Self, LibraryError> {
        let entries = std::fs::read_dir(root).map_err(|source| LibraryError::Collection {
            path: root.to_path_buf(),
            source,
        })?;

        let mut albums = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(dir) = entry.file_name().to_str().map(str::to_owned) else {
                log::warn!("skipping non-utf8 folder {}", path.display());
                continue;
            };
            if dir.starts_with('.') {
                continue; // our own .noisetty and other hidden folders
            }
            match read_manifest(&path.join(MANIFEST_FILE)) {
                Ok(manifest) => albums.push(Album::from_manifest(dir, manifest)),
                Err(e) => log::warn!("{MANIFEST_FILE} not usable in dir {dir}: {e:#}"),
            }
        }

        albums.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.dir.cmp(&b.dir)));
        log::info!("found {} album(s) in {}", albums.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            albums,
        })
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn get(&self, index: usize) -> Option<&Album> {
        self.albums.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn find_by_dir(&self, dir: &str) -> Result<usize, LibraryError> {
        self.albums
            .iter()
            .position(|a| a.dir == dir)
            .ok_or_else(|| LibraryError::UnknownAlbum { key: "dir", value: dir.to_owned() })
    }

    // titles may repeat, so the selector works by list position
    pub fn album_at(&self, index: usize) -> Result<&Album, LibraryError> {
        self.albums
            .get(index)
            .ok_or_else(|| LibraryError::UnknownAlbum { key: "index", value: index.to_string() })
    }

    // <collection>/<album dir>/<file>
    pub fn source_path(&self, album: &Album, assignment: &ChannelAssignment) -> PathBuf {
        self.root.join(&album.dir).join(&assignment.file)
    }
}

fn read_manifest(path: &Path) -> anyhow::Result<AlbumManifest> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
