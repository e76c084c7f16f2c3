// Album data: what a folder's data.json says, and the validated form the
// mixer works from.
//
// "album": one folder under the collection, a set of looping sounds.
// "channel": one of the ten mixer slots / sliders, 0-9.
// "assignment": a manifest line binding one sound file to one channel.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::{ChannelId, NUM_CHANNELS};

pub const MANIFEST_FILE: &str = "data.json";

// data.json, exactly as content authors write it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlbumManifest {
    pub title: String,
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub channel: i64, // validated into a ChannelId when the album is built
    pub title: String,
    pub file: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelAssignment {
    pub channel: ChannelId,
    pub title: String,
    pub file: PathBuf, // relative to the album folder
}

#[derive(Clone, Debug, PartialEq)]
pub struct Album {
    pub dir: String,
    pub title: String,
    pub channels: Vec<ChannelAssignment>, // manifest order, one entry per channel
}

impl Album {
    pub fn from_manifest(dir: impl Into<String>, manifest: AlbumManifest) -> Self {
        let dir = dir.into();
        let mut channels: Vec<ChannelAssignment> = Vec::with_capacity(manifest.files.len());

        for entry in manifest.files {
            let Some(channel) = u8::try_from(entry.channel)
                .ok()
                .filter(|c| (*c as usize) < NUM_CHANNELS)
                .map(ChannelId)
            else {
                log::warn!("{dir}: channel {} is out of range, skipping {}", entry.channel, entry.file);
                continue;
            };

            let assignment = ChannelAssignment {
                channel,
                title: entry.title,
                file: PathBuf::from(entry.file),
            };
            // later lines win over earlier ones for the same channel
            if let Some(existing) = channels.iter_mut().find(|a| a.channel == channel) {
                log::warn!("{dir}: channel {} assigned twice, keeping {}", channel.0, assignment.file.display());
                *existing = assignment;
            } else {
                channels.push(assignment);
            }
        }

        Self {
            dir,
            title: manifest.title,
            channels,
        }
    }

    #[cfg(test)]
    pub fn assignment(&self, channel: ChannelId) -> Option<&ChannelAssignment> {
        self.channels.iter().find(|a| a.channel == channel)
    }
}
