// Purely for testing: build a collection folder on disk with albums and tiny WAV loops.

use std::path::Path;

use crate::pipeline::album::MANIFEST_FILE;

pub const FIXTURE_RATE: u32 = 8000;

pub fn write_wav(path: &Path, frames: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: FIXTURE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut w = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        w.write_sample(((i % 64) as i16 - 32) * 256).unwrap();
    }
    w.finalize().unwrap();
}

// Writes <root>/<dir>/data.json; `present` lists the files to actually create
pub fn add_album(root: &Path, dir: &str, title: &str, files: &[(u8, &str, &str)], present: &[&str]) {
    let album_dir = root.join(dir);
    std::fs::create_dir_all(&album_dir).unwrap();

    let entries: Vec<serde_json::Value> = files
        .iter()
        .map(|(channel, title, file)| serde_json::json!({ "channel": channel, "title": title, "file": file }))
        .collect();
    let manifest = serde_json::json!({ "title": title, "files": entries });
    std::fs::write(album_dir.join(MANIFEST_FILE), manifest.to_string()).unwrap();

    for file in present {
        write_wav(&album_dir.join(file), 256);
    }
}
