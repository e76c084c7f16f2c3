use std::path::Path;
use std::sync::Arc;

use crate::audio::SampleBuffer;

// Decode a channel's source on the ui thread, ready to hand to the engine
pub fn load(path: &Path, target_rate: u32) -> anyhow::Result<Arc<SampleBuffer>> {
    let buffer = SampleBuffer::load_wav(path, target_rate)?;
    if buffer.is_empty() {
        anyhow::bail!("{} has no audio frames", path.display());
    }
    log::debug!("decoded {} ({} frames)", path.display(), buffer.len());
    Ok(Arc::new(buffer))
}
