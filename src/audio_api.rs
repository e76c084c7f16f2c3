use std::sync::Arc;

pub use crate::audio::SampleBuffer;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // (Re)initialize the mixer with this many channel slots; clears every slot.
    Init { channels: usize },

    // The engine can't load files (interrupts thread), so the buffer is decoded
    // on the ui thread (see sample_loader.rs) and handed over ready to loop.
    Play { channel: usize, buffer: Arc<SampleBuffer>, gain: f32 },

    SetVolume { channel: usize, gain: f32 },
    PauseAll,
    UnpauseAll,
    StopAll,
}
