use crate::audio_api::AudioCommand;

use super::frame::StereoFrame;
use super::voice::LoopVoice;

pub const MAX_CHANNELS: usize = 16; // hard cap so we wont malloc in audio callback

pub struct Engine {
    channels: [Option<LoopVoice>; MAX_CHANNELS], // fixed pool, one looping voice per slot
    num_channels: usize,
    initialized: bool,
    paused: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            channels: std::array::from_fn(|_| None),
            num_channels: 0,
            initialized: false,
            paused: false,
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Init { channels } => {
                self.stop_all();
                self.num_channels = channels.min(MAX_CHANNELS);
                self.initialized = true;
            }
            AudioCommand::Play { channel, buffer, gain } => {
                if !self.initialized || channel >= self.num_channels || buffer.is_empty() {
                    return;
                }
                self.channels[channel] = Some(LoopVoice::new(buffer, gain));
            }
            AudioCommand::SetVolume { channel, gain } => {
                // silent slots just ignore it
                if let Some(voice) = self.channels.get_mut(channel).and_then(Option::as_mut) {
                    voice.set_gain(gain);
                }
            }
            AudioCommand::PauseAll => self.paused = true,
            AudioCommand::UnpauseAll => self.paused = false,
            AudioCommand::StopAll => self.stop_all(),
        }
    }

    fn stop_all(&mut self) {
        for slot in &mut self.channels {
            *slot = None;
        }
        self.paused = false;
    }

    // Fill `out` with the mix of every sounding channel; silence while paused
    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        if self.paused {
            return; // positions are left where they are
        }
        for voice in self.channels.iter_mut().flatten() {
            voice.render_into(out);
        }
        for frame in out.iter_mut() {
            *frame = frame.clipped();
        }
    }

    #[cfg(test)]
    fn voice(&self, channel: usize) -> Option<&LoopVoice> {
        self.channels.get(channel).and_then(Option::as_ref)
    }
}
