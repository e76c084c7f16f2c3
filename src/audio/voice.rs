use std::sync::Arc;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

// One mixer channel: a buffer that loops forever at a given gain
#[derive(Clone, Debug)]
pub struct LoopVoice {
    buffer: Arc<SampleBuffer>,
    pos: usize,
    gain: f32,        // gain reached at the end of the last rendered block
    target_gain: f32, // what the ui last asked for
}

impl LoopVoice {
    pub fn new(buffer: Arc<SampleBuffer>, gain: f32) -> Self {
        let gain = gain.clamp(0.0, 1.0);
        Self {
            buffer,
            pos: 0,
            gain,
            target_gain: gain,
        }
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.target_gain = gain.clamp(0.0, 1.0);
    }

    #[cfg(test)]
    pub fn gain(&self) -> f32 {
        self.target_gain
    }

    #[cfg(test)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn render_into(&mut self, out: &mut [StereoFrame]) {
        let data = &self.buffer.data;
        if data.is_empty() || out.is_empty() {
            return;
        }

        // ramp gain changes across the block so slider moves don't click
        let start = self.gain;
        let end = self.target_gain;
        let step = 1.0 / out.len() as f32;

        for (i, frame) in out.iter_mut().enumerate() {
            let g = if start == end { end } else { lerp(start, end, (i + 1) as f32 * step) };
            let s = data[self.pos];
            frame.left += s.left * g;
            frame.right += s.right * g;

            self.pos += 1;
            if self.pos >= data.len() {
                self.pos = 0; // loop forever
            }
        }
        self.gain = end;
    }
}
