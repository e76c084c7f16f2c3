use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};

use crate::audio_api::AudioCommand;

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;

use engine::Engine;

// frames rendered per pass; bigger host buffers are filled in several passes
const SCRATCH_FRAMES: usize = 8192;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) {
        if let Err(e) = self.tx.try_send(cmd) {
            log::warn!("audio command dropped: {e}");
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let supported = device.default_output_config().context("no default output config")?;

    let sample_rate = supported.sample_rate();
    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();
    log::info!(
        "audio output: {} Hz, {} channel(s), {:?}",
        sample_rate, config.channels, sample_format
    );

    let output_stream = match sample_format {
        cpal::SampleFormat::F32 => build_output_stream::<f32>(&device, &config, rx)?,
        cpal::SampleFormat::I16 => build_output_stream::<i16>(&device, &config, rx)?,
        cpal::SampleFormat::U16 => build_output_stream::<u16>(&device, &config, rx)?,
        other => anyhow::bail!("unsupported sample format {other:?}"),
    };
    output_stream.play().context("failed to play output stream")?;

    Ok(AudioHandle {
        tx,
        sample_rate,
        _output_stream: output_stream,
    })
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
) -> anyhow::Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = (config.channels as usize).max(1);
    let mut engine = Engine::new();
    let mut scratch: Vec<StereoFrame> = vec![StereoFrame::zero(); SCRATCH_FRAMES];

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            render_output(&mut engine, &mut scratch, data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// Fill one host buffer in scratch-sized passes; nothing here allocates
fn render_output<T>(engine: &mut Engine, scratch: &mut [StereoFrame], data: &mut [T], channels: usize)
where
    T: SizedSample + FromSample<f32>,
{
    if scratch.is_empty() {
        return;
    }
    for chunk in data.chunks_mut(scratch.len() * channels) {
        let frames = &mut scratch[..chunk.len() / channels];
        engine.render_block(frames);
        write_interleaved(chunk, frames, channels);
    }
}

// Spread stereo frames over the device's channel layout
fn write_interleaved<T>(data: &mut [T], frames: &[StereoFrame], channels: usize)
where
    T: SizedSample + FromSample<f32>,
{
    if channels == 0 {
        return;
    }
    for (out, f) in data.chunks_exact_mut(channels).zip(frames) {
        if channels == 1 {
            out[0] = T::from_sample((f.left + f.right) * 0.5);
            continue;
        }
        out[0] = T::from_sample(f.left);
        out[1] = T::from_sample(f.right);
        for extra in &mut out[2..] {
            *extra = T::from_sample(0.0f32);
        }
    }
}
