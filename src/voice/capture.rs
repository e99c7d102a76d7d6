//! Microphone input for the voice pipeline

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};

use crate::{Error, Result};

/// Capture sample rate; utterance audio is uploaded as 16kHz mono PCM
pub const SAMPLE_RATE: u32 = 16000;

/// Samples per processing chunk (100ms at 16kHz)
pub const CHUNK_SIZE: usize = 1600;

/// Running microphone capture
///
/// Opening a capture starts the input stream immediately; samples accumulate
/// in a shared buffer until drained. Dropping the capture stops the stream.
pub struct AudioCapture {
    buffer: Arc<Mutex<Vec<f32>>>,
    _stream: Stream,
}

impl AudioCapture {
    /// Open the default input device and start capturing
    ///
    /// # Errors
    ///
    /// Returns error if there is no input device, none of its configurations
    /// supports 16kHz mono, or the stream fails to start
    pub fn open() -> Result<Self> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or_else(|| Error::Audio("no microphone found".to_string()))?;

        let config = input_config(&device)?;
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend_from_slice(data);
                    }
                },
                |err| tracing::error!(error = %err, "microphone stream error"),
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = SAMPLE_RATE,
            channels = config.channels,
            "microphone capture started"
        );

        Ok(Self {
            buffer,
            _stream: stream,
        })
    }

    /// Drain all samples captured since the last drain
    #[must_use]
    pub fn drain(&self) -> Vec<f32> {
        self.buffer
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default()
    }

    /// Drain only once at least one full processing chunk is buffered
    ///
    /// Sub-chunk remainders stay buffered so the segmenter always sees
    /// stretches long enough for a meaningful energy reading.
    #[must_use]
    pub fn drain_chunk(&self) -> Option<Vec<f32>> {
        let mut buf = self.buffer.lock().ok()?;
        if buf.len() < CHUNK_SIZE {
            return None;
        }
        Some(std::mem::take(&mut *buf))
    }
}

/// Find a 16kHz mono input configuration on the device
fn input_config(device: &Device) -> Result<StreamConfig> {
    let supported = device
        .supported_input_configs()
        .map_err(|e| Error::Audio(e.to_string()))?
        .find(|c| {
            c.channels() == 1
                && c.min_sample_rate() <= SampleRate(SAMPLE_RATE)
                && c.max_sample_rate() >= SampleRate(SAMPLE_RATE)
        })
        .ok_or_else(|| Error::Audio("microphone does not support 16kHz mono".to_string()))?;

    Ok(supported.with_sample_rate(SampleRate(SAMPLE_RATE)).config())
}

/// Encode an utterance as 16kHz 16-bit mono PCM WAV for upload
///
/// # Errors
///
/// Returns error if WAV encoding fails
pub fn encode_wav(samples: &[f32]) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut out = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut out, spec).map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            #[allow(clippy::cast_possible_truncation)]
            let pcm = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(pcm)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(out.into_inner())
}
