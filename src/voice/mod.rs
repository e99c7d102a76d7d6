//! Voice processing module
//!
//! Handles microphone capture and utterance segmentation. Captured
//! utterances are encoded as WAV and handed to the intent client
//! (see `daemon.rs`).

mod capture;
mod segmenter;

pub use capture::{AudioCapture, CHUNK_SIZE, SAMPLE_RATE, encode_wav};
pub use segmenter::{SegmenterState, UtteranceSegmenter, rms_energy};
