//! Voice pipeline integration tests
//!
//! Tests segmentation and WAV encoding without requiring audio hardware

use std::io::Cursor;

use podium::voice::{SAMPLE_RATE, SegmenterState, UtteranceSegmenter, encode_wav};

mod common;
use common::{silence, sine_samples};

#[test]
fn test_segmenter_starts_idle() {
    let segmenter = UtteranceSegmenter::new();

    assert_eq!(segmenter.state(), SegmenterState::Idle);
    assert!(!segmenter.is_listening());
    assert!(segmenter.speech_buffer().is_empty());
}

#[test]
fn test_silence_keeps_segmenter_idle() {
    let mut segmenter = UtteranceSegmenter::new();

    assert!(!segmenter.process(&silence(0.1)));
    assert_eq!(segmenter.state(), SegmenterState::Idle);
}

#[test]
fn test_speech_starts_listening() {
    let mut segmenter = UtteranceSegmenter::new();

    let speech = sine_samples(440.0, 0.5, 0.3);
    segmenter.process(&speech);
    assert_eq!(segmenter.state(), SegmenterState::Listening);
    assert!(segmenter.is_listening());
}

#[test]
fn test_speech_then_silence_completes_utterance() {
    let mut segmenter = UtteranceSegmenter::new();

    let speech = sine_samples(440.0, 0.5, 0.3);
    segmenter.process(&speech);

    let more_speech = sine_samples(440.0, 0.3, 0.3);
    segmenter.process(&more_speech);

    let complete = segmenter.process(&silence(0.6));
    assert!(complete);
}

#[test]
fn test_short_blip_does_not_complete() {
    let mut segmenter = UtteranceSegmenter::new();

    // 0.1s of speech is below the minimum utterance length
    segmenter.process(&sine_samples(440.0, 0.1, 0.3));
    let complete = segmenter.process(&silence(0.6));
    assert!(!complete);
}

#[test]
fn test_prolonged_silence_resets_without_utterance() {
    let mut segmenter = UtteranceSegmenter::new();

    // A blip too short to form an utterance starts the listening state
    segmenter.process(&sine_samples(440.0, 0.1, 0.3));
    assert!(segmenter.is_listening());

    // Past twice the end-of-utterance silence, the segmenter gives up and
    // returns to idle with nothing buffered
    let complete = segmenter.process(&silence(1.1));
    assert!(!complete);
    assert_eq!(segmenter.state(), SegmenterState::Idle);
    assert!(segmenter.speech_buffer().is_empty());
}

#[test]
fn test_speech_buffer_accumulates() {
    let mut segmenter = UtteranceSegmenter::new();

    let chunk1 = sine_samples(440.0, 0.1, 0.3);
    segmenter.process(&chunk1);

    let chunk2 = sine_samples(440.0, 0.1, 0.3);
    segmenter.process(&chunk2);

    let buffer = segmenter.speech_buffer();
    assert_eq!(buffer.len(), chunk1.len() + chunk2.len());
}

#[test]
fn test_take_utterance_resets() {
    let mut segmenter = UtteranceSegmenter::new();

    let speech = sine_samples(440.0, 0.2, 0.3);
    segmenter.process(&speech);

    let taken = segmenter.take_utterance();
    assert_eq!(taken.len(), speech.len());

    assert!(segmenter.speech_buffer().is_empty());
    assert_eq!(segmenter.state(), SegmenterState::Idle);
}

#[test]
fn test_segmenter_reset() {
    let mut segmenter = UtteranceSegmenter::new();

    segmenter.process(&sine_samples(440.0, 0.2, 0.3));
    assert!(segmenter.is_listening());

    segmenter.reset();
    assert_eq!(segmenter.state(), SegmenterState::Idle);
    assert!(segmenter.speech_buffer().is_empty());
}

#[test]
fn test_encode_wav() {
    let samples = sine_samples(440.0, 0.1, 0.5);
    let wav_data = encode_wav(&samples).unwrap();

    // Check WAV header magic
    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");

    // WAV should have reasonable size
    assert!(wav_data.len() > 44); // WAV header is 44 bytes
}

#[test]
fn test_wav_roundtrip() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = encode_wav(&original_samples).unwrap();

    let cursor = Cursor::new(wav_data);
    let mut reader = hound::WavReader::new(cursor).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.channels, 1);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
}
