//! Voice pipeline integration tests
//!
//! Tests voice components without requiring audio hardware

use std::io::Cursor;
use std::time::Duration;

use marcus::voice::{SAMPLE_RATE, SegmentEvent, SegmenterState, UtteranceSegmenter, samples_to_wav};

mod common;

/// Samples per capture poll (100 ms)
const CHUNK: usize = SAMPLE_RATE as usize / 10;

/// Generate sine wave audio samples
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate silence
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn generate_silence(duration_secs: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    vec![0.0; num_samples]
}

/// Feed audio in poll-sized chunks, returning the first non-pending event
fn feed(segmenter: &mut UtteranceSegmenter, audio: &[f32]) -> SegmentEvent {
    for chunk in audio.chunks(CHUNK) {
        let event = segmenter.process(chunk);
        if event != SegmentEvent::Pending {
            return event;
        }
    }
    SegmentEvent::Pending
}

fn segmenter() -> UtteranceSegmenter {
    UtteranceSegmenter::new(Duration::from_secs(5), Duration::from_secs(10))
}

#[test]
fn test_silence_is_no_activity() {
    let mut seg = segmenter();

    assert_eq!(feed(&mut seg, &generate_silence(1.0)), SegmentEvent::Pending);
    assert_eq!(seg.state(), SegmenterState::Waiting);
}

#[test]
fn test_speech_then_silence_completes_segment() {
    let mut seg = segmenter();

    assert_eq!(feed(&mut seg, &generate_sine_samples(440.0, 0.8, 0.3)), SegmentEvent::Pending);
    assert_eq!(seg.state(), SegmenterState::Speaking);

    match feed(&mut seg, &generate_silence(1.0)) {
        SegmentEvent::Complete(phrase) => {
            // The whole spoken part is in the phrase
            assert!(phrase.len() >= generate_sine_samples(440.0, 0.8, 0.3).len());
        }
        other => panic!("expected complete phrase, got {other:?}"),
    }
    assert_eq!(seg.state(), SegmenterState::Waiting);
}

#[test]
fn test_pause_inside_phrase_does_not_split_it() {
    let mut seg = segmenter();

    let mut audio = generate_sine_samples(440.0, 0.5, 0.3);
    audio.extend(generate_silence(0.3));
    audio.extend(generate_sine_samples(440.0, 0.5, 0.3));

    assert_eq!(feed(&mut seg, &audio), SegmentEvent::Pending);
    assert!(matches!(
        feed(&mut seg, &generate_silence(1.0)),
        SegmentEvent::Complete(phrase) if phrase.len() > audio.len()
    ));
}

#[test]
fn test_no_speech_before_deadline_times_out() {
    let mut seg = UtteranceSegmenter::new(Duration::from_secs(2), Duration::from_secs(10));

    assert_eq!(feed(&mut seg, &generate_silence(3.0)), SegmentEvent::NoSpeech);
    // The deadline restarts after a timeout
    assert_eq!(feed(&mut seg, &generate_silence(1.0)), SegmentEvent::Pending);
}

#[test]
fn test_overlong_phrase_is_rejected() {
    let mut seg = UtteranceSegmenter::new(Duration::from_secs(5), Duration::from_secs(2));

    assert_eq!(
        feed(&mut seg, &generate_sine_samples(440.0, 3.0, 0.3)),
        SegmentEvent::TooLong
    );
    assert_eq!(seg.state(), SegmenterState::Waiting);
}

#[test]
fn test_quiet_noise_is_not_speech() {
    let mut seg = segmenter();

    assert_eq!(
        feed(&mut seg, &generate_sine_samples(440.0, 1.0, 0.01)),
        SegmentEvent::Pending
    );
    assert_eq!(seg.state(), SegmenterState::Waiting);
}

#[test]
fn test_phrase_wav_for_transcription() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = samples_to_wav(&original_samples, SAMPLE_RATE).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(wav_data)).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.channels, 1);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
    assert_eq!(read_samples[3], i16::MAX);
}
