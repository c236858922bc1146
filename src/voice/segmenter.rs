//! Utterance segmentation
//!
//! Splits a microphone stream into one spoken phrase using local energy
//! detection, with bounds on how long to wait for speech to start and how
//! long a phrase may run.

use std::time::Duration;

use super::capture::{SAMPLE_RATE, rms};

/// Minimum audio energy threshold to consider speech
const ENERGY_THRESHOLD: f32 = 0.03;

/// Minimum voiced audio to count as a phrase (in samples at 16kHz)
const MIN_SPEECH_SAMPLES: usize = 4800; // 0.3 seconds

/// Silence duration to consider end of utterance (in samples)
const SILENCE_SAMPLES: usize = 8000; // 0.5 seconds

/// State of the segmenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    /// Waiting for speech to start
    Waiting,
    /// Speech started, accumulating the phrase
    Speaking,
}

/// What a chunk of audio did to the current phrase
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentEvent {
    /// Keep feeding audio
    Pending,
    /// A full phrase followed by silence
    Complete(Vec<f32>),
    /// Nothing was said before the listen timeout
    NoSpeech,
    /// The phrase ran past the phrase limit
    TooLong,
}

/// Energy-based phrase segmenter
#[derive(Debug)]
pub struct UtteranceSegmenter {
    state: SegmenterState,
    speech_buffer: Vec<f32>,
    silence_counter: usize,
    voiced: usize,
    waited: usize,
    listen_timeout: usize,
    phrase_limit: usize,
}

impl UtteranceSegmenter {
    /// Create a segmenter with the given listen timeout and phrase limit
    #[must_use]
    pub fn new(listen_timeout: Duration, phrase_limit: Duration) -> Self {
        Self {
            state: SegmenterState::Waiting,
            speech_buffer: Vec::new(),
            silence_counter: 0,
            voiced: 0,
            waited: 0,
            listen_timeout: duration_to_samples(listen_timeout),
            phrase_limit: duration_to_samples(phrase_limit),
        }
    }

    /// Feed captured samples
    pub fn process(&mut self, samples: &[f32]) -> SegmentEvent {
        let energy = rms(samples);
        let is_speech = energy > ENERGY_THRESHOLD;

        match self.state {
            SegmenterState::Waiting => {
                if is_speech {
                    self.state = SegmenterState::Speaking;
                    self.speech_buffer.clear();
                    self.speech_buffer.extend_from_slice(samples);
                    self.silence_counter = 0;
                    self.voiced = samples.len();
                    tracing::trace!(energy, "speech started");
                    return SegmentEvent::Pending;
                }

                self.waited += samples.len();
                if self.waited > self.listen_timeout {
                    tracing::debug!("no speech before listen timeout");
                    self.reset();
                    return SegmentEvent::NoSpeech;
                }
            }
            SegmenterState::Speaking => {
                self.speech_buffer.extend_from_slice(samples);

                if is_speech {
                    self.silence_counter = 0;
                    self.voiced += samples.len();
                } else {
                    self.silence_counter += samples.len();
                }

                if self.silence_counter > SILENCE_SAMPLES {
                    if self.voiced > MIN_SPEECH_SAMPLES {
                        tracing::debug!(samples = self.speech_buffer.len(), "phrase complete");
                        let phrase = std::mem::take(&mut self.speech_buffer);
                        self.reset();
                        return SegmentEvent::Complete(phrase);
                    }

                    // A short blip followed by silence: go back to waiting
                    tracing::trace!(voiced = self.voiced, "blip discarded");
                    self.waited += self.speech_buffer.len();
                    self.state = SegmenterState::Waiting;
                    self.speech_buffer.clear();
                    self.silence_counter = 0;
                    self.voiced = 0;
                    return SegmentEvent::Pending;
                }

                if self.speech_buffer.len() > self.phrase_limit {
                    tracing::debug!(samples = self.speech_buffer.len(), "phrase too long");
                    self.reset();
                    return SegmentEvent::TooLong;
                }
            }
        }

        SegmentEvent::Pending
    }

    /// Reset to waiting with a fresh listen timeout
    pub fn reset(&mut self) {
        self.state = SegmenterState::Waiting;
        self.speech_buffer.clear();
        self.silence_counter = 0;
        self.voiced = 0;
        self.waited = 0;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> SegmenterState {
        self.state
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_to_samples(duration: Duration) -> usize {
    (duration.as_millis() * u128::from(SAMPLE_RATE) / 1000) as usize
}
