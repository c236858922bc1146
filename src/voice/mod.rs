//! Voice processing module
//!
//! Handles audio capture, phrase segmentation, Whisper STT, `OpenAI` TTS and
//! playback. Everything here blocks the calling thread.

mod capture;
mod playback;
mod segmenter;
mod stt;
mod tts;

pub use capture::{AudioCapture, SAMPLE_RATE, SampleSource, rms, samples_to_wav};
pub use playback::AudioPlayback;
pub use segmenter::{SegmentEvent, SegmenterState, UtteranceSegmenter};
pub use stt::SpeechToText;
pub use tts::TextToSpeech;
