//! Microphone and speaker gateway

use std::time::{Duration, Instant};

use super::{Gateway, normalize_utterance};
use crate::config::{ApiKeys, VoiceConfig};
use crate::voice::{
    AudioCapture, AudioPlayback, SAMPLE_RATE, SampleSource, SegmentEvent, SpeechToText,
    TextToSpeech, UtteranceSegmenter, samples_to_wav,
};
use crate::{Error, Result};

/// How often the capture buffer is drained
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Listens on the default microphone and speaks through the default output
pub struct VoiceGateway {
    capture: AudioCapture,
    playback: AudioPlayback,
    stt: SpeechToText,
    tts: TextToSpeech,
    segmenter: UtteranceSegmenter,
    deadline: Duration,
}

impl VoiceGateway {
    /// Open audio devices and STT/TTS clients
    ///
    /// # Errors
    ///
    /// Returns error if an audio device is unavailable or the `OpenAI` key is missing
    pub fn new(voice: &VoiceConfig, api_keys: &ApiKeys) -> Result<Self> {
        let api_key = api_keys.openai.clone().ok_or_else(|| {
            Error::Config("OPENAI_API_KEY is required for voice mode (or run with --text)".into())
        })?;

        let stt = SpeechToText::new_whisper(api_key.clone(), voice.stt_model.clone())?;
        let tts = TextToSpeech::new_openai(
            api_key,
            voice.tts_model.clone(),
            voice.tts_voice.clone(),
            voice.tts_speed,
        )?;

        let mut capture = AudioCapture::new()?;
        capture.start()?;
        let playback = AudioPlayback::new()?;

        tracing::info!(
            stt_model = %voice.stt_model,
            tts_model = %voice.tts_model,
            "voice gateway ready"
        );

        Ok(Self {
            capture,
            playback,
            stt,
            tts,
            segmenter: UtteranceSegmenter::new(voice.listen_timeout, voice.phrase_limit),
            deadline: voice.listen_timeout + voice.phrase_limit,
        })
    }
}

/// Block until a phrase is captured or a timeout fires
///
/// `deadline` bounds the whole call by wall clock, so a stalled input
/// stream that delivers no samples still ends in a timeout.
///
/// # Errors
///
/// Returns `Error::RecognitionTimeout` when no phrase is captured in time
pub fn capture_phrase<S: SampleSource + ?Sized>(
    source: &mut S,
    segmenter: &mut UtteranceSegmenter,
    poll: Duration,
    deadline: Duration,
) -> Result<Vec<f32>> {
    segmenter.reset();
    // Drop anything recorded while we were speaking
    source.discard();
    let started = Instant::now();

    loop {
        if started.elapsed() > deadline {
            tracing::warn!(?deadline, "listen deadline passed");
            return Err(Error::RecognitionTimeout(
                "no phrase captured before the listen deadline".into(),
            ));
        }

        std::thread::sleep(poll);
        let chunk = source.take_samples();
        if chunk.is_empty() {
            continue;
        }

        match segmenter.process(&chunk) {
            SegmentEvent::Pending => {}
            SegmentEvent::Complete(phrase) => return Ok(phrase),
            SegmentEvent::NoSpeech => {
                return Err(Error::RecognitionTimeout(
                    "listening timed out while waiting for phrase to start".into(),
                ));
            }
            SegmentEvent::TooLong => {
                return Err(Error::RecognitionTimeout("phrase exceeded time limit".into()));
            }
        }
    }
}

impl Gateway for VoiceGateway {
    fn listen(&mut self) -> Result<Option<String>> {
        println!("Listening...");
        let phrase = capture_phrase(
            &mut self.capture,
            &mut self.segmenter,
            POLL_INTERVAL,
            self.deadline,
        )?;

        let wav = samples_to_wav(&phrase, SAMPLE_RATE)?;
        let text = self.stt.transcribe(&wav)?;

        let utterance = normalize_utterance(&text);
        match &utterance {
            Some(text) => println!("You said: {text}"),
            None => tracing::info!("could not understand audio"),
        }
        Ok(utterance)
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        let audio = self.tts.synthesize(text)?;
        self.playback.play_mp3(&audio)
    }
}
