//! Marcus - voice-driven command shell for small businesses
//!
//! Listens for spoken (or typed) commands, routes them by keyword, and
//! answers out loud:
//! - General utilities (math, translation, weather, news, stocks, jokes)
//! - Business modes (ERP, FinTech, Personal AI, Healthcare Robot), each with
//!   its own vocabulary
//! - First-run business profile onboarding for ERP
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     Gateways                         │
//! │        Voice (mic → STT, TTS → speaker)  │  Console  │
//! └────────────────────┬────────────────────────────────┘
//!                      │ utterance
//! ┌────────────────────▼────────────────────────────────┐
//! │                      Shell                           │
//! │   Router  │  Session (modes)  │  Profile  │  Log    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Providers                          │
//! │  Math │ Translate │ Weather │ News │ Stocks │ ...   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod providers;
pub mod router;
pub mod session;
pub mod setup;
pub mod shell;
pub mod transcript;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{ConsoleGateway, ConsolePrompter, Gateway, VoiceGateway};
pub use profile::{BusinessProfile, ProfileStore, Prompter, TerminalPrompter};
pub use providers::{Capabilities, LiveCapabilities};
pub use router::{CommandTable, Outcome, route, strip_keyword};
pub use session::{Mode, ModeAction, Session, SessionState};
pub use shell::{Command, Flow, ModeFlow, Shell};
pub use transcript::Transcript;
