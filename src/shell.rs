//! The conversational shell
//!
//! Listens through a [`Gateway`], routes each utterance against the active
//! vocabulary, and speaks the reply. Every reply is tagged with the assistant
//! name and appended to the transcript before it reaches the gateway.

use crate::config::DEFAULT_SITE_URL;
use crate::gateway::Gateway;
use crate::profile::{ProfileStore, Prompter};
use crate::providers::clock::{self, TimeQuery};
use crate::providers::launcher::{self, YOUTUBE_URL};
use crate::providers::{self, Capabilities, joke};
use crate::router::CommandTable;
use crate::session::{
    ERP_ALREADY_IN_USE, ERP_ONBOARDING, ERP_WELCOME, Mode, ModeAction, NOT_RECOGNIZED,
    PROFILE_FAILURE, Session,
};
use crate::transcript::Transcript;
use crate::{Error, Result};

/// Spoken on the deprecated Wikipedia command
pub const WIKIPEDIA_DEPRECATED: &str = "Wikipedia search is no longer supported.";

/// Spoken after the greeting
pub const ASSIST_PROMPT: &str = "How can I assist you today?";

/// Spoken on the top-level exit
pub const EXIT_MESSAGE: &str = "Exiting...";

/// Top-level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenYoutube,
    OpenChrome,
    Exit,
    OpenSite,
    StockMarketUpdate,
    Translate,
    Joke,
    Solve,
    Summarize,
    AnalyzeDream,
    SearchWikipedia,
    StartMode(Mode),
    WeatherUpdate,
    NewsUpdate,
    Clock(TimeQuery),
}

/// The top-level vocabulary in priority order
#[must_use]
pub fn top_level_commands() -> CommandTable<Command> {
    CommandTable::new()
        .with("open youtube", Command::OpenYoutube)
        .with("open chrome", Command::OpenChrome)
        .with("exit", Command::Exit)
        .with("open site", Command::OpenSite)
        .with("stock market update", Command::StockMarketUpdate)
        .with("translate", Command::Translate)
        .with("tell me a joke", Command::Joke)
        .with("solve", Command::Solve)
        .with("summarize", Command::Summarize)
        .with("analyze my dream", Command::AnalyzeDream)
        .with("search wikipedia for", Command::SearchWikipedia)
        .with("start erp", Command::StartMode(Mode::Erp))
        .with("start fintech", Command::StartMode(Mode::FinTech))
        .with("start personal ai", Command::StartMode(Mode::PersonalAi))
        .with("start healthcare robot", Command::StartMode(Mode::HealthcareRobot))
        .with("weather update", Command::WeatherUpdate)
        .with("news update", Command::NewsUpdate)
        .with("what time is it", Command::Clock(TimeQuery::Time))
        .with("what day is it", Command::Clock(TimeQuery::Day))
        .with("what is the date", Command::Clock(TimeQuery::Date))
        .with("what year is it", Command::Clock(TimeQuery::Year))
}

/// What the top-level loop does next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What a mode loop does next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlow {
    Stay,
    Leave,
}

/// Conversational shell over a gateway, profile prompter and capabilities
pub struct Shell<G, P, C> {
    gateway: G,
    prompter: P,
    capabilities: C,
    profile: ProfileStore,
    transcript: Transcript,
    session: Session,
    commands: CommandTable<Command>,
    site_url: String,
}

impl<G: Gateway, P: Prompter, C: Capabilities> Shell<G, P, C> {
    /// Create a shell with a fresh idle session
    #[must_use]
    pub fn new(
        gateway: G,
        prompter: P,
        capabilities: C,
        profile: ProfileStore,
        transcript: Transcript,
    ) -> Self {
        Self {
            gateway,
            prompter,
            capabilities,
            profile,
            transcript,
            session: Session::new(),
            commands: top_level_commands(),
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }

    /// Set the URL opened by "open site"
    #[must_use]
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = url.into();
        self
    }

    /// Session context
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The gateway
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The capabilities
    #[must_use]
    pub const fn capabilities(&self) -> &C {
        &self.capabilities
    }

    /// Run until the top-level exit or the end of input
    ///
    /// # Errors
    ///
    /// Returns error on a fatal gateway failure
    pub fn run(&mut self, greet: bool) -> Result<()> {
        let result = self.run_inner(greet);
        match result {
            Err(Error::InputClosed) => {
                tracing::info!("input closed, shutting down");
                Ok(())
            }
            other => other,
        }
    }

    fn run_inner(&mut self, greet: bool) -> Result<()> {
        if greet {
            self.greet()?;
        }

        loop {
            let Some(utterance) = self.listen()? else {
                continue;
            };
            if self.handle_command(&utterance)? == Flow::Exit {
                tracing::info!("exit requested");
                return Ok(());
            }
        }
    }

    /// Speak the time-of-day greeting and the assist prompt
    ///
    /// # Errors
    ///
    /// Returns error on a fatal gateway failure
    pub fn greet(&mut self) -> Result<()> {
        self.speak(clock::greeting())?;
        self.speak(ASSIST_PROMPT)
    }

    /// Tag, record and speak a response
    ///
    /// Synthesis and device failures are logged; the text is already in the
    /// transcript.
    ///
    /// # Errors
    ///
    /// Returns error if the gateway fails for any other reason
    pub fn speak(&mut self, text: &str) -> Result<()> {
        let tagged = self.transcript.tagged(text);
        if let Err(e) = self.transcript.record_response(&tagged) {
            tracing::warn!(error = %e, "failed to append response to transcript");
        }

        match self.gateway.speak(&tagged) {
            Err(e @ (Error::Tts(_) | Error::Audio(_) | Error::Http(_))) => {
                tracing::warn!(error = %e, "speech output failed");
                Ok(())
            }
            other => other,
        }
    }

    /// Capture one utterance
    ///
    /// Timeouts and recognition failures count as "no command".
    ///
    /// # Errors
    ///
    /// Returns `Error::InputClosed` at end of input, or any fatal failure
    pub fn listen(&mut self) -> Result<Option<String>> {
        match self.gateway.listen() {
            Ok(Some(utterance)) => {
                if let Err(e) = self.transcript.record_user(&utterance) {
                    tracing::warn!(error = %e, "failed to append utterance to transcript");
                }
                Ok(Some(utterance))
            }
            Ok(None) => Ok(None),
            Err(e) if e.is_recoverable_listen() => {
                tracing::debug!(error = %e, "no command this cycle");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Dispatch one utterance against the top-level vocabulary
    ///
    /// Mode commands block in the mode's loop until it is left.
    ///
    /// # Errors
    ///
    /// Returns error on a fatal gateway failure
    pub fn handle_command(&mut self, utterance: &str) -> Result<Flow> {
        let Some(command) = self.commands.route(utterance).handler().copied() else {
            tracing::debug!(utterance, "no top-level match");
            self.speak(providers::FALLBACK_MESSAGE)?;
            return Ok(Flow::Continue);
        };

        tracing::debug!(?command, "dispatching");
        let caps = &self.capabilities;
        let reply = match command {
            Command::Exit => {
                self.speak(EXIT_MESSAGE)?;
                return Ok(Flow::Exit);
            }
            Command::StartMode(mode) => {
                self.enter_mode(mode)?;
                return Ok(Flow::Continue);
            }
            Command::OpenYoutube => {
                providers::handle_open(caps, YOUTUBE_URL, "Opening YouTube.".to_string())
            }
            Command::OpenChrome => match caps.open_chrome() {
                Ok(()) => "Opening Chrome.".to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, "chrome launch failed");
                    launcher::FAILURE_MESSAGE.to_string()
                }
            },
            Command::OpenSite => providers::handle_open(
                caps,
                &self.site_url,
                format!("Opening the site: {}", self.site_url),
            ),
            Command::StockMarketUpdate => providers::handle_stock_update(caps),
            Command::Translate => providers::handle_translation(utterance, caps),
            Command::Joke => joke::tell_joke().to_string(),
            Command::Solve => providers::handle_math(utterance),
            Command::Summarize => providers::handle_summarization(utterance, caps),
            Command::AnalyzeDream => providers::handle_dream_analysis(utterance),
            Command::SearchWikipedia => WIKIPEDIA_DEPRECATED.to_string(),
            Command::WeatherUpdate => providers::handle_weather(caps),
            Command::NewsUpdate => providers::handle_news(caps),
            Command::Clock(query) => clock::describe_now(query),
        };

        self.speak(&reply)?;
        Ok(Flow::Continue)
    }

    /// Enter a mode and run its loop until the user leaves
    ///
    /// # Errors
    ///
    /// Returns error on a fatal gateway failure
    pub fn enter_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == Mode::Erp {
            if !self.open_erp()? {
                return Ok(());
            }
        } else {
            self.speak(mode.welcome())?;
        }

        self.session.enter(mode);
        let table = mode.table();
        loop {
            let Some(utterance) = self.listen()? else {
                continue;
            };
            if self.handle_mode_command(mode, &table, &utterance)? == ModeFlow::Leave {
                return Ok(());
            }
        }
    }

    /// Onboard or welcome on ERP entry; `false` keeps the session idle
    fn open_erp(&mut self) -> Result<bool> {
        if self.session.erp_system_used() {
            self.speak(ERP_ALREADY_IN_USE)?;
            return Ok(true);
        }

        if !self.profile.exists() {
            self.speak(ERP_ONBOARDING)?;
        }

        match self.profile.ensure(&mut self.prompter) {
            Ok(profile) => {
                tracing::info!(business = %profile.name, "business profile ready");
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %self.profile.path().display(),
                    "business profile unavailable"
                );
                self.speak(PROFILE_FAILURE)?;
                return Ok(false);
            }
        }

        self.speak(ERP_WELCOME)?;
        self.session.mark_erp_used();
        Ok(true)
    }

    /// Dispatch one utterance against a mode's vocabulary
    ///
    /// `table` is the mode's table, built once when the mode is entered.
    ///
    /// # Errors
    ///
    /// Returns error on a fatal gateway failure
    pub fn handle_mode_command(
        &mut self,
        mode: Mode,
        table: &CommandTable<ModeAction>,
        utterance: &str,
    ) -> Result<ModeFlow> {
        let Some(action) = table.route(utterance).handler().copied() else {
            tracing::debug!(mode = %mode, utterance, "no mode match");
            self.speak(NOT_RECOGNIZED)?;
            return Ok(ModeFlow::Stay);
        };

        match action {
            ModeAction::Leave => {
                self.speak(&mode.farewell())?;
                self.session.leave();
                return Ok(ModeFlow::Leave);
            }
            ModeAction::Acknowledge(reply) => self.speak(reply)?,
            ModeAction::OpenSite => {
                let reply = providers::handle_open(
                    &self.capabilities,
                    &self.site_url,
                    format!("Opening the site: {}", self.site_url),
                );
                self.speak(&reply)?;
            }
        }
        Ok(ModeFlow::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_order() {
        let table = top_level_commands();
        assert_eq!(table.len(), 21);
        assert_eq!(table.keywords().next(), Some("open youtube"));

        // "exit" outranks later keywords in the same utterance
        assert_eq!(
            table.route("solve this then exit").handler(),
            Some(&Command::Exit)
        );
        assert_eq!(
            table.route("translate open site into french").handler(),
            Some(&Command::OpenSite)
        );
    }

    #[test]
    fn test_mode_and_clock_routing() {
        let table = top_level_commands();
        assert_eq!(
            table.route("start healthcare robot").handler(),
            Some(&Command::StartMode(Mode::HealthcareRobot))
        );
        assert_eq!(
            table.route("hey what year is it").handler(),
            Some(&Command::Clock(TimeQuery::Year))
        );
        assert!(!table.route("sing a song").is_matched());
    }
}
