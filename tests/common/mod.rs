//! Shared test utilities

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use marcus::gateway::normalize_utterance;
use marcus::{
    BusinessProfile, Capabilities, Error, Gateway, ProfileStore, Prompter, Result, Shell,
    Transcript,
};

/// Tag the default assistant name puts in front of every response
pub const TAG: &str = "Marcus AI says: ";

/// One scripted listen cycle
#[derive(Debug, Clone)]
pub enum Step {
    /// The user says something
    Say(String),
    /// Nothing was heard
    Silence,
    /// Speech never started in time
    Timeout,
}

/// Gateway that replays a script and records everything spoken
///
/// Once the script is exhausted `listen` returns `Error::InputClosed`.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    steps: VecDeque<Step>,
    pub spoken: Vec<String>,
}

impl ScriptedGateway {
    /// Script of plain utterances
    pub fn new(utterances: &[&str]) -> Self {
        Self::from_steps(utterances.iter().map(|u| Step::Say((*u).to_string())).collect())
    }

    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            spoken: Vec::new(),
        }
    }

    /// Spoken lines with the assistant tag removed
    pub fn replies(&self) -> Vec<&str> {
        self.spoken
            .iter()
            .map(|line| line.strip_prefix(TAG).unwrap_or(line))
            .collect()
    }

    /// How many times `reply` was spoken
    pub fn count(&self, reply: &str) -> usize {
        self.replies().iter().filter(|r| **r == reply).count()
    }

    /// Steps not consumed yet
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Gateway for ScriptedGateway {
    fn listen(&mut self) -> Result<Option<String>> {
        match self.steps.pop_front() {
            Some(Step::Say(text)) => Ok(normalize_utterance(&text)),
            Some(Step::Silence) => Ok(None),
            Some(Step::Timeout) => Err(Error::RecognitionTimeout("no speech".into())),
            None => Err(Error::InputClosed),
        }
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.spoken.push(text.to_string());
        Ok(())
    }
}

/// Prompter with canned answers that counts the questions asked
#[derive(Debug, Clone, Default)]
pub struct CannedPrompter {
    answers: Vec<String>,
    asked: Rc<Cell<usize>>,
    fail: bool,
}

impl CannedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Prompter whose every question fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Shared counter of questions asked, readable after the prompter moves
    pub fn counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.asked)
    }
}

impl Prompter for CannedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        if self.fail {
            return Err(Error::Profile(format!("cannot ask: {question}")));
        }
        let index = self.asked.get();
        self.asked.set(index + 1);
        Ok(self.answers.get(index).cloned().unwrap_or_default())
    }
}

/// Capabilities that answer from memory and record launches
#[derive(Debug, Default)]
pub struct FakeCapabilities {
    /// Make every fallible capability fail
    pub fail: bool,
    pub opened: RefCell<Vec<String>>,
}

impl FakeCapabilities {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(Error::Service("offline".into()))
        } else {
            Ok(())
        }
    }
}

impl Capabilities for FakeCapabilities {
    fn translate(&self, text: &str, language: &str) -> Result<String> {
        self.check()?;
        Ok(format!("[{language}] {text}"))
    }

    fn weather(&self) -> Result<String> {
        self.check()?;
        Ok("The current weather in Delhi is clear sky with a temperature of 30°C.".into())
    }

    fn news(&self) -> Result<String> {
        self.check()?;
        Ok("Here are the top news headlines: a, b".into())
    }

    fn stocks(&self) -> Result<String> {
        self.check()?;
        Ok("^NSEI is at 100.00, up 1.00%.".into())
    }

    fn summarize(&self, text: &str) -> String {
        format!("summary of {text}")
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.check()?;
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn open_chrome(&self) -> Result<()> {
        self.check()?;
        self.opened.borrow_mut().push("chrome".into());
        Ok(())
    }
}

pub type TestShell = Shell<ScriptedGateway, CannedPrompter, FakeCapabilities>;

/// Six onboarding answers
pub const ANSWERS: [&str; 6] = [
    "Acme Traders",
    "555-0100",
    "1 Market Road",
    "retail",
    "12",
    "family owned",
];

/// Profile path inside a test directory
pub fn profile_store(dir: &Path) -> ProfileStore {
    ProfileStore::new(dir.join("business_details.json"))
}

/// Store a profile so ERP entry skips onboarding
pub fn store_profile(dir: &Path) {
    let profile = BusinessProfile {
        name: "Acme Traders".into(),
        ..BusinessProfile::default()
    };
    profile_store(dir).save(&profile).expect("failed to save profile");
}

/// Build a shell over a script, with its data files under `dir`
pub fn shell_with(
    dir: &Path,
    gateway: ScriptedGateway,
    prompter: CannedPrompter,
    capabilities: FakeCapabilities,
) -> TestShell {
    Shell::new(
        gateway,
        prompter,
        capabilities,
        profile_store(dir),
        Transcript::new(dir.join("spoken_responses.txt"), "Marcus AI"),
    )
}

/// Run a plain script to completion without the greeting
pub fn run_script(dir: &Path, utterances: &[&str]) -> TestShell {
    let mut shell = shell_with(
        dir,
        ScriptedGateway::new(utterances),
        CannedPrompter::new(&ANSWERS),
        FakeCapabilities::default(),
    );
    shell.run(false).expect("shell run failed");
    shell
}
