//! Business profile store
//!
//! A single JSON record gates ERP onboarding: if the file exists the user has
//! been onboarded, otherwise the six profile questions are asked once through
//! a [`Prompter`] and the answers are saved.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Business details collected on first ERP entry
///
/// Field names on disk follow the original `business_details.json` layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Business name
    #[serde(default)]
    pub name: String,

    /// Contact phone number
    #[serde(default)]
    pub phone: String,

    /// Street address
    #[serde(default)]
    pub address: String,

    /// Kind of business (retail, manufacturing, ...)
    #[serde(default, rename = "type")]
    pub business_type: String,

    /// Employee count, as spoken or typed
    #[serde(default, rename = "employees")]
    pub employee_count: String,

    /// Free-form additional information
    #[serde(default, rename = "additional_info")]
    pub notes: String,
}

/// Onboarding questions, in the order they are asked
pub const PROFILE_QUESTIONS: [&str; 6] = [
    "What is the name of your business?",
    "What is the phone number of your business?",
    "What is the address of your business?",
    "What type of business is it (e.g., retail, manufacturing, etc.)?",
    "How many employees does your business have?",
    "Please describe any additional relevant information about your business.",
];

/// Source of answers to interactive questions
pub trait Prompter {
    /// Ask a question and return the answer (empty answers are allowed)
    ///
    /// # Errors
    ///
    /// Returns error if the answer cannot be read
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompter that asks on the terminal via `dialoguer`
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        let answer: String = dialoguer::Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }
}

/// File-backed store for the single [`BusinessProfile`] record
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Create a store backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the record file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a profile has been stored (the "already onboarded" flag)
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the stored profile
    ///
    /// Returns `Ok(None)` if no profile has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(&self) -> Result<Option<BusinessProfile>> {
        if !self.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let profile: BusinessProfile = serde_json::from_str(&content).map_err(|e| {
            Error::Profile(format!(
                "failed to parse {}: {e}",
                self.path.display()
            ))
        })?;

        tracing::debug!(path = %self.path.display(), "loaded business profile");
        Ok(Some(profile))
    }

    /// Persist a profile, replacing any stored record
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn save(&self, profile: &BusinessProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(profile)?;
        std::fs::write(&self.path, json)?;

        tracing::info!(path = %self.path.display(), "saved business profile");
        Ok(())
    }

    /// Return the stored profile, onboarding through `prompter` if there is none
    ///
    /// Once a profile has been saved this never prompts again.
    ///
    /// # Errors
    ///
    /// Returns error if the record is unreadable, a prompt fails, or saving fails
    pub fn ensure<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<BusinessProfile> {
        if let Some(profile) = self.load()? {
            return Ok(profile);
        }

        tracing::info!("no business profile stored, starting onboarding");
        let profile = collect_profile(prompter)?;
        self.save(&profile)?;
        Ok(profile)
    }

    /// Delete the stored profile
    ///
    /// Returns `true` if a record was removed.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be removed
    pub fn remove(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        tracing::info!(path = %self.path.display(), "removed business profile");
        Ok(true)
    }
}

/// Ask the six onboarding questions in order
fn collect_profile<P: Prompter + ?Sized>(prompter: &mut P) -> Result<BusinessProfile> {
    let [name, phone, address, business_type, employee_count, notes] = PROFILE_QUESTIONS;

    Ok(BusinessProfile {
        name: prompter.ask(name)?,
        phone: prompter.ask(phone)?,
        address: prompter.ask(address)?,
        business_type: prompter.ask(business_type)?,
        employee_count: prompter.ask(employee_count)?,
        notes: prompter.ask(notes)?,
    })
}
