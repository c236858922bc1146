//! Append-only conversation transcript

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;

/// Appends every utterance and spoken response to a UTF-8 text file
///
/// The file is opened in append mode for each write and is never truncated.
#[derive(Debug, Clone)]
pub struct Transcript {
    path: Option<PathBuf>,
    assistant_name: String,
}

impl Transcript {
    /// Create a transcript writing to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, assistant_name: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            assistant_name: assistant_name.into(),
        }
    }

    /// Create a transcript that only formats lines and writes nothing
    #[must_use]
    pub fn disabled(assistant_name: impl Into<String>) -> Self {
        Self {
            path: None,
            assistant_name: assistant_name.into(),
        }
    }

    /// Path of the transcript file, if writing is enabled
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The tag every spoken response carries, e.g. "Marcus AI says: "
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{} says: ", self.assistant_name)
    }

    /// Prefix a response with the assistant tag
    #[must_use]
    pub fn tagged(&self, text: &str) -> String {
        format!("{}{text}", self.tag())
    }

    /// Record a recognized user utterance
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be appended to
    pub fn record_user(&self, utterance: &str) -> Result<()> {
        self.append(&format!("User: {utterance}"))
    }

    /// Record an already-tagged assistant response
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be appended to
    pub fn record_response(&self, tagged: &str) -> Result<()> {
        self.append(tagged)
    }

    fn append(&self, line: &str) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
