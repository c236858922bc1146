//! Opening URLs and the browser with the platform's launcher

use std::process::{Command, Stdio};

use crate::{Error, Result};

/// YouTube home page
pub const YOUTUBE_URL: &str = "https://www.youtube.com";

/// Spoken when a launch fails
pub const FAILURE_MESSAGE: &str = "Sorry, I could not open that.";

/// Chrome executables tried in order on Unix-like systems
const CHROME_BINARIES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Launches external programs without waiting for them
#[derive(Debug, Clone, Copy, Default)]
pub struct Launcher;

#[allow(clippy::unused_self)]
impl Launcher {
    /// Open `url` in the default browser
    ///
    /// # Errors
    ///
    /// Returns error if no opener is available or it fails to start
    pub fn open_url(self, url: &str) -> Result<()> {
        let mut command = opener_command()?;
        command.arg(url);
        spawn(command, url)
    }

    /// Start Chrome
    ///
    /// # Errors
    ///
    /// Returns error if Chrome is not installed or fails to start
    pub fn open_chrome(self) -> Result<()> {
        spawn(chrome_command()?, "chrome")
    }
}

fn spawn(mut command: Command, what: &str) -> Result<()> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Launch(format!("{what}: {e}")))?;
    tracing::info!(what, "launched");
    Ok(())
}

fn opener_command() -> Result<Command> {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        return Ok(command);
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    let path = which::which(opener).map_err(|e| Error::Launch(format!("{opener}: {e}")))?;
    Ok(Command::new(path))
}

fn chrome_command() -> Result<Command> {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "chrome"]);
        return Ok(command);
    }

    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.args(["-a", "Google Chrome"]);
        return Ok(command);
    }

    CHROME_BINARIES
        .iter()
        .find_map(|name| which::which(name).ok())
        .map(Command::new)
        .ok_or_else(|| Error::Launch("chrome is not installed".into()))
}
