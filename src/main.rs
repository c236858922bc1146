use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marcus::voice::{AudioCapture, AudioPlayback, TextToSpeech, rms};
use marcus::{
    Config, ConsoleGateway, Gateway, LiveCapabilities, ProfileStore, Prompter, Shell,
    TerminalPrompter, Transcript, VoiceGateway,
};

/// Marcus - voice-driven command shell for small businesses
#[derive(Parser)]
#[command(name = "marcus", version, about)]
struct Cli {
    /// Type commands instead of speaking them
    #[arg(
        long,
        env = "MARCUS_TEXT_MODE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    text: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Skip the time-of-day greeting
    #[arg(long)]
    no_greeting: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive first-run setup
    Setup,
    /// Inspect or reset the stored business profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored business profile
    Show,
    /// Delete the stored business profile so ERP onboarding runs again
    Reset,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so console dialogue on stdout stays readable
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,marcus=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Setup => marcus::setup::run_setup(),
            Command::Profile { action } => profile_command(&action),
            Command::TestMic { duration } => test_mic(duration),
            Command::TestTts { text } => test_tts(&text),
        };
    }

    let config = Config::load();
    tracing::debug!(?config, "loaded configuration");

    let text_mode = cli.text || !config.voice.enabled;
    let greet = !cli.no_greeting;

    if text_mode {
        tracing::info!("starting in text mode");
        // Onboarding answers are read from the same buffered input as commands
        let gateway = ConsoleGateway::stdio();
        let prompter = gateway.prompter();
        run_shell(gateway, prompter, &config, greet)
    } else {
        tracing::info!("starting in voice mode");
        let gateway = VoiceGateway::new(&config.voice, &config.api_keys)?;
        run_shell(gateway, TerminalPrompter, &config, greet)
    }
}

fn run_shell<G: Gateway, P: Prompter>(
    gateway: G,
    prompter: P,
    config: &Config,
    greet: bool,
) -> anyhow::Result<()> {
    let capabilities = LiveCapabilities::from_config(config)?;
    let profile = ProfileStore::new(&config.profile_path);
    let transcript = Transcript::new(&config.transcript_path, &config.assistant_name);

    tracing::info!(
        profile = %config.profile_path.display(),
        transcript = %config.transcript_path.display(),
        "shell ready"
    );

    let mut shell = Shell::new(gateway, prompter, capabilities, profile, transcript)
        .with_site_url(&config.site_url);
    shell.run(greet)?;
    Ok(())
}

fn profile_command(action: &ProfileAction) -> anyhow::Result<()> {
    let config = Config::load();
    let store = ProfileStore::new(&config.profile_path);

    match action {
        ProfileAction::Show => match store.load()? {
            Some(profile) => {
                println!("Business profile ({})\n", store.path().display());
                println!("  Name:       {}", profile.name);
                println!("  Phone:      {}", profile.phone);
                println!("  Address:    {}", profile.address);
                println!("  Type:       {}", profile.business_type);
                println!("  Employees:  {}", profile.employee_count);
                println!("  Notes:      {}", profile.notes);
            }
            None => println!(
                "No business profile stored at {}. Say \"start erp\" to create one.",
                store.path().display()
            ),
        },
        ProfileAction::Reset => {
            if store.remove()? {
                println!("Removed {}", store.path().display());
            } else {
                println!("No business profile to remove");
            }
        }
    }

    Ok(())
}

fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    println!("Sample rate: {} Hz", capture.sample_rate());
    println!("---");

    for i in 0..duration {
        std::thread::sleep(Duration::from_secs(1));

        let samples = capture.take_buffer();
        let energy = rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        // Visual meter
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!(
            "[{:2}s] RMS: {:.4} | Peak: {:.4} | [{}]",
            i + 1,
            energy,
            peak,
            meter
        );
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");
    println!("If RMS stayed near 0, check:");
    println!("  1. Is your mic plugged in?");
    println!("  2. Run: arecord -l (to list devices)");
    println!("  3. Try: pavucontrol (to check levels)");

    Ok(())
}

fn test_tts(text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let config = Config::load();
    let api_key = config
        .api_keys
        .openai
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is required for TTS"))?;

    let tts = TextToSpeech::new_openai(
        api_key,
        config.voice.tts_model.clone(),
        config.voice.tts_voice.clone(),
        config.voice.tts_speed,
    )?;

    println!("Synthesizing speech...");
    let mp3_data = tts.synthesize(text)?;
    println!("Got {} bytes of audio data", mp3_data.len());

    println!("Playing audio...");
    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&mp3_data)?;

    println!("\n---");
    println!("If you heard the speech, TTS is working!");

    Ok(())
}
