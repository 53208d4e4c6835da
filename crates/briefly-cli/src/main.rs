use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use briefly_client::SummaryClient;
use briefly_core::{BrieflyConfig, BrieflyError, Completion, RequestState, Session, SummaryStyle};

/// briefly: summarize text with a remote summarization service.
///
/// Opens a terminal form where you paste text, pick a summary style and
/// length, and read the returned summary. With --print it summarizes once
/// and writes the summary to stdout instead.
#[derive(Parser, Debug)]
#[command(name = "briefly", version, about)]
struct Cli {
    /// Base URL of the summarization API (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Summary style: concise, detailed or bullet_points.
    #[arg(short, long)]
    style: Option<SummaryStyle>,

    /// Number of sentences or points. Reset to the style default when the
    /// style does not offer it.
    #[arg(short, long)]
    length: Option<u32>,

    /// Text to summarize.
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text to summarize from a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Summarize once and print the result instead of starting the TUI.
    /// Reads stdin when neither --text nor --file is given.
    #[arg(short, long)]
    print: bool,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, discard logs rather than writing over the
    // alternate screen buffer.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("briefly");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("briefly.log"));

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config.
    let mut config = BrieflyConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        BrieflyConfig::default()
    });
    apply_overrides(&mut config, &cli);

    tracing::info!(
        "Starting briefly v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.summarize_url()
    );

    let text = read_input(&cli)?;

    if cli.print {
        let summary = summarize_once(&config, text.unwrap_or_default()).await?;
        println!("{summary}");
        return Ok(());
    }

    // Start the TUI.
    let mut app = briefly_tui::App::new(&config);
    if let Some(text) = text {
        app.set_initial_text(text);
    }

    app.run().await?;

    tracing::info!("briefly exited cleanly");
    Ok(())
}

/// Fold command-line flags into the loaded config.
fn apply_overrides(config: &mut BrieflyConfig, cli: &Cli) {
    if let Some(ref base_url) = cli.base_url {
        config.service.base_url = base_url.clone();
    }
    if let Some(style) = cli.style {
        config.summary.default_style = style;
    }
    if let Some(length) = cli.length {
        config.summary.default_length = Some(length);
    }
}

/// Text from --text or --file. In print mode stdin is read when neither is set.
fn read_input(cli: &Cli) -> Result<Option<String>> {
    if let Some(ref text) = cli.text {
        return Ok(Some(text.clone()));
    }
    if let Some(ref path) = cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(Some(text));
    }
    if cli.print {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(Some(text));
    }
    Ok(None)
}

/// Run one summarization without the TUI and return the summary text.
async fn summarize_once(config: &BrieflyConfig, text: String) -> Result<String> {
    let client = SummaryClient::from_config(config);
    let mut session = Session::new(config.summary.default_style);
    session.select_length(config.summary.initial_length());

    if let Some(warning) = session.set_input(text) {
        eprintln!("Warning: {warning}");
    }

    match session.submit(&client).await.map_err(BrieflyError::from)? {
        Completion::Succeeded { style } => {
            tracing::info!("{} summary generated", style.label());
        }
        Completion::Failed { error } => return Err(BrieflyError::from(error).into()),
        Completion::Ignored => bail!("A summary request is already in flight"),
    }

    match session.state() {
        RequestState::Succeeded(result) => Ok(result.summary_text.clone()),
        _ => bail!("No summary available."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "briefly",
            "--base-url",
            "http://localhost:9000/api/v1",
            "--style",
            "bullet-points",
            "--length",
            "7",
        ])
        .unwrap();

        let mut config = BrieflyConfig::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.service.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.summary.default_style, SummaryStyle::BulletPoints);
        assert_eq!(config.summary.initial_length(), 7);
    }

    #[test]
    fn disallowed_length_falls_back_to_style_default() {
        let cli = Cli::try_parse_from(["briefly", "--style", "concise", "--length", "10"]).unwrap();
        let mut config = BrieflyConfig::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.summary.initial_length(), 3);
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!(Cli::try_parse_from(["briefly", "--style", "poetic"]).is_err());
    }

    #[test]
    fn text_and_file_conflict() {
        assert!(Cli::try_parse_from(["briefly", "--text", "x", "--file", "y.txt"]).is_err());
    }

    #[test]
    fn inline_text_is_used_as_is() {
        let cli = Cli::try_parse_from(["briefly", "--text", "some text"]).unwrap();
        assert_eq!(read_input(&cli).unwrap().as_deref(), Some("some text"));

        let cli = Cli::try_parse_from(["briefly"]).unwrap();
        assert_eq!(read_input(&cli).unwrap(), None);
    }

    #[tokio::test]
    async fn validation_failure_is_an_error() {
        let config = BrieflyConfig::default();
        let err = summarize_once(&config, "too short".into()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter at least 50 characters for a meaningful summary."
        );
    }
}
