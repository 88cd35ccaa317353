mod api_client;
mod clipboard;
mod config;
mod controller;
mod downloads;
mod errors;
mod formatter;
mod state;
mod upload;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::TailorClient;
use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::controller::Controller;
use crate::downloads::Downloads;
use crate::state::Event;
use crate::upload::FileCandidate;

#[derive(Parser, Debug)]
#[command(name = "resume-tailor")]
#[command(version)]
#[command(about = "Tailor a resume to a job description and render the result as HTML")]
struct Args {
    /// Resume file to upload (PDF, DOCX or TXT)
    #[arg(short, long)]
    resume: PathBuf,

    /// Job description text
    #[arg(
        short,
        long,
        conflicts_with = "job_description_file",
        required_unless_present = "job_description_file"
    )]
    job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    job_description_file: Option<PathBuf>,

    /// Write the formatted HTML here instead of stdout
    #[arg(long)]
    html_out: Option<PathBuf>,

    /// Copy the tailored text to the clipboard, then wait out the copy-label delay
    #[arg(long)]
    copy: bool,

    /// Save the tailored text as tailored_resume.txt
    #[arg(long)]
    download_txt: bool,

    /// Request a formatted document and save it as tailored_resume.docx
    #[arg(long)]
    download_docx: bool,

    /// Directory for downloaded files (overrides TAILOR_OUTPUT_DIR)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Tailoring API base URL (overrides TAILOR_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Resume Tailor v{}", env!("CARGO_PKG_VERSION"));

    let api_url = args.api_url.clone().unwrap_or_else(|| config.api_url.clone());
    let api = TailorClient::new(&api_url, config.http_timeout)
        .context("Failed to build HTTP client")?;
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.output_dir.clone());

    let mut controller = Controller::new(
        api,
        Arc::new(SystemClipboard),
        Downloads::new(out_dir),
        config.copy_reset,
    );

    controller.check_health().await;

    let job_description = match (&args.job_description, &args.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read job description '{}'", path.display())
        })?,
        (None, None) => bail!("A job description is required"),
    };

    let candidate = FileCandidate::from_path(&args.resume)?;
    controller.dispatch(Event::FileChosen(Some(candidate))).await;
    controller
        .dispatch(Event::JobDescriptionChanged(job_description))
        .await;

    if let Some(message) = &controller.state().error {
        bail!("{message}");
    }
    if !controller.state().submit_enabled() {
        bail!("Job description is required");
    }

    controller.dispatch(Event::SubmitRequested).await;

    let Some(html) = controller.state().result_html() else {
        let message = controller
            .state()
            .error
            .clone()
            .unwrap_or_else(|| errors::TAILOR_FALLBACK_MESSAGE.to_string());
        bail!("{message}");
    };

    match &args.html_out {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write HTML to '{}'", path.display()))?;
            info!("Wrote formatted resume to {}", path.display());
        }
        None => println!("{html}"),
    }

    let actions = [
        (args.copy, Event::CopyRequested),
        (args.download_txt, Event::DownloadTextRequested),
        (args.download_docx, Event::DownloadDocxRequested),
    ];
    for (requested, event) in actions {
        if !requested {
            continue;
        }
        let previous = controller.state().error.clone();
        controller.dispatch(event).await;
        // Successful actions leave the error region untouched.
        if let Some(message) = &controller.state().error {
            if Some(message) != previous.as_ref() {
                error!("{message}");
            }
        }
    }

    if args.copy {
        info!("Clipboard: {}", controller.state().copy_label.text());
        controller.run_timers().await;
        debug!("Clipboard: {}", controller.state().copy_label.text());
    }
    for path in &controller.state().saved_files {
        info!("Saved {}", path.display());
    }

    Ok(())
}
