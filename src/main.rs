//! drive_export CLI - Export the course folders from Google Drive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drive_export::auth::{obtain_token, ConsolePrompt};
use drive_export::config::{SCOPE_DRIVE, SCOPE_DRIVE_METADATA_READONLY};
use drive_export::{
    extract_folder_id, index, Authenticator, Category, DriveClient, ExportJob, Exporter,
    OAuthConfig, TokenStore,
};

/// Export slides, programs and images from Google Drive.
#[derive(Parser)]
#[command(name = "drive_export")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Export slides to .pdf.
    #[arg(long)]
    sld: bool,

    /// Export programs to .pdf.
    #[arg(long)]
    pgm: bool,

    /// Export images to .svg.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    img: bool,

    /// Path to the OAuth client secret file.
    #[arg(long, env = "DRIVE_EXPORT_CREDENTIALS", default_value = "credentials.json")]
    credentials: PathBuf,

    /// Path to the cached token. Delete it after changing scopes.
    #[arg(long, env = "DRIVE_EXPORT_TOKEN", default_value = "token.json")]
    token: PathBuf,

    /// Base directory of the default export targets.
    #[arg(long, env = "HOME")]
    home: PathBuf,

    /// Slides folder URL or ID.
    #[arg(long)]
    slide_folder: Option<String>,

    /// Programs folder URL or ID.
    #[arg(long)]
    program_folder: Option<String>,

    /// Images folder URL or ID.
    #[arg(long)]
    image_folder: Option<String>,

    /// Log a markdown index of the exported files.
    #[arg(long)]
    index: bool,

    /// URL prefix of the links in the index. Files of every enabled
    /// category are linked under this one prefix.
    #[arg(long, default_value = "/images")]
    index_url_prefix: String,
}

impl Cli {
    /// Enabled categories in execution order, with folder overrides applied.
    fn jobs(&self) -> Result<Vec<ExportJob>> {
        let mut jobs = Vec::new();
        for category in Category::ALL {
            let (enabled, folder) = match category {
                Category::Slides => (self.sld, &self.slide_folder),
                Category::Programs => (self.pgm, &self.program_folder),
                Category::Images => (self.img, &self.image_folder),
            };
            if !enabled {
                continue;
            }

            let mut job = ExportJob::for_category(category, &self.home);
            if let Some(folder) = folder {
                let folder_id = extract_folder_id(folder)
                    .with_context(|| format!("Invalid {} folder URL or ID: {}", category, folder))?;
                job = job.with_folder_id(folder_id);
            }
            jobs.push(job);
        }
        Ok(jobs)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drive_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let jobs = cli.jobs()?;

    let config = OAuthConfig::from_file(
        &cli.credentials,
        &[SCOPE_DRIVE_METADATA_READONLY, SCOPE_DRIVE],
    )
    .with_context(|| format!("Unable to read client secret file {:?}", cli.credentials))?;
    let auth = Authenticator::new(config);

    let store = TokenStore::new(&cli.token);
    let token = obtain_token(&store, &auth, &ConsolePrompt)
        .await
        .context("Unable to obtain an access token")?;

    let client = DriveClient::new(auth, token);

    let written = Exporter::new(&client)
        .run(&jobs)
        .await
        .context("Export failed")?;

    if cli.index {
        tracing::info!("\n{}", index::render(&written, &cli.index_url_prefix));
    }

    Ok(())
}
