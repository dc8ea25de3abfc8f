use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rxassist::config;
use rxassist::db::{insert_session, list_sessions, open_database};
use rxassist::export::render_session;
use rxassist::pipeline::extraction::DocumentExtractor;
use rxassist::pipeline::gemini::GeminiClient;
use rxassist::pipeline::processor::PrescriptionProcessor;

#[derive(Parser)]
#[command(name = "rxassist", version, about = "Prescription reference assistant for pharmacists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a prescription document (PDF or image) and store the session
    Process {
        /// Path to the prescription file
        file: PathBuf,
        /// Session database location (defaults to ~/Rxassist/)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Also write the plain-text export to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List stored sessions, newest first
    History {
        /// Session database location (defaults to ~/Rxassist/)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Show at most this many sessions
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Process { file, db, export } => process(file, db, export),
        Commands::History { db, limit } => history(db, limit),
    }
}

fn process(file: PathBuf, db: Option<PathBuf>, export: Option<PathBuf>) -> Result<()> {
    let api_key = std::env::var(config::API_KEY_ENV)
        .with_context(|| format!("{} is not set", config::API_KEY_ENV))?;

    let bytes = std::fs::read(&file).with_context(|| format!("cannot read {}", file.display()))?;
    let mime_type = mime_guess::from_path(&file)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    tracing::info!(file = %file_name, mime = %mime_type, "Processing prescription");

    let llm = Arc::new(GeminiClient::new(config::GEMINI_MODEL, &api_key));
    let processor =
        PrescriptionProcessor::new(Box::new(DocumentExtractor::new(llm.clone())), llm);

    let session = processor.process_document(&bytes, &mime_type, &file_name)?;

    if session.records.is_empty() {
        bail!("no medicine names could be extracted from the document text");
    }

    // A failed write is reported but does not discard the run's output.
    let db_path = db.unwrap_or_else(config::default_db_path);
    match open_database(&db_path).and_then(|conn| insert_session(&conn, &session)) {
        Ok(id) => tracing::info!(session_id = id, db = %db_path.display(), "Session saved"),
        Err(e) => tracing::error!(error = %e, db = %db_path.display(), "Failed to save session"),
    }

    let rendered = render_session(&session);
    if let Some(path) = export {
        std::fs::write(&path, &rendered)
            .with_context(|| format!("cannot write export to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Export written");
    }
    print!("{rendered}");

    Ok(())
}

fn history(db: Option<PathBuf>, limit: Option<usize>) -> Result<()> {
    let db_path = db.unwrap_or_else(config::default_db_path);
    let conn = open_database(&db_path)?;
    let sessions = list_sessions(&conn, limit)?;

    if sessions.is_empty() {
        println!("No previous sessions found.");
        return Ok(());
    }

    for session in sessions {
        println!(
            "Session {} - {} - {} ({} medicines)",
            session.id.unwrap_or_default(),
            session.timestamp.format("%Y-%m-%d %H:%M:%S"),
            session.file_name,
            session.records.len()
        );
        for record in &session.records {
            let mut line = format!("  {}", record.original_name);
            if !record.query_name.eq_ignore_ascii_case(&record.original_name) {
                line.push_str(&format!(" (as {})", record.query_name));
            }
            line.push_str(&format!(": {}", record.fields.medicine_name));
            println!("{line}");
        }
    }

    Ok(())
}
