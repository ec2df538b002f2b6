//! lienguard - Job contact reconciliation engine
//!
//! Batch CLI with three jobs:
//! - `find`: merge per-company contact exports, restrict to invoiced
//!   projects, classify which contacts are missing lien information, attach
//!   reference URLs, and write the missing-info file.
//! - `notify`: group a missing-info file by project leader and deliver one
//!   notification per leader.
//! - `lien-sheet`: reshape the invoiced contact table into the lien filing
//!   team's sheet layout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use lienguard::models::{Company, ContactRow};
use lienguard::services::{
    invoice_filter, leader_grouper, lien_sheet, KoretraxClient, PipelineInputs,
    ReconcilePipeline, WebhookNotifier,
};
use lienguard::store::{self, UrlCacheStore};
use lienguard::Settings;

#[derive(Parser)]
#[command(name = "lienguard", version, about = "Job contact reconciliation and missing-information engine")]
struct Cli {
    /// Path to a config file (otherwise LIENGUARD_CONFIG or the platform
    /// config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile contact tables and write the missing-info file
    Find(FindArgs),
    /// Notify project leaders from a missing-info file
    Notify(NotifyArgs),
    /// Build the lien filing team's sheet from invoiced contacts
    LienSheet(LienSheetArgs),
}

#[derive(Args)]
struct FindArgs {
    /// Contact export per company, as COMPANY=path (repeatable)
    #[arg(long = "contacts", required = true, value_name = "COMPANY=PATH")]
    contacts: Vec<String>,

    /// Invoice ledger CSV (schema detected from the header)
    #[arg(long, value_name = "PATH")]
    ledger: PathBuf,

    /// Project registry CSV (Project ID, Leader)
    #[arg(long, value_name = "PATH")]
    registry: PathBuf,

    /// Personnel directory CSV (First Name, Surname, Email)
    #[arg(long, value_name = "PATH")]
    directory: PathBuf,

    /// Where to write the missing-info file
    #[arg(long, default_value = "missing_info.csv", value_name = "PATH")]
    output: PathBuf,

    /// Answer yes to all confirmation prompts
    #[arg(long)]
    yes: bool,
}

#[derive(Args)]
struct NotifyArgs {
    /// Missing-info file produced by `find`
    #[arg(long, default_value = "missing_info.csv", value_name = "PATH")]
    input: PathBuf,

    /// Send to real leader addresses instead of the test recipient
    #[arg(long)]
    go_live: bool,

    /// Flag the notifications as second notices
    #[arg(long)]
    second_notice: bool,
}

#[derive(Args)]
struct LienSheetArgs {
    /// Contact export per company, as COMPANY=path (repeatable)
    #[arg(long = "contacts", required = true, value_name = "COMPANY=PATH")]
    contacts: Vec<String>,

    /// Invoice ledger CSV
    #[arg(long, value_name = "PATH")]
    ledger: PathBuf,

    /// Existing-jobs CSV (Job Number); rows already on the sheet are dropped
    #[arg(long, value_name = "PATH")]
    existing_jobs: Option<PathBuf>,

    /// Where to write the lien sheet
    #[arg(long, default_value = "lien_sheet.csv", value_name = "PATH")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Find(args) => run_find(args, settings).await,
        Command::Notify(args) => run_notify(args, settings).await,
        Command::LienSheet(args) => run_lien_sheet(args),
    }
}

/// Parse repeated COMPANY=path arguments and load each file.
fn load_contact_tables(specs: &[String]) -> Result<Vec<(Company, Vec<ContactRow>)>> {
    let mut tables = Vec::with_capacity(specs.len());
    for spec in specs {
        let (company, path) = spec
            .split_once('=')
            .with_context(|| format!("expected COMPANY=PATH, got '{spec}'"))?;
        let company: Company = company.parse()?;
        let rows = store::loaders::load_contacts(std::path::Path::new(path))?;
        tables.push((company, rows));
    }
    Ok(tables)
}

/// Ask on stdout, read one line from stdin. Anything but an explicit yes is
/// a no.
fn prompt_yes_no(question: &str) -> bool {
    print!("{question} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn run_find(args: FindArgs, settings: Settings) -> Result<()> {
    let tables = load_contact_tables(&args.contacts)?;
    let companies: Vec<Company> = tables.iter().map(|(c, _)| *c).collect();
    let ledger = store::loaders::load_ledger(&args.ledger)?;

    if invoice_filter::is_schema_mismatch(&ledger, &companies)
        && !args.yes
        && !prompt_yes_no(
            "A lien-exports ledger was supplied with HTS/DXS contact files. Continue anyway?",
        )
    {
        anyhow::bail!("aborted: ledger schema does not match the supplied companies");
    }

    let registry = store::loaders::load_registry(&args.registry)?;
    let directory = store::loaders::load_directory(&args.directory)?;

    let resolver = KoretraxClient::new(settings.resolver_base_url.clone())?;
    let cache_store = UrlCacheStore::new(settings.url_cache_file.clone());
    let assume_yes = args.yes;
    let pipeline = ReconcilePipeline::new(resolver, cache_store, move |question: &str| {
        assume_yes || prompt_yes_no(question)
    });

    tracing::info!(run_id = %pipeline.run_id(), "Starting reconcile run");
    let outcome = pipeline
        .run(PipelineInputs {
            tables,
            ledger,
            registry,
            directory,
        })
        .await?;

    store::missing_info_store::export(&args.output, &outcome.missing_info)?;
    print!("{}", outcome.summary);
    Ok(())
}

async fn run_notify(args: NotifyArgs, settings: Settings) -> Result<()> {
    let records = store::missing_info_store::import(&args.input)?;
    if records.is_empty() {
        println!("Nothing to send: {} has no records", args.input.display());
        return Ok(());
    }

    let endpoint = settings
        .notify_endpoint
        .clone()
        .context("no notification endpoint configured")?;

    let run_id = Uuid::new_v4();
    let notifier = WebhookNotifier::new(
        endpoint,
        run_id,
        args.go_live,
        settings.test_recipient.clone(),
        args.second_notice,
    )?;

    let batches = leader_grouper::group_by_leader(records);
    tracing::info!(%run_id, leaders = batches.len(), live = args.go_live, "Sending notifications");
    let delivered = leader_grouper::notify_all(&notifier, &batches).await?;
    println!("Notified {delivered} leader(s)");
    Ok(())
}

fn run_lien_sheet(args: LienSheetArgs) -> Result<()> {
    let tables = load_contact_tables(&args.contacts)?;
    let ledger = store::loaders::load_ledger(&args.ledger)?;

    let merged = lienguard::services::contact_merger::merge_contacts(tables)?;
    let filtered = invoice_filter::filter_for_ledger(merged, &ledger)?;

    let existing_jobs = match &args.existing_jobs {
        Some(path) => store::loaders::load_existing_jobs(path)?,
        None => Vec::new(),
    };

    let rows = lien_sheet::build_lien_sheet(&filtered, &ledger, &existing_jobs);
    store::lien_sheet_store::export(&args.output, &rows)?;
    println!("Wrote {} row(s) to {}", rows.len(), args.output.display());
    Ok(())
}
