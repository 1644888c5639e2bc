//! CLI entrypoint for duma-register
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::Parser;
use duma_application::{
    AuditLog, ChangeFeed, Directory, DocumentStore, IdentityGateway, MigrateLegacyNamesUseCase,
    NoAuditLog, SyncDirectoryUseCase,
};
use duma_domain::{BillFilter, Party, Region, RepresentativeFilter};
use duma_infrastructure::{
    ConfigLoader, ConfiguredIdentityGateway, JsonlAuditLog, MemoryDocumentStore,
    RestDocumentStore,
};
use duma_presentation::{prompt_credentials, AdminShell, Cli, Command, ConsoleFormatter, OutputFormat};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    for warning in config.validate() {
        warn!("{warning}");
    }

    info!("Starting duma-register for deployment {}", config.to_deployment().tenant);

    // === Dependency Injection ===
    let audit: Arc<dyn AuditLog> = match &config.audit.path {
        Some(path) => match JsonlAuditLog::new(path) {
            Some(log) => Arc::new(log),
            None => Arc::new(NoAuditLog),
        },
        None => Arc::new(NoAuditLog),
    };

    let mut gateway =
        ConfiguredIdentityGateway::new(config.to_credentials(), config.to_session_policy());
    if let Some(token) = &config.store.auth_token {
        gateway = gateway.with_service_token(token.clone());
    }

    // The store doubles as its own change feed in both modes
    if cli.offline {
        let store = Arc::new(MemoryDocumentStore::new());
        run(cli, store.clone(), store, gateway, audit).await
    } else {
        let store = Arc::new(
            RestDocumentStore::from_config(&config.store)
                .context("Failed to construct the document store client")?,
        );
        run(cli, store.clone(), store, gateway, audit).await
    }
}

async fn run<S, F>(
    cli: Cli,
    store: Arc<S>,
    feed: Arc<F>,
    gateway: ConfiguredIdentityGateway,
    audit: Arc<dyn AuditLog>,
) -> Result<()>
where
    S: DocumentStore + 'static,
    F: ChangeFeed + 'static,
{
    let directory = Directory::new().into_shared();
    let sync = Arc::new(SyncDirectoryUseCase::new(
        store.clone(),
        feed,
        directory.clone(),
    ));

    match cli.command {
        Command::Bills {
            search,
            kind,
            date,
            sponsor,
        } => {
            gateway.sign_in_anonymous().await?;
            sync.hydrate().await;

            let mut filter = BillFilter::new();
            let searching = search.as_deref().is_some_and(|s| !s.trim().is_empty());
            if let Some(term) = search {
                filter = filter.with_search(term);
            }
            if let Some(kind) = kind {
                filter = filter.with_kind(kind);
            }
            if let Some(date) = date {
                filter = filter.with_date(date);
            }
            if let Some(sponsor) = sponsor {
                filter = filter.with_sponsor(sponsor);
            }

            let dir = directory.read().await;
            let hits = filter.apply(&dir.bills);
            match cli.output {
                OutputFormat::Full => {
                    println!("{}", ConsoleFormatter::format_bill_list(&hits, searching))
                }
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&hits)),
            }
        }

        Command::Bill { id } => {
            gateway.sign_in_anonymous().await?;
            sync.hydrate().await;

            let dir = directory.read().await;
            let Some(bill) = dir.bill(&id) else {
                bail!("Unknown bill: {id}");
            };
            match cli.output {
                OutputFormat::Full => {
                    println!("{}", ConsoleFormatter::format_bill_detail(bill, &dir.roster()))
                }
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(bill)),
            }
        }

        Command::Reps {
            search,
            party,
            region,
        } => {
            gateway.sign_in_anonymous().await?;
            sync.hydrate().await;

            let mut filter = RepresentativeFilter::new();
            if let Some(term) = search {
                filter = filter.with_search(term);
            }
            if let Some(party) = party {
                filter = filter.with_party(party.parse::<Party>()?);
            }
            if let Some(region) = region {
                filter = filter.with_region(region.parse::<Region>()?);
            }

            let dir = directory.read().await;
            let hits = filter.apply(&dir.representatives);
            match cli.output {
                OutputFormat::Full => println!(
                    "{}",
                    ConsoleFormatter::format_representatives(&hits, &dir.leadership)
                ),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&hits)),
            }
        }

        Command::Leadership => {
            gateway.sign_in_anonymous().await?;
            sync.hydrate().await;

            let dir = directory.read().await;
            match cli.output {
                OutputFormat::Full => println!(
                    "{}",
                    ConsoleFormatter::format_leadership(&dir.leadership, &dir.roster())
                ),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&dir.leadership)),
            }
        }

        Command::Agenda => {
            gateway.sign_in_anonymous().await?;
            sync.hydrate().await;

            let dir = directory.read().await;
            match cli.output {
                OutputFormat::Full => println!("{}", ConsoleFormatter::format_agenda(&dir.agenda)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&dir.agenda)),
            }
        }

        Command::Admin { username, password } => {
            let (username, password) = prompt_credentials(username, password)?;
            let session = gateway
                .sign_in_admin(&username, &password)
                .await
                .context("Sign-in failed")?;

            sync.hydrate().await;

            // keep the directory live while the shell runs
            let cancel = CancellationToken::new();
            let watcher = tokio::spawn({
                let sync = sync.clone();
                let cancel = cancel.clone();
                async move { sync.run(cancel).await }
            });

            let shell = AdminShell::new(store, directory, audit, session);
            let outcome = shell.run().await;

            cancel.cancel();
            if let Ok(Err(e)) = watcher.await {
                warn!("Directory sync ended with an error: {e}");
            }
            outcome?;
        }

        Command::Migrate { username, password } => {
            let session = gateway
                .sign_in_admin(&username, &password)
                .await
                .context("Sign-in failed")?;

            let migration = MigrateLegacyNamesUseCase::new(store)
                .with_audit(audit)
                .execute(&session)
                .await?;
            println!(
                "{} bill(s) rewritten, {} leadership entr(ies) relinked",
                migration.bills_rewritten, migration.leadership_relinked
            );
            if !migration.unmatched_names.is_empty() {
                println!("Unmatched names: {}", migration.unmatched_names.join(", "));
            }
        }
    }

    Ok(())
}
