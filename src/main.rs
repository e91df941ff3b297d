use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, bail};
use mpesa_checkout::application::app_config::AppConfigService;
use mpesa_checkout::application::checkout::{PayWithMpesa, SubmitOutcome};
use mpesa_checkout::domain::form::FieldError;
use mpesa_checkout::domain::payment::CheckoutContext;
use mpesa_checkout::domain::ports::{PaymentGatewayBox, SessionStoreBox, TranslatorBox};
use mpesa_checkout::domain::session::TokenResponse;
use mpesa_checkout::infrastructure::catalog::JsonCatalogTranslator;
use mpesa_checkout::infrastructure::in_memory::{
    InMemoryAppLauncher, InMemoryIconRegistry, InMemorySessionStore, RecordingDialogOpener,
    RecordingLinkOpener,
};
use mpesa_checkout::interfaces::csv::checkout_reader::CheckoutReader;
use mpesa_checkout::interfaces::json::request_writer::JsonLinesGateway;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent session database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// JSON translation catalog for the selected language
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Language of the catalog
    #[arg(long, global = true, default_value = "en")]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a single M-Pesa checkout and print the dispatched request
    Pay {
        #[arg(long)]
        amount: Option<Decimal>,
        /// Customer number in national format, e.g. 712345678
        #[arg(long)]
        phone: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Submit every checkout in a CSV file (amount,phone,description)
    Batch { input: PathBuf },
    /// Inspect or update the stored session tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    Show,
    Set {
        #[arg(long)]
        token: String,
        #[arg(long)]
        expire_time: String,
    },
}

fn translator(cli: &Cli) -> Result<TranslatorBox> {
    let translator = match &cli.catalog {
        Some(path) => JsonCatalogTranslator::from_path(cli.lang.clone(), path).into_diagnostic()?,
        None => JsonCatalogTranslator::from_value(
            cli.lang.clone(),
            serde_json::json!({
                "subscriptionPage": { "labels": { "subscription": "Subscription" } }
            }),
        ),
    };
    Ok(Arc::new(translator))
}

fn session_store(db_path: Option<&PathBuf>) -> Result<SessionStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            use mpesa_checkout::infrastructure::rocksdb::RocksDBSessionStore;
            let store = RocksDBSessionStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent session storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemorySessionStore::new()))
        }
        None => Ok(Box::new(InMemorySessionStore::new())),
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config = AppConfigService::new(
        Arc::new(InMemoryIconRegistry::new()),
        Arc::new(RecordingDialogOpener::new(false)),
        translator(&cli)?,
        session_store(cli.db_path.as_ref())?,
        Arc::new(RecordingLinkOpener::new()),
        Arc::new(InMemoryAppLauncher::new(Vec::<String>::new())),
    );
    let gateway: PaymentGatewayBox = Arc::new(JsonLinesGateway::new(io::stdout()));

    match cli.command {
        Command::Pay {
            amount,
            phone,
            description,
        } => {
            let context = CheckoutContext {
                amount,
                description,
                package: None,
            };
            let mut dialog = PayWithMpesa::open(&config, gateway, context);
            dialog.form_mut().set_customer_msisdn(phone);
            if let SubmitOutcome::Rejected(errors) = dialog.submit().await {
                bail!("Checkout rejected: {}", describe(&errors));
            }
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            for (index, row) in CheckoutReader::new(file).rows().enumerate() {
                // Records start on line 2, after the header
                let line = index + 2;
                let row = match row {
                    Ok(row) => row,
                    Err(e) => {
                        tracing::warn!(line, "Error reading checkout: {}", e);
                        continue;
                    }
                };
                let mut dialog = PayWithMpesa::open(&config, gateway.clone(), row.context());
                dialog.form_mut().set_customer_msisdn(row.phone);
                if let SubmitOutcome::Rejected(errors) = dialog.submit().await {
                    tracing::warn!(line, "Checkout rejected: {}", describe(&errors));
                }
            }
        }
        Command::Session { action } => {
            if let SessionAction::Set { token, expire_time } = action {
                config
                    .set_session_tokens(&TokenResponse { token, expire_time })
                    .await
                    .into_diagnostic()?;
            }
            let tokens = config.get_session_tokens().await.into_diagnostic()?;
            println!(
                "{}",
                serde_json::to_string(&tokens).into_diagnostic()?
            );
        }
    }

    Ok(())
}
