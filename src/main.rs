use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payables::application::service::AccountService;
use payables::config::{ImportPolicy, ServiceConfig};
use payables::domain::account::{Account, AccountDraft, AccountId};
use payables::domain::date::parse_date;
use payables::domain::ports::AccountStoreBox;
use payables::infrastructure::in_memory::InMemoryAccountStore;
use payables::interfaces::csv::account_writer::AccountWriter;
use payables::telemetry;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Manage payable accounts", long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// What to do with import lines that fail to parse or validate.
    #[arg(long, global = true, value_enum, default_value_t = ImportPolicy::Strict)]
    import_policy: ImportPolicy,

    /// Page size used by `list` when `--page-size` is not given.
    #[arg(long, global = true, default_value_t = ServiceConfig::DEFAULT_PAGE_SIZE)]
    default_page_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import accounts from a CSV file (due_date,payment_date,amount,description,status)
    Import { input: PathBuf },
    /// List accounts filtered by due date and description
    List {
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
        /// Print the page as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Show a single account
    Get { id: u64 },
    /// Create an account
    Create(AccountFields),
    /// Replace every field of an account
    Update {
        id: u64,
        #[command(flatten)]
        fields: AccountFields,
    },
    /// Change the status of an account
    SetStatus { id: u64, status: String },
    /// Sum of amounts paid between two dates, inclusive
    TotalPaid {
        #[arg(value_parser = parse_date)]
        from: NaiveDate,
        #[arg(value_parser = parse_date)]
        to: NaiveDate,
    },
}

#[derive(Args)]
struct AccountFields {
    #[arg(long, value_parser = parse_date)]
    due: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    paid: Option<NaiveDate>,
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<Decimal>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

impl From<AccountFields> for AccountDraft {
    fn from(fields: AccountFields) -> Self {
        Self {
            due_date: fields.due,
            payment_date: fields.paid,
            amount: fields.amount,
            description: fields.description,
            status: fields.status,
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    use payables::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryAccountStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryAccountStore::new()))
}

fn print_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let config = ServiceConfig {
        import_policy: cli.import_policy,
        default_page_size: cli.default_page_size,
    };
    let service = AccountService::new(open_store(cli.db_path)?, config);

    match cli.command {
        Command::Import { input } => {
            let file = File::open(input).into_diagnostic()?;
            let report = service
                .import_accounts(BufReader::new(file))
                .await
                .into_diagnostic()?;
            for rejected in &report.rejected {
                eprintln!("Skipped line {}: {}", rejected.line_number, rejected.error);
            }
            println!("Imported {} accounts", report.count());
        }
        Command::List {
            from,
            to,
            description,
            page,
            page_size,
            json,
        } => {
            let result = service
                .list_accounts(from, to, description.as_deref(), page, page_size)
                .await
                .into_diagnostic()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            } else {
                print_accounts(&result.items)?;
                eprintln!(
                    "Page {} of {} ({} matching accounts)",
                    result.page + 1,
                    result.total_pages.max(1),
                    result.total_matches
                );
            }
        }
        Command::Get { id } => {
            let account = service.get_account(AccountId(id)).await.into_diagnostic()?;
            print_accounts([&account])?;
        }
        Command::Create(fields) => {
            let account = service
                .create_account(fields.into())
                .await
                .into_diagnostic()?;
            print_accounts([&account])?;
        }
        Command::Update { id, fields } => {
            let account = service
                .update_account(AccountId(id), fields.into())
                .await
                .into_diagnostic()?;
            print_accounts([&account])?;
        }
        Command::SetStatus { id, status } => {
            let account = service
                .set_status(AccountId(id), &status)
                .await
                .into_diagnostic()?;
            print_accounts([&account])?;
        }
        Command::TotalPaid { from, to } => {
            let total = service.total_paid(from, to).await.into_diagnostic()?;
            println!("{total}");
        }
    }

    Ok(())
}
