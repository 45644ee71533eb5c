use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use votewatch_domain::{CliOverrides, Role};

mod bootstrap;
mod commands;
mod di;
mod render;

#[derive(Parser)]
#[command(name = "votewatch")]
#[command(version)]
#[command(about = "Votewatch - security log dashboard for campus elections")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Backend API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token for the backend API
    #[arg(long, global = true)]
    token: Option<String>,

    /// Dashboard polling interval in milliseconds
    #[arg(long, global = true)]
    poll_interval_ms: Option<u64>,

    /// Draft database path
    #[arg(long, global = true)]
    drafts_database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Live security log dashboard
    Watch {
        /// Role of the signed-in session
        #[arg(long, default_value = "admin")]
        role: Role,
    },
    /// Download the security log CSV export
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Download the security report PDF
    Report {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List blocked IP addresses and threat alerts
    Threats,
    /// Block an IP address
    Block {
        ip: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Lift a block on an IP address
    Unblock { ip: String },
    /// Inspect or discard saved form drafts
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    Show { key: String },
    Clear { key: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        api_url: cli.api_url.clone(),
        auth_token: cli.token.clone(),
        poll_interval_ms: cli.poll_interval_ms,
        drafts_database: cli.drafts_database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api.base_url,
        "Starting Votewatch"
    );

    let database_url = format!("sqlite:{}", config.drafts.database_path);
    let pool = bootstrap::init_database(&database_url).await?;

    let services = di::Services::new(&config, pool)?;
    let use_cases = di::UseCases::new(&services);

    match cli.command {
        Command::Watch { role } => commands::watch::run(&config, role, &services, &use_cases).await,
        Command::Export { out } => commands::transfer::export(&use_cases, &out).await,
        Command::Report { out } => commands::transfer::report(&use_cases, &out).await,
        Command::Threats => commands::threats::list(&use_cases).await,
        Command::Block { ip, reason } => {
            commands::threats::block(&use_cases, &ip, reason.as_deref()).await
        }
        Command::Unblock { ip } => commands::threats::unblock(&use_cases, &ip).await,
        Command::Draft { action } => match action {
            DraftAction::Show { key } => commands::drafts::show(&use_cases, &key).await,
            DraftAction::Clear { key } => commands::drafts::clear(&use_cases, &key).await,
        },
    }
}
