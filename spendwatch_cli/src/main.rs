mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spendwatch_lib::{validation, Client, Credentials, DEFAULT_CAMPAIGN_NAME};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "spendwatch")]
#[command(about = "Reconcile deduplicated ad spend against dashboard totals")]
struct Cli {
    /// Backend base URL (e.g. https://project.example.co)
    #[arg(long, env = "SPENDWATCH_BASE_URL", global = true)]
    base_url: Option<String>,

    /// API key sent in the `apikey` header
    #[arg(long, env = "SPENDWATCH_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Bearer token; defaults to the API key
    #[arg(long, env = "SPENDWATCH_BEARER_TOKEN", global = true, hide_env_values = true)]
    bearer_token: Option<String>,

    /// Campaign name to filter on
    #[arg(long, default_value = DEFAULT_CAMPAIGN_NAME, global = true)]
    campaign: String,

    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check daily totals for one campaign against expected week and month figures
    Daily(commands::daily::DailyArgs),
    /// Break down one month of spend per campaign
    Campaigns(commands::campaigns::CampaignsArgs),
}

impl Cli {
    fn client(&self) -> Result<Client> {
        let base_url = self
            .base_url
            .as_deref()
            .context("missing backend URL: pass --base-url or set SPENDWATCH_BASE_URL")?;
        let api_key = self
            .api_key
            .as_deref()
            .context("missing API key: pass --api-key or set SPENDWATCH_API_KEY")?;
        let credentials = match self.bearer_token.as_deref() {
            Some(token) => Credentials::new(api_key, token),
            None => Credentials::from_key(api_key),
        };
        Ok(Client::with_base_url(base_url, credentials))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spendwatch=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "md" | "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let campaign = validation::validate_campaign_name(&cli.campaign)?;
    let client = cli.client()?;

    match &cli.command {
        Commands::Daily(args) => commands::daily::run(args, client, &campaign, &format).await?,
        Commands::Campaigns(args) => {
            commands::campaigns::run(args, client, &campaign, &format).await?
        }
    }

    Ok(())
}
