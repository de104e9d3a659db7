//! roster-dash - terminal dashboard for roster-api statistics

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roster_common::config::TomlConfig;
use roster_common::stats::normalize_month_key;
use roster_common::{AgeBracket, DashboardFilter, MonthRange};
use roster_dash::client::DEFAULT_API_URL;
use roster_dash::notify::{Notifier, TerminalNotifier, TracingNotifier};
use roster_dash::{render, Dashboard, DashboardView, RosterClient};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "roster-dash")]
#[command(about = "Statistics dashboard for the person roster")]
#[command(version)]
struct Cli {
    /// roster-api base URL
    #[arg(long, env = "ROSTER_API_URL", global = true)]
    url: Option<String>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show registration statistics, optionally filtered
    Stats(StatsArgs),
    /// List registered persons, newest first
    Persons,
    /// List the suggested professions
    Professions,
}

#[derive(Args)]
struct StatsArgs {
    /// Keep only this profession (repeatable)
    #[arg(long = "profession")]
    professions: Vec<String>,
    /// Keep only this age range, e.g. 19-35 (repeatable)
    #[arg(long = "age-range")]
    age_ranges: Vec<String>,
    /// First month to include (YYYY-MM)
    #[arg(long)]
    from: Option<String>,
    /// Last month to include (YYYY-MM)
    #[arg(long)]
    to: Option<String>,
    /// Search text (shown in the filter summary only)
    #[arg(long, default_value = "")]
    search: String,
    /// Print the view as JSON
    #[arg(long)]
    json: bool,
    /// Refresh every N seconds until interrupted
    #[arg(long, value_name = "SECONDS")]
    watch: Option<u64>,
}

impl StatsArgs {
    fn filter(&self) -> Result<DashboardFilter> {
        for label in &self.age_ranges {
            if AgeBracket::from_label(label).is_none() {
                warn!("Unknown age range '{}', it will match nothing", label);
            }
        }

        let month = |m: &Option<String>| -> Result<Option<String>> {
            m.as_deref()
                .map(normalize_month_key)
                .transpose()
                .map_err(Into::into)
        };

        Ok(DashboardFilter {
            professions: self.professions.clone(),
            age_ranges: self.age_ranges.clone(),
            months: MonthRange {
                start: month(&self.from)?,
                end: month(&self.to)?,
            },
            search_term: self.search.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = TomlConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let toml = &loaded.config;

    // Logs go to stderr so stdout stays clean for output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    let level = &toml.logging.level;
                    format!("roster_dash={level},roster_common={level}").into()
                }),
        )
        .with_writer(std::io::stderr)
        .init();
    loaded.log();

    let base_url = cli
        .url
        .or_else(|| toml.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let client = RosterClient::new(base_url).context("Failed to create HTTP client")?;
    info!("Using roster-api at {}", client.base_url());

    match cli.command {
        Commands::Stats(args) => run_stats(client, args).await,
        Commands::Persons => {
            let persons = client.persons().await.context("Failed to load persons")?;
            print!("{}", render::render_persons(&persons));
            Ok(())
        }
        Commands::Professions => {
            let professions = client
                .professions()
                .await
                .context("Failed to load professions")?;
            print!("{}", render::render_professions(&professions));
            Ok(())
        }
    }
}

async fn run_stats(client: RosterClient, args: StatsArgs) -> Result<()> {
    let filter = args.filter()?;
    let mut dashboard = Dashboard::new(client);

    dashboard
        .load()
        .await
        .context("Failed to load statistics; check that roster-api is running and try again")?;
    dashboard.set_filter(filter);
    print_view(dashboard.view(), args.json)?;

    let Some(seconds) = args.watch else {
        return Ok(());
    };

    let notifier: Box<dyn Notifier> = if args.json {
        Box::new(TracingNotifier)
    } else {
        Box::new(TerminalNotifier::stderr())
    };

    let mut interval = tokio::time::interval(Duration::from_secs(seconds.max(1)));
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if dashboard.refresh(notifier.as_ref()).await.is_ok() {
                    print_view(dashboard.view(), args.json)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, exiting");
                return Ok(());
            }
        }
    }
}

fn print_view(view: Option<DashboardView>, json: bool) -> Result<()> {
    let Some(view) = view else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::render_view(&view));
    }
    Ok(())
}
