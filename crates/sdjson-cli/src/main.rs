//! sdjson - Schedules Direct JSON listings CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use sdjson_api::types::StationScheduleRequest;
use sdjson_api::{LocalSchedulesDirectApi, SdClient};

/// Client identifier sent as the User-Agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "sdjson", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write account credentials to the config file.
    Init(InitArgs),
    /// Show account and system status.
    Status,
    /// Manage lineups on the account.
    Lineups(LineupsCommand),
    /// List headends serving a postal code.
    Headends(HeadendsArgs),
    /// Fetch station schedules.
    Schedules(SchedulesArgs),
    /// Fetch program records.
    Programs(ProgramsArgs),
    /// Fetch artwork for programs.
    Artwork(ArtworkArgs),
    /// Query the unauthenticated `available` endpoints.
    Available(AvailableCommand),
    /// Print a shell completion script.
    Completions(CompletionsArgs),
}

/// Arguments for the `init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Account name.
    #[arg(long, required = true)]
    username: String,
    /// Account password (stored in clear text, hashed before use).
    #[arg(long, required = true)]
    password: String,
    /// Override the service base URL.
    #[arg(long)]
    base_url: Option<String>,
}

/// Arguments for the `lineups` subcommand.
#[derive(clap::Args)]
struct LineupsCommand {
    /// Lineups subcommand to run.
    #[command(subcommand)]
    command: LineupsSubcommands,
}

/// Available lineups subcommands.
#[derive(Subcommand)]
enum LineupsSubcommands {
    /// List lineups on the account.
    List,
    /// Add a lineup to the account.
    Add(LineupIdArgs),
    /// Remove a lineup from the account.
    Delete(LineupIdArgs),
    /// Preview the stations of a lineup without adding it.
    Preview(LineupIdArgs),
    /// Show the channel map of a lineup on the account.
    Channels(ChannelsArgs),
}

/// A single lineup ID.
#[derive(clap::Args)]
struct LineupIdArgs {
    /// Lineup ID (e.g. "USA-NY67791-X").
    lineup_id: String,
}

/// Arguments for the `lineups channels` subcommand.
#[derive(clap::Args)]
struct ChannelsArgs {
    /// Lineup ID (e.g. "USA-NY67791-X").
    lineup_id: String,
    /// Include transport details of each channel.
    #[arg(long)]
    verbose: bool,
}

/// Arguments for the `headends` subcommand.
#[derive(clap::Args)]
struct HeadendsArgs {
    /// ISO 3166-1 alpha-3 country code (e.g. "USA").
    #[arg(long, required = true)]
    country: String,
    /// Postal code (e.g. "10001").
    #[arg(long, required = true)]
    postal_code: String,
}

/// Arguments for the `schedules` subcommand.
#[derive(clap::Args)]
struct SchedulesArgs {
    /// Comma-separated station IDs (e.g. "20454,10021").
    #[arg(long, required = true, value_delimiter = ',')]
    station_ids: Vec<String>,
    /// Comma-separated dates as YYYY-MM-DD. All available dates if omitted.
    #[arg(long, value_delimiter = ',')]
    dates: Vec<String>,
}

/// Arguments for the `programs` subcommand.
#[derive(clap::Args)]
struct ProgramsArgs {
    /// Comma-separated program IDs (e.g. "EP000000060003").
    #[arg(long, required = true, value_delimiter = ',')]
    ids: Vec<String>,
}

/// Arguments for the `artwork` subcommand.
#[derive(clap::Args)]
struct ArtworkArgs {
    /// Comma-separated program IDs.
    #[arg(long, required = true, value_delimiter = ',')]
    ids: Vec<String>,
}

/// Arguments for the `available` subcommand.
#[derive(clap::Args)]
struct AvailableCommand {
    /// Available subcommand to run.
    #[command(subcommand)]
    command: AvailableSubcommands,
}

/// Available `available` subcommands.
#[derive(Subcommand)]
enum AvailableSubcommands {
    /// List available services.
    Services,
    /// List supported countries.
    Countries,
    /// List supported languages.
    Languages,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Builds an `SdClient` from the config file and environment.
///
/// With `authenticate` the account must be configured and a token is
/// obtained before returning.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the client fails to
/// build, or authentication fails.
#[instrument(skip_all)]
async fn build_client(dir: Option<&PathBuf>, authenticate: bool) -> Result<SdClient> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;
    config.apply_env();

    let mut builder = SdClient::builder().user_agent(USER_AGENT);
    if let Some(ref base_url) = config.api.base_url {
        let url =
            Url::parse(base_url).with_context(|| format!("invalid api.base_url {base_url:?}"))?;
        builder = builder.base_url(url);
    }
    if let Some(ref version) = config.api.api_version {
        builder = builder.api_version(version.clone());
    }

    if !authenticate {
        return builder
            .credentials(config.account.username.clone(), &config.account.password)
            .build()
            .context("failed to build Schedules Direct client");
    }

    let account = config.require_account()?;
    builder
        .credentials(account.username.clone(), &account.password)
        .connect()
        .await
        .context("failed to authenticate with Schedules Direct")
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
fn run_init(args: &InitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;
    config.account.username.clone_from(&args.username);
    config.account.password.clone_from(&args.password);
    if args.base_url.is_some() {
        config.api.base_url.clone_from(&args.base_url);
    }
    config.save(&path)?;

    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Runs the `status` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_status(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let status = client.get_status().await.context("status request failed")?;

    if let Some(ref account) = status.account {
        tracing::info!("Account expires: {}", account.expires);
        tracing::info!("Max lineups: {}", account.max_lineups);
        for message in &account.messages {
            tracing::info!("Message: {message}");
        }
    }
    if let Some(updated) = status.last_data_update {
        tracing::info!("Last data update: {updated}");
    }
    for system in &status.system_status {
        tracing::info!("System: {} ({})", system.status, system.details);
    }
    tracing::info!("Lineup\t\t\tModified");
    for lineup in &status.lineups {
        tracing::info!(
            "{}\t\t{}",
            lineup.lineup,
            lineup
                .modified
                .map_or_else(|| String::from("-"), |m| m.to_rfc3339()),
        );
    }

    Ok(())
}

/// Runs the `lineups list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_lineups_list(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let response = client.get_lineups().await.context("lineups request failed")?;

    tracing::info!("Lineup\t\t\tName\t\t\tStatus");
    for lineup in &response.lineups {
        tracing::info!(
            "{}\t\t{}\t\t{}",
            lineup.lineup,
            lineup.name,
            if lineup.is_deleted { "(deleted)" } else { "" },
        );
    }
    tracing::info!("Total: {} lineups", response.lineups.len());

    Ok(())
}

/// Runs the `lineups add` and `lineups delete` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_lineups_change(args: &LineupIdArgs, add: bool, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let response = if add {
        client.add_lineup(&args.lineup_id).await
    } else {
        client.delete_lineup(&args.lineup_id).await
    }
    .with_context(|| format!("lineup change for {} failed", args.lineup_id))?;

    tracing::info!("{}", response.base.message);
    tracing::info!("Changes remaining: {}", response.changes_remaining);

    Ok(())
}

/// Runs the `lineups preview` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_lineups_preview(args: &LineupIdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let stations = client
        .preview_lineup(&args.lineup_id)
        .await
        .context("lineup preview request failed")?;

    tracing::info!("Channel\tCallsign\tName");
    for station in &stations {
        tracing::info!("{}\t{}\t\t{}", station.channel, station.call_sign, station.name);
    }

    Ok(())
}

/// Runs the `lineups channels` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_lineups_channels(args: &ChannelsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let response = client
        .get_channels(&args.lineup_id, args.verbose)
        .await
        .context("channel map request failed")?;

    tracing::info!("Channel\tStationID\tCallsign");
    for entry in &response.map {
        let call_sign = response
            .stations
            .iter()
            .find(|s| s.station_id == entry.station_id)
            .map_or("-", |s| s.call_sign.as_str());
        tracing::info!("{}\t{}\t\t{}", entry.channel, entry.station_id, call_sign);
    }
    tracing::info!(
        "Total: {} channels, {} stations",
        response.map.len(),
        response.stations.len()
    );

    Ok(())
}

/// Runs the `headends` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_headends(args: &HeadendsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let headends = client
        .get_headends(&args.country, &args.postal_code)
        .await
        .context("headends request failed")?;

    tracing::info!("Headend\t\tTransport\tLineup\t\t\tName");
    for headend in &headends {
        for lineup in &headend.lineups {
            tracing::info!(
                "{}\t{}\t\t{}\t\t{}",
                headend.headend,
                headend.transport,
                lineup.lineup,
                lineup.name,
            );
        }
    }
    tracing::info!("Total: {} headends", headends.len());

    Ok(())
}

/// Runs the `schedules` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_schedules(args: &SchedulesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let requests: Vec<StationScheduleRequest> = args
        .station_ids
        .iter()
        .map(|id| StationScheduleRequest {
            station_id: id.clone(),
            dates: args.dates.clone(),
        })
        .collect();

    let schedules = client
        .get_schedules(&requests)
        .await
        .context("schedules request failed")?;

    tracing::info!("StationID\tAirDateTime\t\t\tDuration\tProgramID");
    for schedule in &schedules {
        for program in &schedule.programs {
            tracing::info!(
                "{}\t\t{}\t{}\t\t{}",
                schedule.station_id,
                program
                    .air_date_time
                    .map_or_else(|| String::from("-"), |t| t.to_rfc3339()),
                program.duration,
                program.program_id,
            );
        }
    }
    tracing::info!("Total: {} schedules", schedules.len());

    Ok(())
}

/// Runs the `programs` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_programs(args: &ProgramsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, true).await?;
    let programs = client
        .get_program_info(&args.ids)
        .await
        .context("programs request failed")?;

    tracing::info!("ProgramID\t\tType\t\tTitle");
    for program in &programs {
        tracing::info!(
            "{}\t{}\t\t{}",
            program.program_id,
            program
                .entity_type
                .as_ref()
                .map_or("-", |t| t.as_str()),
            program.titles.first().map_or("-", |t| t.title120.as_str()),
        );
    }
    tracing::info!("Total: {} programs", programs.len());

    Ok(())
}

/// Runs the `artwork` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_artwork(args: &ArtworkArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, false).await?;
    let responses = client
        .get_artwork_for_program_ids(&args.ids)
        .await
        .context("artwork request failed")?;

    for response in &responses {
        if let Some(err) = response.error() {
            tracing::info!("{}: {}", response.program_id, err.code);
            continue;
        }
        for artwork in response.artwork().unwrap_or_default() {
            tracing::info!(
                "{}\t{}x{}\t{}",
                response.program_id,
                artwork.width,
                artwork.height,
                client.image_url(&artwork.uri),
            );
        }
    }

    Ok(())
}

/// Runs the `available` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_available(command: &AvailableSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir, false).await?;
    match command {
        AvailableSubcommands::Services => {
            let services = client
                .get_available_services()
                .await
                .context("available services request failed")?;
            for service in &services {
                tracing::info!("{}\t{}\t{}", service.kind, service.uri, service.description);
            }
        }
        AvailableSubcommands::Countries => {
            let regions = client
                .get_available_countries()
                .await
                .context("available countries request failed")?;
            let mut names: Vec<&String> = regions.keys().collect();
            names.sort();
            for region in names {
                tracing::info!("{region}:");
                for country in regions.get(region).into_iter().flatten() {
                    tracing::info!("  {}\t{}", country.short_name, country.full_name);
                }
            }
        }
        AvailableSubcommands::Languages => {
            let languages = client
                .get_available_languages()
                .await
                .context("available languages request failed")?;
            let mut entries: Vec<(&String, &String)> = languages.iter().collect();
            entries.sort();
            for (code, name) in entries {
                tracing::info!("{code}\t{name}");
            }
        }
    }

    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "sdjson", &mut std::io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Init(args) => run_init(&args, dir),
        Commands::Status => run_status(dir).await,
        Commands::Lineups(lineups) => match lineups.command {
            LineupsSubcommands::List => run_lineups_list(dir).await,
            LineupsSubcommands::Add(args) => run_lineups_change(&args, true, dir).await,
            LineupsSubcommands::Delete(args) => run_lineups_change(&args, false, dir).await,
            LineupsSubcommands::Preview(args) => run_lineups_preview(&args, dir).await,
            LineupsSubcommands::Channels(args) => run_lineups_channels(&args, dir).await,
        },
        Commands::Headends(args) => run_headends(&args, dir).await,
        Commands::Schedules(args) => run_schedules(&args, dir).await,
        Commands::Programs(args) => run_programs(&args, dir).await,
        Commands::Artwork(args) => run_artwork(&args, dir).await,
        Commands::Available(available) => run_available(&available.command, dir).await,
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
