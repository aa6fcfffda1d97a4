use aggregator::Aggregator;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table as TermTable, presets::UTF8_FULL};
use configuration::{ServerOverrides, Settings};
use core_types::SeasonSelector;
use database::DbRepository;
use report::{ReportModel, build_global_stats_report, build_season_report};
use std::path::PathBuf;

/// The main entry point for the F1 stats application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = configuration::load_settings(&cli.config)?;
    // Keeps the file writer flushing until the process exits.
    let _guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => handle_serve(settings, overrides).await,
        Commands::Report(args) => handle_report(settings, args).await,
        Commands::Seasons => handle_seasons(settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A read-only statistics dashboard over a Formula 1 results store.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard.
    Serve(ServerOverrides),
    /// Print the report of one season, followed by the all-years statistics.
    Report(ReportArgs),
    /// List every season in the store, newest first.
    Seasons,
}

#[derive(Parser)]
struct ReportArgs {
    /// The season to report on (e.g. 2021).
    #[arg(long)]
    year: i32,

    /// Print the report model as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(mut settings: Settings, overrides: ServerOverrides) -> anyhow::Result<()> {
    settings.apply_overrides(&overrides);
    settings.validate()?;
    web_server::run_server(settings).await
}

async fn handle_report(settings: Settings, args: ReportArgs) -> anyhow::Result<()> {
    let selector = SeasonSelector::from_query(Some(args.year))?;
    let Some(year) = selector.year() else {
        anyhow::bail!("a season year is required");
    };

    let pool = database::connect(&settings.database).await?;
    let db_repo = DbRepository::new(pool.clone());

    let (overview, stats) = {
        let mut session = db_repo.session().await?;
        let mut aggregator = Aggregator::new(&mut session);
        let overview = aggregator.season_overview(selector).await?;
        let stats = aggregator.global_stats().await?;
        (overview, stats)
    };
    database::close(&pool).await;

    let season = build_season_report(
        year,
        &overview.races,
        &overview.constructors,
        &overview.constructor_standings,
        &overview.driver_standings,
    )?;
    let global = build_global_stats_report(&stats.nationality_counts, &stats.engine_wins)?;

    if args.json {
        let body = serde_json::json!({ "season": season, "global": global });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_report(&season);
        print_report(&global);
    }
    Ok(())
}

async fn handle_seasons(settings: Settings) -> anyhow::Result<()> {
    let pool = database::connect(&settings.database).await?;
    let db_repo = DbRepository::new(pool.clone());

    let seasons = {
        let mut session = db_repo.session().await?;
        Aggregator::new(&mut session).list_seasons().await?
    };
    database::close(&pool).await;

    tracing::debug!(count = seasons.len(), "Seasons listed.");
    for year in seasons {
        println!("{}", year);
    }
    Ok(())
}

// ==============================================================================
// Terminal Rendering
// ==============================================================================

/// Prints each table of the report; charts are summarized by their
/// categories and series, since a terminal has no bars to draw.
fn print_report(report: &ReportModel) {
    if let Some(title) = &report.title {
        println!("\n=== {} ===", title);
    }
    for section in &report.sections {
        println!("\n## {}", section.heading);
        for line in &section.summary {
            println!("{}", line);
        }
        for table in &section.tables {
            let mut term = TermTable::new();
            term.load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(table.columns.clone());
            for row in &table.rows {
                term.add_row(row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
            }
            println!("{}", term);
        }
        for chart in &section.charts {
            let series: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
            println!(
                "[chart {}] {} categories, series: {}",
                chart.name,
                chart.x_labels.len(),
                series.join(", ")
            );
        }
    }
}
