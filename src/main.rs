mod cli;

use sampledb::config::{self, Config};
use sampledb::pipeline::{self, PipelineOptions};
use sampledb::render::{self, OutputFormat};
use sampledb_common::Variant;
use sampledb_db::pool::{get_conn, init_pool, PooledConnection};
use sampledb_db::reports::{self, ReportKind, ReportParams};
use sampledb_db::tables::{count_rows, Table};
use sampledb_db::{schema, seed};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "sampledb=trace,sampledb_db=debug,sampledb_common=debug".to_string()
        } else {
            "sampledb=info,sampledb_db=info".to_string()
        }
    });

    // stdout carries report output only
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let database = cli.database.as_deref();

    let command = cli.command.unwrap_or(Commands::Run {
        variant: None,
        reset: false,
        format: OutputFormat::Text,
    });

    match command {
        Commands::Run {
            variant,
            reset,
            format,
        } => run_all(load_config(config_path, database)?, variant, reset, format),
        Commands::Init { variant } => init_tables(load_config(config_path, database)?, variant),
        Commands::Seed { variant, reset } => {
            seed_tables(load_config(config_path, database)?, variant, reset)
        }
        Commands::Report {
            name,
            client,
            cinema,
            format,
        } => run_one(
            load_config(config_path, database)?,
            name,
            client,
            cinema,
            format,
        ),
        Commands::Reports { variant } => list_reports(variant),
        Commands::Tables { variant } => show_tables(load_config(config_path, database)?, variant),
        Commands::Validate { file } => validate_config(file.as_deref().or(config_path)),
    }
}

/// Load the config and apply command-line overrides
fn load_config(config_path: Option<&Path>, database: Option<&Path>) -> Result<Config> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(path) = database {
        config.database.path = path.to_path_buf();
    }

    Ok(config)
}

fn open_database(config: &Config) -> Result<PooledConnection> {
    let path = config.database.expanded_path();
    let pool = init_pool(&path, config.database.pool_options())
        .with_context(|| format!("Failed to open database at {}", path))?;
    let conn = get_conn(&pool)?;

    tracing::info!("Connected to database at {}", path);
    Ok(conn)
}

fn variants(variant: Option<Variant>) -> Vec<Variant> {
    match variant {
        Some(v) => vec![v],
        None => Variant::ALL.to_vec(),
    }
}

fn run_all(
    config: Config,
    variant: Option<Variant>,
    reset: bool,
    format: OutputFormat,
) -> Result<()> {
    let options = PipelineOptions {
        variant: variant.unwrap_or(config.variant),
        reset: reset || config.seed.reset,
        params: ReportParams::from(&config.reports),
        format,
    };

    let conn = open_database(&config)?;
    let mut out = std::io::stdout().lock();
    let summary = pipeline::run_pipeline(&conn, &options, &mut out)?;

    tracing::info!(
        variant = %summary.variant,
        reports = summary.reports_run,
        failed = summary.failures.len(),
        "Pipeline finished"
    );

    if !summary.succeeded() {
        let names: Vec<_> = summary.failures.iter().map(|f| f.report.name()).collect();
        anyhow::bail!(
            "{} of {} reports failed: {}",
            names.len(),
            summary.reports_run,
            names.join(", ")
        );
    }

    Ok(())
}

fn init_tables(config: Config, variant: Option<Variant>) -> Result<()> {
    let variant = variant.unwrap_or(config.variant);
    let conn = open_database(&config)?;

    schema::create_tables(&conn, variant)?;

    let names: Vec<_> = Table::for_variant(variant).iter().map(|t| t.as_str()).collect();
    println!("✓ {} tables ready: {}", variant, names.join(", "));
    Ok(())
}

fn seed_tables(config: Config, variant: Option<Variant>, reset: bool) -> Result<()> {
    let variant = variant.unwrap_or(config.variant);
    let conn = open_database(&config)?;

    schema::create_tables(&conn, variant)?;
    if reset || config.seed.reset {
        let removed = schema::clear_tables(&conn, variant)?;
        println!("Removed {} rows", removed);
    }

    let summary = seed::load(&conn, variant)?;
    for (table, rows) in &summary.rows {
        println!("  {}: {}", table, rows);
    }
    println!("Inserted {} {} rows", summary.total(), variant);
    Ok(())
}

fn run_one(
    config: Config,
    kind: ReportKind,
    client: Option<String>,
    cinema: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut params = ReportParams::from(&config.reports);
    if let Some(client) = client {
        params.client_name = client;
    }
    if let Some(cinema) = cinema {
        params.cinema_name = cinema;
    }

    let conn = open_database(&config)?;
    let tables =
        reports::run(&conn, kind, &params).with_context(|| format!("Report {} failed", kind))?;

    let mut out = std::io::stdout().lock();
    render::write_report(&mut out, kind, &tables, format)?;
    Ok(())
}

fn list_reports(variant: Option<Variant>) -> Result<()> {
    for variant in variants(variant) {
        for kind in ReportKind::for_variant(variant) {
            println!("{:<20} {:<9} {}", kind.name(), variant.to_string(), kind.description());
        }
    }

    Ok(())
}

fn show_tables(config: Config, variant: Option<Variant>) -> Result<()> {
    let conn = open_database(&config)?;
    let existing = schema::list_tables(&conn)?;

    for variant in variants(variant) {
        for &table in Table::for_variant(variant) {
            if existing.iter().any(|name| name == table.as_str()) {
                println!("{:<12} {}", table.as_str(), count_rows(&conn, table)?);
            } else {
                println!("{:<12} missing", table.as_str());
            }
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Variant: {}", config.variant);
    println!("  Database: {}", config.database.expanded_path());
    println!("  Pool size: {}", config.database.pool_size);
    println!("  Connect timeout: {}s", config.database.connect_timeout_secs);
    println!("  Reset before seeding: {}", config.seed.reset);
    println!("  Client report: {}", config.reports.client_name);
    println!("  Cinema report: {}", config.reports.cinema_name);

    Ok(())
}
