//! Command implementations for the TaskData mapper CLI
//!
//! Each command loads a bundle, runs one conversion session over it and
//! writes the updated bundle together with the catalog identifier links of
//! the session.

use crate::app::services::session::{ConversionBundle, ConversionSession};
use crate::app::services::task_mapper::MappingStats;
use crate::cli::args::{Args, Commands, ConvertArgs};
use crate::config::ConversionConfig;
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main entry point for command execution
pub fn run(args: Args) -> Result<MappingStats> {
    let command = args
        .command
        .ok_or_else(|| Error::configuration("No command given".to_string()))?;
    let convert = command.convert_args();

    setup_logging(convert);
    convert.validate()?;

    let start_time = Instant::now();
    let config = load_configuration(convert)?;
    let output_path = command.output_path();

    let mut bundle = ConversionBundle::load(&convert.input_path)?;
    let mut session = ConversionSession::new(config)?;
    session.seed_links(&bundle.links)?;

    match &command {
        Commands::Import(_) => {
            info!(
                "Importing {} tasks from {}",
                bundle.task_data.tasks.len(),
                convert.input_path.display()
            );
            session.import_task_data(&mut bundle.model, &bundle.task_data)?;
        }
        Commands::Export(_) => {
            info!(
                "Exporting {} work items and {} logged data records from {}",
                bundle.model.documents.work_items.len(),
                bundle.model.documents.logged_data.len(),
                convert.input_path.display()
            );
            bundle.task_data = session.export_task_data(&bundle.model)?;
        }
    }

    bundle.links = session.catalog_links();
    bundle.save(&output_path)?;

    let stats = session.stats().clone();
    for issue in &stats.issues {
        warn!("Degraded stage: {}", issue);
    }
    info!(
        "Wrote {} in {:.2?}",
        output_path.display(),
        start_time.elapsed()
    );

    if !convert.quiet {
        println!("{}", stats.summary());
    }
    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &ConvertArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taskdata_mapper={}", log_level)));

    let initialized = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match initialized {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(_) => debug!("Logging already initialized"),
    }
}

/// Load configuration from the config file, then apply command-line overrides
fn load_configuration(args: &ConvertArgs) -> Result<ConversionConfig> {
    let mut config = match &args.config_file {
        Some(path) => ConversionConfig::from_json_file(path)?,
        None => ConversionConfig::default(),
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

fn apply_cli_overrides(config: &mut ConversionConfig, args: &ConvertArgs) {
    if let Some(ddi_export) = &args.ddi_export {
        config.ddi_export_path = Some(ddi_export.clone());
    }

    if args.strict {
        config.strict_stages = true;
    }
}
