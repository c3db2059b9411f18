//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments into validated configs
//! - runs the ingest pipeline or prints the series report

use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, IngestArgs, ShowArgs};
use crate::data::HttpSource;
use crate::domain::{IngestConfig, ShowConfig};
use crate::error::IngestError;

pub mod pipeline;

pub use pipeline::Ingestor;

/// Entry point for the `sfc` binary.
pub fn run() -> Result<(), IngestError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // `sfc` alone (e.g. from cron) should ingest.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Ingest(args) => handle_ingest(&args),
        Command::Show(args) => handle_show(&args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_ingest(args: &IngestArgs) -> Result<(), IngestError> {
    let config = ingest_config_from_args(args)?;
    debug!(?config, "ingest configuration");

    let source = HttpSource::new(config.fetch_timeout)?;
    let outcome = Ingestor::new(source, config).run()?;

    println!("{}", crate::report::format_outcome(&outcome));
    Ok(())
}

fn handle_show(args: &ShowArgs) -> Result<(), IngestError> {
    let config = show_config_from_args(args)?;
    let series = crate::io::load_series(&config.data_file)?;

    let mut views = crate::report::derive_daily(&series, config.timezone)
        .map_err(|e| IngestError::read(&config.data_file, e))?;
    if !config.all {
        let today = Utc::now().with_timezone(&config.timezone).date_naive();
        views = crate::report::through_day_of_year(views, today);
    }

    print!("{}", crate::report::format_daily_table(&views));
    if config.plot {
        println!();
        print!(
            "{}",
            crate::plot::render_daily_chart(&views, config.plot_width, config.plot_height, config.scale)
        );
    }
    Ok(())
}

pub fn ingest_config_from_args(args: &IngestArgs) -> Result<IngestConfig, IngestError> {
    if args.timeout_secs == 0 {
        return Err(IngestError::Config("timeout must be at least one second".to_string()));
    }
    if args.url.trim().is_empty() {
        return Err(IngestError::Config("source URL is empty".to_string()));
    }

    Ok(IngestConfig {
        source_url: args.url.clone(),
        data_file: args.store.data_file.clone(),
        timezone: parse_timezone(&args.store.timezone)?,
        fetch_timeout: Duration::from_secs(args.timeout_secs),
    })
}

pub fn show_config_from_args(args: &ShowArgs) -> Result<ShowConfig, IngestError> {
    Ok(ShowConfig {
        data_file: args.store.data_file.clone(),
        timezone: parse_timezone(&args.store.timezone)?,
        all: args.all,
        plot: !args.no_plot,
        scale: args.scale,
        plot_width: args.width,
        plot_height: args.height,
    })
}

fn parse_timezone(name: &str) -> Result<Tz, IngestError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| IngestError::Config(format!("unknown time zone '{name}': {e}")))
}

/// Rewrite argv so `sfc` defaults to `sfc ingest`.
///
/// Rules:
/// - `sfc`                          -> `sfc ingest`
/// - `sfc --data-file x.json ...`   -> `sfc ingest --data-file x.json ...`
/// - `sfc --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("ingest".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "ingest" | "show");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "ingest".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::{Cli, StoreArgs};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_means_ingest() {
        assert_eq!(rewrite_args(argv(&["sfc"])), argv(&["sfc", "ingest"]));
        assert_eq!(
            rewrite_args(argv(&["sfc", "--data-file", "x.json"])),
            argv(&["sfc", "ingest", "--data-file", "x.json"])
        );
        assert_eq!(rewrite_args(argv(&["sfc", "--help"])), argv(&["sfc", "--help"]));
        assert_eq!(rewrite_args(argv(&["sfc", "show", "--all"])), argv(&["sfc", "show", "--all"]));
    }

    #[test]
    fn ingest_args_parse_with_flags() {
        let cli = Cli::try_parse_from([
            "sfc",
            "ingest",
            "--url",
            "https://status.example.test/",
            "--data-file",
            "out/sf.json",
            "--timezone",
            "America/New_York",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };

        let config = ingest_config_from_args(&args).unwrap();
        assert_eq!(config.source_url, "https://status.example.test/");
        assert_eq!(config.data_file, PathBuf::from("out/sf.json"));
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let args = IngestArgs {
            url: "https://status.example.test/".to_string(),
            timeout_secs: 30,
            store: StoreArgs {
                data_file: PathBuf::from("data/sf.json"),
                timezone: "Mars/Olympus_Mons".to_string(),
            },
        };
        let err = ingest_config_from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args = IngestArgs {
            url: "https://status.example.test/".to_string(),
            timeout_secs: 0,
            store: StoreArgs {
                data_file: PathBuf::from("data/sf.json"),
                timezone: "America/Los_Angeles".to_string(),
            },
        };
        assert!(matches!(
            ingest_config_from_args(&args),
            Err(IngestError::Config(_))
        ));
    }

    #[test]
    fn show_args_map_no_plot_and_scale() {
        let cli = Cli::try_parse_from(["sfc", "show", "--no-plot", "--scale", "log", "--all"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        let config = show_config_from_args(&args).unwrap();
        assert!(!config.plot);
        assert!(config.all);
        assert_eq!(config.scale, crate::domain::ChartScale::Log);
    }
}
