//! anomaly-tally CLI
//!
//! Tally detector diagnostics against labeled anomaly windows.

use anomaly_tally::{
    config::{Config, ErrorPolicy},
    core::WindowSet,
    report::{self, ReportFormat},
    Pipeline, VERSION,
};
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anomaly-tally")]
#[command(version = VERSION)]
#[command(about = "Tally detector diagnostics against labeled anomaly windows", long_about = None)]
struct Cli {
    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify diagnostics and print per-feature tallies
    Run {
        #[command(flatten)]
        inputs: InputArgs,

        /// Directory holding per-source diagnostics files
        #[arg(long)]
        results_root: Option<PathBuf>,

        /// Diagnostics file name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Diagnostics file extension
        #[arg(long)]
        suffix: Option<String>,

        /// Skip malformed records and unreadable sources instead of aborting
        #[arg(long)]
        skip_malformed: bool,

        /// Report format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Print run statistics to stderr after the report
        #[arg(long)]
        stats: bool,
    },

    /// List labeled sources and their window counts
    Windows {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Show configuration
    Config,
}

#[derive(Args)]
struct InputArgs {
    /// Labeled windows file
    #[arg(long)]
    windows: Option<PathBuf>,

    /// Skip source keys containing this marker
    #[arg(long)]
    exclude: Option<String>,
}

impl InputArgs {
    fn apply(self, config: &mut Config) {
        if let Some(windows) = self.windows {
            config.windows_path = windows;
        }
        if let Some(exclude) = self.exclude {
            config.exclude_marker = exclude;
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            inputs,
            results_root,
            prefix,
            suffix,
            skip_malformed,
            format,
            stats,
        } => load_config().and_then(|mut config| {
            inputs.apply(&mut config);
            if let Some(root) = results_root {
                config.results_root = root;
            }
            if let Some(prefix) = prefix {
                config.file_prefix = prefix;
            }
            if let Some(suffix) = suffix {
                config.file_suffix = suffix;
            }
            if skip_malformed {
                config.error_policy = ErrorPolicy::SkipMalformed;
            }
            cmd_run(config, &format, stats)
        }),
        Commands::Windows { inputs } => load_config().and_then(|mut config| {
            inputs.apply(&mut config);
            cmd_windows(&config)
        }),
        Commands::Config => load_config().and_then(|config| cmd_config(&config)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> anyhow::Result<Config> {
    Config::load().with_context(|| format!("loading {:?}", Config::config_path()))
}

fn cmd_run(config: Config, format: &str, show_stats: bool) -> anyhow::Result<()> {
    let format = ReportFormat::from_name(format)
        .ok_or_else(|| anyhow!("unknown report format '{format}' (expected text or json)"))?;

    let outcome = Pipeline::new(config).run().context("tally run failed")?;
    let rendered = report::render(&outcome.tally, format).context("rendering report")?;
    print!("{rendered}");
    if format == ReportFormat::Json {
        println!();
    }

    if show_stats {
        eprintln!();
        eprintln!("{}", outcome.stats.summary());
    }
    Ok(())
}

fn cmd_windows(config: &Config) -> anyhow::Result<()> {
    let windows = WindowSet::load(&config.windows_path, |key| config.is_excluded(key))
        .with_context(|| format!("loading windows from {:?}", config.windows_path))?;

    println!(
        "{} labeled sources in {:?}",
        windows.len() + windows.excluded_len(),
        config.windows_path
    );
    for (source_key, source_windows) in windows.iter() {
        println!("  {source_key}: {} window(s)", source_windows.len());
    }
    for (source_key, count) in windows.excluded() {
        println!("  {source_key}: {count} window(s) (excluded)");
    }
    Ok(())
}

fn cmd_config(config: &Config) -> anyhow::Result<()> {
    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", config.to_pretty_json()?);
    Ok(())
}
