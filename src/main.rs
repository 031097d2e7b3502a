//! changelens: change classification and content consolidation CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use changelens::config;
use changelens::consolidate;
use changelens::constants;
use changelens::diff;
use changelens::env;
use changelens::input;

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::args::{Cli, Command, InputArgs};
use config::Config;
use env::Env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();
    init_tracing(cli.verbose, &env);

    let renderer = cli.format.renderer();

    let output = match cli.command {
        Command::Version => return run_version(),
        Command::Schema { kind } => changelens::output::json::render_schema(kind),
        Command::Classify(input) => {
            let text = read(&input)?;
            let config = load_config(&cli.path, &env)?;
            let classifier = diff::DiffClassifier::new(config.classifier);
            renderer.render_classification(&classifier.classify(&text))
        }
        Command::Extract { input, hint } => {
            let text = read(&input)?;
            renderer.render_analysis(&diff::extract_with_hint(&text, hint))
        }
        Command::Analyze(input) => {
            let text = read(&input)?;
            let config = load_config(&cli.path, &env)?;
            let classifier = diff::DiffClassifier::new(config.classifier);
            renderer.render_report(&diff::analyze(&text, &classifier))
        }
        Command::Dedup { input, threshold } => {
            let text = read(&input)?;
            let mut settings = load_config(&cli.path, &env)?.consolidation;
            if let Some(threshold) = threshold {
                settings.threshold = threshold;
            }
            let consolidator = consolidate::Consolidator::new(&settings)?;
            renderer.render_dedup(&consolidator.deduplicate(&text))
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Install the stderr log subscriber.
///
/// `CHANGELENS_LOG` takes an `EnvFilter` directive; `--verbose` wins over it.
fn init_tracing(verbose: bool, env: &Env) {
    let directive = if verbose {
        "debug".to_string()
    } else {
        env.var(constants::ENV_LOG).unwrap_or_else(|_| "warn".to_string())
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load_config(path: &Path, env: &Env) -> Result<Config> {
    Config::load(Some(path), env).context("failed to load configuration")
}

fn read(args: &InputArgs) -> Result<String> {
    let text = input::read_input(&args.source())?;
    tracing::debug!(bytes = text.len(), "read input");
    Ok(text)
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}
