//! adfind - admin panel discovery scanner.
//!
//! CLI entry point.

use adfind::{Config, ConsoleOutput, ConsolePrompt, DiscoveryEngine, HttpProber, Probe};
use clap::Parser;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = match config.verbose {
        0 => EnvFilter::new("adfind=info,warn"),
        1 => EnvFilter::new("adfind=debug,info"),
        _ => EnvFilter::new("adfind=trace,debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let headers = match config.parse_headers() {
        Ok(h) => h,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match adfind::CategoryRegistry::load(&config.registry_path()) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load category registry: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let prober = match HttpProber::new(config.timeout) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create HTTP prober: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if !headers.is_empty() {
        prober.set_custom_headers(headers);
    }

    let cancel = CancellationToken::new();
    {
        // Ctrl-C stops probing at the next candidate boundary.
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            eprintln!("\nSignal received, stopping...");
            cancel.cancel();
        });
    }

    let console = ConsoleOutput::new(config.verbose > 0, config.json);
    let mut engine = DiscoveryEngine::new(registry, Arc::new(prober), console.clone())
        .with_concurrency(config.concurrency)
        .with_cancellation(cancel);
    if config.stop {
        engine = engine.with_stop_policy(Arc::new(ConsolePrompt));
    }

    if !config.json {
        print_banner();
    }

    let result = match engine
        .discover(&config.target, &config.category, config.wordlist.as_deref())
        .await
    {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    console.print_summary(&result);

    if let Some(ref output_path) = config.output {
        let json = serde_json::to_string_pretty(&result).unwrap_or_default();
        if let Err(e) = fs::write(output_path, &json) {
            error!("Failed to write output file: {}", e);
            return ExitCode::FAILURE;
        }
        if !config.json {
            info!("Results written to: {:?}", output_path);
        }
    }

    ExitCode::SUCCESS
}

fn print_banner() {
    println!();
    println!("\x1b[36m╔══════════════════════════════════════════╗\x1b[0m");
    println!("\x1b[36m║              ADFIND v0.1.0               ║\x1b[0m");
    println!("\x1b[36m║       Admin Panel Discovery Scanner      ║\x1b[0m");
    println!("\x1b[36m╚══════════════════════════════════════════╝\x1b[0m");
    println!();
}
