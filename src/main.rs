use bip39_recovery::config::RecoveryConfig;
use bip39_recovery::derive::{self, HistoryClient, DEFAULT_API_BASE};
use bip39_recovery::pipeline::RecoveryEngine;
use bip39_recovery::sink;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bip39-recovery")]
#[command(about = "Recovers BIP39 mnemonic phrases from partial per-word hints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print combination-count estimates for a hint configuration
    Estimate {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run the search pipeline and persist surviving phrases
    Search {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
        /// Override the configured output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the configured worker thread count
        #[arg(short, long)]
        threads: Option<usize>,
        /// Disable the progress bar (log lines only)
        #[arg(long)]
        no_progress: bool,
    },
    /// Derive addresses from a result file and query their history
    Probe {
        /// Path to a previously written result file
        #[arg(short, long)]
        results: PathBuf,
        /// BIP39 passphrase for seed derivation
        #[arg(long, default_value = "")]
        passphrase: String,
        /// Account-history API base URL
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api_base: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate { config } => {
            let config = RecoveryConfig::from_file(&config)?;
            let engine = RecoveryEngine::new(config)?;
            let estimate = engine.estimate();
            println!(
                "Total possible combinations (with repetitions): {}",
                estimate.with_repetition
            );
            println!(
                "Total possible combinations (without repetitions): {}",
                estimate.without_repetition
            );
        }
        Commands::Search {
            config,
            output,
            threads,
            no_progress,
        } => {
            let mut config = RecoveryConfig::from_file(&config)?;
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(threads) = threads {
                config.num_threads = threads;
            }
            if no_progress {
                config.show_progress_bar = false;
            }

            let cancel = Arc::new(AtomicBool::new(false));
            let handler_flag = Arc::clone(&cancel);
            ctrlc::set_handler(move || {
                eprintln!("\nInterrupt received, finishing in-flight batches...");
                handler_flag.store(true, Ordering::SeqCst);
            })?;

            let engine = RecoveryEngine::new(config)?;
            let outcome = engine.run(cancel)?;

            if outcome.cancelled {
                println!("Search interrupted; partial results written");
            }
            println!(
                "{} valid mnemonics written to {}",
                outcome.mnemonics.len(),
                outcome.output_path.display()
            );
        }
        Commands::Probe {
            results,
            passphrase,
            api_base,
        } => {
            let phrases = sink::read_results(&results)?;
            let client = HistoryClient::new(&api_base)?;
            match derive::probe_phrases(&phrases, &passphrase, &client)? {
                Some(account) => {
                    println!("The correct address is: {}", account.address);
                    println!("The correct mnemonic is:\n{}", account.phrase);
                }
                None => println!("No probed address has transaction history"),
            }
        }
    }

    Ok(())
}
