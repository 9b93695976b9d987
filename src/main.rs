use std::{
    fs::OpenOptions,
    path::PathBuf,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use candy_cli::{
    cli::{Cli, Commands},
    constants::{CACHE_PATH, COMPLETE_EMOJI, ERROR_EMOJI, LOG_FILE, WRITE_INDICES_BACKOFF_MS},
    deploy::{process_deploy, DeployArgs},
    mint::{process_mint, MintArgs},
    parse::parse_candy_errors,
    upload::{process_upload, UploadArgs},
};
use chrono::Local;
use clap::Parser;
use console::style;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{self, filter::LevelFilter, prelude::*, EnvFilter};

fn setup_logging(level: Option<EnvFilter>) -> Result<()> {
    // logs go to the current directory
    let log_path = PathBuf::from(LOG_FILE);

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)?;

    // user-provided level first, then RUST_LOG, then "trace"
    let env_filter = if let Some(filter) = level {
        filter
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"))
    };

    let formatting_layer = BunyanFormattingLayer::new("candy-cli".into(), file);
    let level_filter = LevelFilter::from_str(&env_filter.to_string())?;

    let subscriber = tracing_subscriber::registry()
        .with(formatting_layer.with_filter(level_filter))
        .with(JsonStorageLayer);

    set_global_default(subscriber)?;

    Ok(())
}

#[tokio::main(worker_threads = 4)]
async fn main() {
    match run().await {
        Ok(()) => {
            println!(
                "\n{}{}",
                COMPLETE_EMOJI,
                style("Command successful.").green().bold().dim()
            );
        }
        Err(err) => {
            tracing::error!("{:?}", err);
            let parsed_err = parse_candy_errors(&err.to_string());

            println!(
                "\n{}{} {}",
                ERROR_EMOJI,
                style("Error running command (re-run needed):").red(),
                parsed_err,
            );
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    solana_logger::setup_with_default("solana=off");

    let cli = Cli::parse();

    match cli.log_level {
        Some(user_filter) => {
            let filter = EnvFilter::from_str(&user_filter).map_err(|_| {
                anyhow!(
                    "Invalid log level: {:?}.\n Valid levels are: trace, debug, info, warn, error.",
                    user_filter
                )
            })?;
            setup_logging(Some(filter))?;
        }
        None => setup_logging(None)?,
    }

    let start_time = Local::now();
    tracing::info!("candy-cli started at {}", start_time);

    // set on the first Ctrl+C so pending config line batches are not started
    let interrupted = Arc::new(AtomicBool::new(false));
    let ctrl_handler = interrupted.clone();

    ctrlc::set_handler(move || {
        if ctrl_handler.load(Ordering::SeqCst) {
            println!(
                "\n\n{}{} Operation aborted.",
                ERROR_EMOJI,
                style("Error running command (re-run needed):").red(),
            );
            std::process::exit(1);
        }
        println!(
            "\n{}",
            style("Stopping after the requests in flight. Press Ctrl+C again to exit now.").dim()
        );
        ctrl_handler.store(true, Ordering::SeqCst);
    })?;

    let cache_dir = PathBuf::from(CACHE_PATH);

    match cli.command {
        Commands::Deploy {
            common,
            config_path,
            collection,
        } => {
            process_deploy(DeployArgs {
                config_path,
                cache_dir,
                env: common.env,
                cache_name: common.cache_name,
                keypair: common.keypair,
                rpc_url: common.rpc_url,
                collection_mint: collection.collection_mint,
                set_collection_mint: !collection.no_set_collection_mint,
            })
            .await?
        }
        Commands::Upload {
            directory,
            common,
            config_path,
            collection,
        } => {
            process_upload(UploadArgs {
                directory,
                config_path,
                cache_dir,
                env: common.env,
                cache_name: common.cache_name,
                keypair: common.keypair,
                rpc_url: common.rpc_url,
                collection_mint: collection.collection_mint,
                set_collection_mint: !collection.no_set_collection_mint,
                rate_limit: collection.rate_limit,
                backoff: Duration::from_millis(WRITE_INDICES_BACKOFF_MS),
                interrupted: interrupted.clone(),
            })
            .await?
        }
        Commands::MintOneToken { common } => {
            process_mint(MintArgs {
                cache_dir,
                env: common.env,
                cache_name: common.cache_name,
                keypair: common.keypair,
                rpc_url: common.rpc_url,
                number: Some(1),
            })
            .await?
        }
        Commands::MintMultipleTokens { common, number } => {
            process_mint(MintArgs {
                cache_dir,
                env: common.env,
                cache_name: common.cache_name,
                keypair: common.keypair,
                rpc_url: common.rpc_url,
                number: Some(number),
            })
            .await?
        }
    }

    let end_time = Local::now();
    tracing::info!(
        "candy-cli finished at {} (took {}s)",
        end_time,
        (end_time - start_time).num_milliseconds() as f64 / 1000.0
    );

    Ok(())
}
