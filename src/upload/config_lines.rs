use std::{
    cmp,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use console::style;
use futures::future::select_all;
use mpl_candy_machine::ConfigLine;

use crate::{
    cache::CacheItems, common::*, deploy::errors::DeployError, utils::progress_bar_with_style,
};

/// The maximum config line bytes per transaction.
pub const MAX_TRANSACTION_BYTES: usize = 1000;

/// The maximum number of config lines per transaction.
pub const MAX_TRANSACTION_LINES: usize = 17;

pub type ConfigLineBatch = Vec<(u32, ConfigLine)>;

/// `0` selects the default limit.
pub fn effective_rate_limit(rate_limit: usize) -> usize {
    if rate_limit == 0 {
        DEFAULT_RATE_LIMIT
    } else {
        rate_limit
    }
}

/// Determine the config lines that need to be uploaded.
pub fn generate_config_lines(num_items: u64, cache_items: &CacheItems) -> Result<Vec<ConfigLineBatch>> {
    let mut config_lines: Vec<ConfigLineBatch> = Vec::new();
    let mut current: ConfigLineBatch = Vec::new();
    let mut tx_size = 0;

    for i in 0..num_items {
        let item = match cache_items.0.get(&i.to_string()) {
            Some(item) => item,
            None => {
                return Err(
                    DeployError::AddConfigLineFailed(format!("Missing cache item {}", i)).into(),
                );
            }
        };

        match item.to_config_line() {
            // on-chain items close the current batch since indices in a
            // batch must be contiguous
            None => {
                if !current.is_empty() {
                    config_lines.push(current);
                    current = Vec::new();
                    tx_size = 0;
                }
            }
            Some(config_line) => {
                if config_line.name.is_empty() {
                    return Err(DeployError::MissingName(i.to_string()).into());
                }
                if config_line.uri.is_empty() {
                    return Err(DeployError::MissingMetadataLink(i.to_string()).into());
                }

                let size = (2 * STRING_LEN_SIZE) + config_line.name.len() + config_line.uri.len();

                if (tx_size + size) > MAX_TRANSACTION_BYTES
                    || current.len() == MAX_TRANSACTION_LINES
                {
                    // we need a separate tx to not break the size limit
                    config_lines.push(current);
                    current = Vec::new();
                    tx_size = 0;
                }

                tx_size += size;
                current.push((i as u32, config_line));
            }
        }
    }
    // adds the last chunk (if there is one)
    if !current.is_empty() {
        config_lines.push(current);
    }

    Ok(config_lines)
}

/// Send the `add_config_lines` instruction to the candy machine program.
/// Returns the indices written.
pub fn add_config_lines(
    program: &dyn CandyProgram,
    candy_pubkey: &Pubkey,
    chunk: ConfigLineBatch,
) -> Result<Vec<u32>> {
    let start_index = match chunk.first() {
        Some((index, _)) => *index,
        None => return Ok(Vec::new()),
    };

    // this will be used to update the cache
    let mut indices: Vec<u32> = Vec::new();
    // configLine does not implement clone, so we have to do this
    let mut config_lines: Vec<ConfigLine> = Vec::new();

    for (index, line) in chunk {
        indices.push(index);
        config_lines.push(line);
    }

    let accounts = nft_accounts::AddConfigLines {
        candy_machine: *candy_pubkey,
        authority: program.payer(),
    };

    let add_config_lines_ix = Instruction {
        program_id: CANDY_MACHINE_ID,
        accounts: accounts.to_account_metas(None),
        data: nft_instruction::AddConfigLines {
            index: start_index,
            config_lines,
        }
        .data(),
    };

    let sig = program.send_instructions(vec![add_config_lines_ix], &[])?;
    debug!("add_config_lines at index {} signature: {}", start_index, sig);

    Ok(indices)
}

pub struct WriteIndicesArgs {
    pub candy_pubkey: Pubkey,
    pub rate_limit: usize,
    /// Pause after a failed batch.
    pub backoff: Duration,
    pub interrupted: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
pub struct WriteIndicesResult {
    /// `true` when every batch was written.
    pub success: bool,
    pub indices: Vec<u32>,
    pub errors: Vec<String>,
}

type BatchHandle = tokio::task::JoinHandle<Result<Vec<u32>, String>>;

fn spawn_batch(
    program: Arc<dyn CandyProgram>,
    candy_pubkey: Pubkey,
    chunk: ConfigLineBatch,
    backoff: Duration,
) -> BatchHandle {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            add_config_lines(program.as_ref(), &candy_pubkey, chunk)
        })
        .await;

        let error = match result {
            Ok(Ok(indices)) => return Ok(indices),
            Ok(Err(err)) => err.to_string(),
            Err(err) => err.to_string(),
        };

        error!("Failed writing indices: {}", error);
        tokio::time::sleep(backoff).await;

        Err(error)
    })
}

/// Writes the config line batches to the candy machine with at most
/// `rate_limit` requests in flight. A failed batch does not stop the
/// others. Written items are marked on-chain in the cache.
pub async fn write_indices(
    program: Arc<dyn CandyProgram>,
    args: WriteIndicesArgs,
    cache: &mut Cache,
    config_lines: Vec<ConfigLineBatch>,
) -> Result<WriteIndicesResult> {
    let rate_limit = effective_rate_limit(args.rate_limit);
    let total = config_lines.len();

    println!(
        "Sending config line(s) in {} transaction(s): (Ctrl+C to abort)",
        total
    );
    info!(
        "Writing all indices in {} transactions with a rate limit of {}",
        total, rate_limit
    );

    let pb = progress_bar_with_style(total as u64);

    let mut pending = config_lines.into_iter();
    let mut handles: Vec<BatchHandle> = Vec::new();
    let mut result = WriteIndicesResult {
        success: true,
        ..Default::default()
    };
    let mut sync_error = None;

    for chunk in pending.by_ref().take(cmp::min(total, rate_limit)) {
        handles.push(spawn_batch(
            program.clone(),
            args.candy_pubkey,
            chunk,
            args.backoff,
        ));
    }

    while !handles.is_empty() {
        let (outcome, _index, remaining) = select_all(handles).await;
        handles = remaining;

        // independently if the batch was successful or not
        // we continue with the remaining ones
        match outcome {
            Ok(Ok(indices)) => {
                for index in &indices {
                    if let Some(item) = cache.items.0.get_mut(&index.to_string()) {
                        item.on_chain = true;
                    }
                }
                result.indices.extend(indices);
                // saves the progress to the cache file; running batches
                // are still drained on failure
                if let Err(err) = cache.sync_file() {
                    error!("Failed saving the cache: {}", err);
                    if sync_error.is_none() {
                        sync_error = Some(err);
                    }
                }
                pb.inc(1);
            }
            Ok(Err(err)) => {
                result.success = false;
                result.errors.push(err);
            }
            Err(err) => {
                result.success = false;
                result.errors.push(err.to_string());
            }
        }

        if !args.interrupted.load(Ordering::SeqCst) {
            if let Some(chunk) = pending.next() {
                handles.push(spawn_batch(
                    program.clone(),
                    args.candy_pubkey,
                    chunk,
                    args.backoff,
                ));
            }
        }
    }

    if pending.next().is_some() {
        result.success = false;
        result
            .errors
            .push("Upload aborted, not all config lines were written.".to_string());
        pb.abandon_with_message(format!("{}", style("Upload aborted ").red().bold()));
    } else if !result.success {
        pb.abandon_with_message(format!("{}", style("Write config lines failed ").red().bold()));
    } else {
        pb.finish_with_message(format!(
            "{}",
            style("Write config lines successful ").green().bold()
        ));
    }

    // makes sure the cache file is updated
    cache.sync_file()?;

    if let Some(err) = sync_error {
        return Err(err);
    }

    Ok(result)
}
