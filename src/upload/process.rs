use std::{
    collections::HashSet,
    sync::atomic::AtomicBool,
    time::Duration,
};

use console::style;

use crate::{
    cache::{load_cache, CacheProgram},
    common::*,
    config::{
        data::{Cluster, ConfigData},
        parser::get_config_data,
        settings::resolve_candy_settings,
    },
    deploy::{
        collection::{check_collection_mint, parse_collection_mint, set_collection_and_update_cache},
        errors::DeployError,
        initialize::{create_candy_machine, CollectionDetails},
    },
    setup::{candy_setup, setup_program},
    upload::{assets::*, config_lines::*, errors::UploadError},
    validate::storage::check_storage,
};

pub struct UploadArgs {
    pub directory: String,
    pub config_path: String,
    pub cache_dir: PathBuf,
    pub env: String,
    pub cache_name: String,
    pub keypair: Option<String>,
    pub rpc_url: Option<String>,
    pub collection_mint: Option<String>,
    pub set_collection_mint: bool,
    pub rate_limit: usize,
    /// Pause after a failed config line batch.
    pub backoff: Duration,
    pub interrupted: Arc<AtomicBool>,
}

pub async fn process_upload(args: UploadArgs) -> Result<()> {
    let config_data = get_config_data(&args.config_path)?;

    let candy_setup = match candy_setup(args.keypair.clone(), &args.env, args.rpc_url.clone()) {
        Ok(candy_setup) => candy_setup,
        Err(err) => {
            return Err(SetupError::CandySetupError(err.to_string()).into());
        }
    };
    let program = setup_program(&candy_setup)?;

    let candy_pubkey = upload_collection(&args, &config_data, program).await?;

    println!(
        "\n{}{}",
        COMPLETE_EMOJI,
        style(format!("Upload successful, candy machine: {}", candy_pubkey))
            .green()
            .bold()
    );

    Ok(())
}

/// Registers the assets of `args.directory` on a candy machine, creating it
/// when the cache does not reference one yet.
///
/// Storage, file and manifest checks run before any call to `program`.
pub async fn upload_collection(
    args: &UploadArgs,
    config_data: &ConfigData,
    program: Arc<dyn CandyProgram>,
) -> Result<Pubkey> {
    let cluster: Cluster = args.env.parse()?;
    let storage = check_storage(config_data, cluster)?;

    println!(
        "{} {}Loading assets",
        style("[1/3]").bold().dim(),
        ASSETS_EMOJI
    );

    let assets = AssetFiles::from_dir(&args.directory)?;
    let items_available = assets.check_counts(storage, config_data.number)?;

    let metadata = read_metadata_files(&assets.metadata)?;
    let base_uri = config_data
        .base_uri
        .as_deref()
        .filter(|base_uri| !base_uri.trim().is_empty())
        .ok_or(UploadError::MissingBaseUri)?;
    let items = metadata_to_cache_items(&assets.metadata, &metadata, base_uri)?;

    // the first manifest describes the whole collection
    let first_manifest = &metadata[0];
    let details = CollectionDetails::new(
        &first_manifest.symbol,
        first_manifest.seller_fee_basis_points,
        &first_manifest.properties.creators,
    )?;

    let collection_mint = parse_collection_mint(args.collection_mint.as_deref())?;

    if let Some(collection_mint) = &collection_mint {
        check_collection_mint(program.as_ref(), collection_mint)?;
    }

    let payer = program.payer();
    let settings = resolve_candy_settings(config_data, &payer, program.as_ref())?;

    let mut cache = load_cache(&args.cache_dir, &args.env, &args.cache_name, true)?;

    for (index, item) in items {
        let on_chain = cache
            .items
            .0
            .get(&index)
            .map(|cached| cached.on_chain && cached.name == item.name && cached.link == item.link)
            .unwrap_or(false);

        cache.items.0.insert(index, CacheItem { on_chain, ..item });
    }

    println!(
        "\n{} {}Creating candy machine",
        style("[2/3]").bold().dim(),
        CANDY_EMOJI
    );

    let candy_pubkey = match cache.candy_machine()? {
        Some(candy_pubkey) => {
            info!("Resuming upload on candy machine {}", candy_pubkey);
            println!("Candy machine ID: {}", style(candy_pubkey).green());
            candy_pubkey
        }
        None => {
            info!("initializing candy machine");
            let candy_pubkey =
                create_candy_machine(program.as_ref(), &settings, &details, items_available)?;

            for item in cache.items.0.values_mut() {
                item.on_chain = false;
            }
            cache.program = CacheProgram::new_from_cm(&candy_pubkey);

            info!(
                "initialized config for a candy machine with publickey: {}",
                candy_pubkey
            );
            candy_pubkey
        }
    };
    cache.sync_file()?;

    println!(
        "\n{} {}Writing config lines",
        style("[3/3]").bold().dim(),
        PAPER_EMOJI
    );

    let config_lines = if settings.hidden_settings.is_some() {
        info!("Hidden settings set, skipping config lines");
        Vec::new()
    } else {
        generate_config_lines(metadata.len() as u64, &cache.items)?
    };

    let result = if config_lines.is_empty() {
        println!("All config lines deployed.");
        WriteIndicesResult {
            success: true,
            ..Default::default()
        }
    } else {
        write_indices(
            program.clone(),
            WriteIndicesArgs {
                candy_pubkey,
                rate_limit: args.rate_limit,
                backoff: args.backoff,
                interrupted: args.interrupted.clone(),
            },
            &mut cache,
            config_lines,
        )
        .await?
    };

    if !result.success {
        let errors: HashSet<&String> = result.errors.iter().collect();
        let mut message = String::from("upload was not successful, please re-run.");
        for error in errors {
            message.push_str("\n - ");
            message.push_str(error);
        }
        warn!("{}", message);

        return Err(DeployError::AddConfigLineFailed(message).into());
    }

    match collection_mint {
        Some(collection_mint) if cache.program.collection_mint == collection_mint.to_string() => {
            info!("Collection {} already set", collection_mint);
        }
        Some(collection_mint) if args.set_collection_mint => {
            println!("\n{}Setting collection", COLLECTION_EMOJI);
            set_collection_and_update_cache(
                program.as_ref(),
                &candy_pubkey,
                &collection_mint,
                &mut cache,
            )?;
        }
        _ => info!("No collection set"),
    }

    Ok(candy_pubkey)
}
