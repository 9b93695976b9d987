use console::style;

use crate::{
    cache::{load_cache, CacheProgram},
    common::*,
    config::{
        data::ConfigData, parser::get_config_data, settings::resolve_candy_settings,
    },
    deploy::{collection::*, errors::*, initialize::*},
    setup::{candy_setup, setup_program},
};

pub struct DeployArgs {
    pub config_path: String,
    pub cache_dir: PathBuf,
    pub env: String,
    pub cache_name: String,
    pub keypair: Option<String>,
    pub rpc_url: Option<String>,
    pub collection_mint: Option<String>,
    pub set_collection_mint: bool,
}

pub async fn process_deploy(args: DeployArgs) -> Result<()> {
    let config_data = get_config_data(&args.config_path)?;

    let candy_setup = match candy_setup(args.keypair.clone(), &args.env, args.rpc_url.clone()) {
        Ok(candy_setup) => candy_setup,
        Err(err) => {
            return Err(SetupError::CandySetupError(err.to_string()).into());
        }
    };
    let program = setup_program(&candy_setup)?;

    let candy_pubkey = deploy_candy_machine(&args, &config_data, program.as_ref())?;

    println!(
        "\n{}{}",
        COMPLETE_EMOJI,
        style(format!("Candy machine deployed: {}", candy_pubkey))
            .green()
            .bold()
    );

    Ok(())
}

/// Creates the candy machine described by `config_data`, saves it to the
/// cache and sets its collection when requested.
pub fn deploy_candy_machine(
    args: &DeployArgs,
    config_data: &ConfigData,
    program: &dyn CandyProgram,
) -> Result<Pubkey> {
    // local checks first; nothing is sent if these fail
    let details = CollectionDetails::new(
        &config_data.symbol,
        config_data.seller_fee_basis_points,
        &config_data.creators,
    )?;
    let collection_mint = parse_collection_mint(args.collection_mint.as_deref())?;
    let items_available = config_data
        .number
        .ok_or(DeployError::MissingItemsAvailable)?;

    let total_steps = if collection_mint.is_some() && args.set_collection_mint {
        2
    } else {
        1
    };

    if let Some(collection_mint) = &collection_mint {
        check_collection_mint(program, collection_mint)?;
    }

    let payer = program.payer();
    let settings = resolve_candy_settings(config_data, &payer, program)?;

    println!(
        "{} {}Creating candy machine",
        style(format!("[1/{}]", total_steps)).bold().dim(),
        CANDY_EMOJI
    );
    info!("initializing candy machine");

    let candy_pubkey = create_candy_machine(program, &settings, &details, items_available)?;

    let mut cache = load_cache(&args.cache_dir, &args.env, &args.cache_name, true)?;
    if !cache.program.candy_machine.is_empty() {
        warn!(
            "replacing candy machine {} in the cache with {}",
            cache.program.candy_machine, candy_pubkey
        );
        for item in cache.items.0.values_mut() {
            item.on_chain = false;
        }
    }
    cache.program = CacheProgram::new_from_cm(&candy_pubkey);
    cache.sync_file()?;

    info!(
        "initialized config for a candy machine with publickey: {}",
        candy_pubkey
    );

    match collection_mint {
        Some(collection_mint) if args.set_collection_mint => {
            println!(
                "\n{} {}Setting collection",
                style(format!("[2/{}]", total_steps)).bold().dim(),
                COLLECTION_EMOJI
            );
            set_collection_and_update_cache(program, &candy_pubkey, &collection_mint, &mut cache)?;
        }
        _ => info!("No collection set"),
    }

    Ok(candy_pubkey)
}
