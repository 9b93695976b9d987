use console::style;
use spl_associated_token_account::instruction::create_associated_token_account;
use spl_token::{
    instruction::{approve, initialize_mint, mint_to, revoke},
    ID as TOKEN_PROGRAM_ID,
};

use crate::{
    cache::load_cache,
    candy_machine::{get_candy_machine_state, get_collection_pda_state},
    common::*,
    mint::errors::MintError,
    pdas::*,
    setup::{candy_setup, setup_program},
    utils::{progress_bar_with_style, spinner_with_style},
};

pub struct MintArgs {
    pub cache_dir: PathBuf,
    pub env: String,
    pub cache_name: String,
    pub keypair: Option<String>,
    pub rpc_url: Option<String>,
    pub number: Option<u64>,
}

pub async fn process_mint(args: MintArgs) -> Result<()> {
    let number = args.number.unwrap_or(1);
    if number == 0 {
        return Err(MintError::InvalidNumber.into());
    }

    let cache = load_cache(&args.cache_dir, &args.env, &args.cache_name, false)?;
    let candy_machine_id = cache.candy_machine()?.ok_or_else(|| {
        let error = CacheError::InvalidCandyMachineAddress(cache.program.candy_machine.clone());
        error!("{:?}", error);
        error
    })?;

    let candy_setup = match candy_setup(args.keypair, &args.env, args.rpc_url) {
        Ok(candy_setup) => candy_setup,
        Err(err) => {
            return Err(SetupError::CandySetupError(err.to_string()).into());
        }
    };
    let program = setup_program(&candy_setup)?;

    println!(
        "{} {}Minting from candy machine",
        style("[1/1]").bold().dim(),
        CANDY_EMOJI
    );
    println!("Candy machine ID: {}", &candy_machine_id);
    info!("Minting NFT from candy machine: {}", &candy_machine_id);
    info!("Candy machine program id: {:?}", CANDY_MACHINE_V2);

    if number == 1 {
        let pb = spinner_with_style();
        pb.set_message("Minting...");

        match mint_one(program.as_ref(), &candy_machine_id) {
            Ok(signature) => {
                pb.finish_with_message(format!("{} {}", style("Signature:").bold(), signature));
            }
            Err(err) => {
                pb.finish_with_message(format!(
                    "{}",
                    style("Could not confirm transaction").red().bold()
                ));
                return Err(err);
            }
        }
    } else {
        mint_multiple(program.as_ref(), &candy_machine_id, number)?;
    }

    println!("\n{}", style("[Completed]").bold().dim());

    Ok(())
}

/// Mints one token, failing when the candy machine has no items left.
pub fn mint_one(program: &dyn CandyProgram, candy_machine_id: &Pubkey) -> Result<Signature> {
    let candy_machine_state = get_candy_machine_state(program, candy_machine_id)?;
    let remaining = candy_machine_state
        .data
        .items_available
        .saturating_sub(candy_machine_state.items_redeemed);

    if remaining == 0 {
        let error = MintError::CandyMachineEmpty(candy_machine_id.to_string());
        error!("{:?}", error);
        return Err(error.into());
    }
    info!("{} item(s) remaining", remaining);

    let signature = mint(program, candy_machine_id, &candy_machine_state)?;
    info!("Minted! TxId: {}", signature);

    Ok(signature)
}

/// Mints `number` tokens one after the other, stopping at the first failure.
pub fn mint_multiple(
    program: &dyn CandyProgram,
    candy_machine_id: &Pubkey,
    number: u64,
) -> Result<Vec<Signature>> {
    let pb = progress_bar_with_style(number);
    let mut signatures = Vec::new();

    for i in 1..=number {
        match mint_one(program, candy_machine_id) {
            Ok(signature) => {
                info!("transaction {} complete {}", i, signature);
                signatures.push(signature);
                pb.inc(1);
            }
            Err(err) => {
                pb.abandon_with_message(format!("{}", style("Mint failed ").red().bold()));
                let error = MintError::MintFailed(i, number, err.to_string());
                error!("{:?}", error);
                return Err(error.into());
            }
        }
    }
    pb.finish();

    Ok(signatures)
}

/// Estimated size (bytes) of the mint transaction.
pub fn mint_transaction_size(candy_machine_state: &CandyMachine, collection_set: bool) -> usize {
    let data = &candy_machine_state.data;
    let mut size = MINT_TX_BASE_SIZE;

    if collection_set && data.retain_authority {
        size += MINT_TX_COLLECTION_SIZE;
    }
    if candy_machine_state.token_mint.is_some() {
        size += MINT_TX_TOKEN_MINT_SIZE;
    }
    if let Some(whitelist) = &data.whitelist_mint_settings {
        size += MINT_TX_WHITELIST_SIZE;
        if whitelist.mode == WhitelistMintMode::BurnEveryTime {
            size += MINT_TX_WHITELIST_BURN_SIZE;
        }
    }
    if let Some(gatekeeper) = &data.gatekeeper {
        size += MINT_TX_GATEKEEPER_SIZE;
        if gatekeeper.expire_on_use {
            size += MINT_TX_GATEKEEPER_EXPIRE_SIZE;
        }
    }

    size
}

/// Accounts, instructions and signers required by the candy machine
/// settings on top of the `mint_nft` accounts.
#[derive(Default)]
struct MintExtras {
    accounts: Vec<AccountMeta>,
    instructions: Vec<Instruction>,
    cleanup_instructions: Vec<Instruction>,
    signers: Vec<Keypair>,
}

fn mint_extras(
    program: &dyn CandyProgram,
    candy_machine_state: &CandyMachine,
    payer: &Pubkey,
) -> Result<MintExtras> {
    let candy_machine_data = &candy_machine_state.data;
    let mut extras = MintExtras::default();

    if let Some(gatekeeper) = &candy_machine_data.gatekeeper {
        let network = gatekeeper.gatekeeper_network;
        extras.accounts.push(AccountMeta::new(
            find_gateway_token_pda(payer, &network)?,
            false,
        ));

        if gatekeeper.expire_on_use {
            extras
                .accounts
                .push(AccountMeta::new_readonly(gateway_program_id()?, false));
            extras.accounts.push(AccountMeta::new_readonly(
                find_gateway_expire_pda(&network)?,
                false,
            ));
        }
    }

    // Check whitelist mint settings
    if let Some(wl_mint_settings) = &candy_machine_data.whitelist_mint_settings {
        let whitelist_token = find_associated_token_pda(payer, &wl_mint_settings.mint);
        extras.accounts.push(AccountMeta::new(whitelist_token, false));

        if wl_mint_settings.mode == WhitelistMintMode::BurnEveryTime {
            let whitelist_burn_authority = Keypair::new();

            extras
                .accounts
                .push(AccountMeta::new(wl_mint_settings.mint, false));
            extras.accounts.push(AccountMeta::new_readonly(
                whitelist_burn_authority.pubkey(),
                true,
            ));

            if program.get_account_data(&whitelist_token)?.is_some() {
                extras.instructions.push(approve(
                    &TOKEN_PROGRAM_ID,
                    &whitelist_token,
                    &whitelist_burn_authority.pubkey(),
                    payer,
                    &[],
                    1,
                )?);
                extras.cleanup_instructions.push(revoke(
                    &TOKEN_PROGRAM_ID,
                    &whitelist_token,
                    payer,
                    &[],
                )?);
            }

            extras.signers.push(whitelist_burn_authority);
        }
    }

    if let Some(token_mint) = candy_machine_state.token_mint {
        let transfer_authority = Keypair::new();
        let user_paying_account_address = find_associated_token_pda(payer, &token_mint);

        extras
            .accounts
            .push(AccountMeta::new(user_paying_account_address, false));
        extras
            .accounts
            .push(AccountMeta::new_readonly(transfer_authority.pubkey(), true));

        extras.instructions.push(approve(
            &TOKEN_PROGRAM_ID,
            &user_paying_account_address,
            &transfer_authority.pubkey(),
            payer,
            &[],
            candy_machine_data.price,
        )?);
        extras.cleanup_instructions.push(revoke(
            &TOKEN_PROGRAM_ID,
            &user_paying_account_address,
            payer,
            &[],
        )?);

        extras.signers.push(transfer_authority);
    }

    Ok(extras)
}

fn mint(
    program: &dyn CandyProgram,
    candy_machine_id: &Pubkey,
    candy_machine_state: &CandyMachine,
) -> Result<Signature> {
    let payer = program.payer();
    let nft_mint = Keypair::new();

    // Allocate memory for the account
    let min_rent = program.get_minimum_balance_for_rent_exemption(MINT_LAYOUT as usize)?;

    // Create mint account
    let create_mint_account_ix = system_instruction::create_account(
        &payer,
        &nft_mint.pubkey(),
        min_rent,
        MINT_LAYOUT,
        &TOKEN_PROGRAM_ID,
    );

    let init_mint_ix = initialize_mint(
        &TOKEN_PROGRAM_ID,
        &nft_mint.pubkey(),
        &payer,
        Some(&payer),
        0,
    )?;

    let assoc = find_associated_token_pda(&payer, &nft_mint.pubkey());
    let create_assoc_account_ix =
        create_associated_token_account(&payer, &payer, &nft_mint.pubkey(), &TOKEN_PROGRAM_ID);

    let mint_to_ix = mint_to(
        &TOKEN_PROGRAM_ID,
        &nft_mint.pubkey(),
        &assoc,
        &payer,
        &[],
        1,
    )?;

    let extras = mint_extras(program, candy_machine_state, &payer)?;

    let metadata_pda = find_metadata_pda(&nft_mint.pubkey());
    let master_edition_pda = find_master_edition_pda(&nft_mint.pubkey());
    let (candy_machine_creator_pda, creator_bump) =
        find_candy_machine_creator_pda(candy_machine_id);

    let mut mint_accounts = nft_accounts::MintNFT {
        candy_machine: *candy_machine_id,
        candy_machine_creator: candy_machine_creator_pda,
        payer,
        wallet: candy_machine_state.wallet,
        metadata: metadata_pda,
        mint: nft_mint.pubkey(),
        mint_authority: payer,
        update_authority: payer,
        master_edition: master_edition_pda,
        token_metadata_program: mpl_token_metadata::ID,
        token_program: TOKEN_PROGRAM_ID,
        system_program: system_program::id(),
        rent: sysvar::rent::ID,
        clock: sysvar::clock::ID,
        recent_blockhashes: sysvar::slot_hashes::ID,
        instruction_sysvar_account: sysvar::instructions::ID,
    }
    .to_account_metas(None);
    mint_accounts.extend(extras.accounts);

    let mint_nft_ix = Instruction {
        program_id: CANDY_MACHINE_ID,
        accounts: mint_accounts,
        data: nft_instruction::MintNft { creator_bump }.data(),
    };

    let mut instructions = vec![
        create_mint_account_ix,
        init_mint_ix,
        create_assoc_account_ix,
        mint_to_ix,
    ];
    instructions.extend(extras.instructions);
    instructions.push(mint_nft_ix);

    let (collection_pda, _) = find_collection_pda(candy_machine_id);
    let collection_pda_state = get_collection_pda_state(program, &collection_pda)?;

    if let Some(collection) = &collection_pda_state {
        if candy_machine_state.data.retain_authority {
            let collection_mint = collection.mint;
            let accounts = nft_accounts::SetCollectionDuringMint {
                candy_machine: *candy_machine_id,
                metadata: metadata_pda,
                payer,
                collection_pda,
                token_metadata_program: mpl_token_metadata::ID,
                instructions: sysvar::instructions::ID,
                collection_mint,
                collection_metadata: find_metadata_pda(&collection_mint),
                collection_master_edition: find_master_edition_pda(&collection_mint),
                authority: candy_machine_state.authority,
                collection_authority_record: find_collection_authority_record_pda(
                    &collection_mint,
                    &collection_pda,
                ),
            };

            instructions.push(Instruction {
                program_id: CANDY_MACHINE_ID,
                accounts: accounts.to_account_metas(None),
                data: nft_instruction::SetCollectionDuringMint.data(),
            });
        }
    }

    info!(
        "Transaction size estimate: {}",
        mint_transaction_size(candy_machine_state, collection_pda_state.is_some())
    );

    let mut signers: Vec<&Keypair> = vec![&nft_mint];
    signers.extend(extras.signers.iter());

    let sig = program.send_instructions(instructions, &signers)?;

    // cleanup instructions (revoke delegates) go in a separate transaction
    if !extras.cleanup_instructions.is_empty() {
        let cleanup_sig = program.send_instructions(extras.cleanup_instructions, &[])?;
        info!("Cleanup TxId: {}", cleanup_sig);
    }

    Ok(sig)
}
