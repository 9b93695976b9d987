use crate::{
    common::*,
    deploy::errors::DeployError,
    pdas::{
        check_master_edition_pda, find_collection_authority_record_pda, find_collection_pda,
        find_master_edition_pda, find_metadata_pda, get_metadata_pda,
    },
    utils::check_spl_token,
};

/// Parses the `--collection-mint` option. No remote call is made.
pub fn parse_collection_mint(collection_mint: Option<&str>) -> Result<Option<Pubkey>> {
    match collection_mint {
        Some(mint) if !mint.trim().is_empty() => Pubkey::from_str(mint.trim())
            .map(Some)
            .map_err(|_| DeployError::InvalidCollectionMint(mint.to_string()).into()),
        _ => Ok(None),
    }
}

/// Checks that `collection_mint` can be set as the collection of a candy
/// machine owned by the payer: the mint exists, its metadata update
/// authority is the payer and it has a master edition.
pub fn check_collection_mint(program: &dyn CandyProgram, collection_mint: &Pubkey) -> Result<()> {
    check_spl_token(program, collection_mint)
        .map_err(|err| anyhow!("Invalid collection mint {}: {}", collection_mint, err))?;

    let (_, metadata) = get_metadata_pda(collection_mint, program)?;
    let payer = program.payer();

    if metadata.update_authority != payer {
        return Err(DeployError::InvalidCollectionUpdateAuthority(
            metadata.update_authority.to_string(),
            payer.to_string(),
        )
        .into());
    }

    check_master_edition_pda(collection_mint, program)?;

    Ok(())
}

/// Send the `set_collection` instruction to the candy machine program.
pub fn set_collection(
    program: &dyn CandyProgram,
    candy_pubkey: &Pubkey,
    collection_mint: &Pubkey,
) -> Result<Signature> {
    let payer = program.payer();
    let (collection_pda, _) = find_collection_pda(candy_pubkey);

    let accounts = nft_accounts::SetCollection {
        candy_machine: *candy_pubkey,
        authority: payer,
        collection_pda,
        payer,
        system_program: system_program::id(),
        rent: sysvar::rent::ID,
        metadata: find_metadata_pda(collection_mint),
        mint: *collection_mint,
        edition: find_master_edition_pda(collection_mint),
        collection_authority_record: find_collection_authority_record_pda(
            collection_mint,
            &collection_pda,
        ),
        token_metadata_program: mpl_token_metadata::ID,
    };

    let set_collection_ix = Instruction {
        program_id: CANDY_MACHINE_ID,
        accounts: accounts.to_account_metas(None),
        data: nft_instruction::SetCollection.data(),
    };

    program.send_instructions(vec![set_collection_ix], &[])
}

/// Sets the collection of `candy_pubkey` and records it in the cache.
pub fn set_collection_and_update_cache(
    program: &dyn CandyProgram,
    candy_pubkey: &Pubkey,
    collection_mint: &Pubkey,
    cache: &mut Cache,
) -> Result<()> {
    let sig = set_collection(program, candy_pubkey, collection_mint)?;
    info!("set_collection signature: {}", sig);

    cache.program.collection_mint = collection_mint.to_string();
    cache.sync_file()?;

    Ok(())
}
