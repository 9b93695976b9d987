use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_lang::AnchorDeserialize;
use anyhow::{anyhow, Result};
use mpl_token_metadata::{
    pda::{find_collection_authority_account, find_master_edition_account, find_metadata_account},
    state::{Key, Metadata},
};

use crate::{
    candy_machine::{CandyProgram, CANDY_MACHINE_ID},
    constants::CIVIC,
};

pub type PdaInfo<T> = (Pubkey, T);

pub fn find_metadata_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = find_metadata_account(mint);

    pda
}

pub fn get_metadata_pda(mint: &Pubkey, program: &dyn CandyProgram) -> Result<PdaInfo<Metadata>> {
    let metadata_pubkey = find_metadata_pda(mint);
    let metadata_data = program.get_account_data(&metadata_pubkey)?.ok_or_else(|| {
        anyhow!(
            "Couldn't find metadata account: {}",
            &metadata_pubkey.to_string()
        )
    })?;
    let metadata = Metadata::deserialize(&mut metadata_data.as_slice());
    metadata.map(|m| (metadata_pubkey, m)).map_err(|_| {
        anyhow!(
            "Failed to deserialize metadata account: {}",
            &metadata_pubkey.to_string()
        )
    })
}

pub fn find_master_edition_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = find_master_edition_account(mint);

    pda
}

/// Returns the master edition address of `mint`, failing when the account is
/// missing or is not a master edition.
pub fn check_master_edition_pda(mint: &Pubkey, program: &dyn CandyProgram) -> Result<Pubkey> {
    let master_edition_pubkey = find_master_edition_pda(mint);
    let data = program
        .get_account_data(&master_edition_pubkey)?
        .ok_or_else(|| {
            anyhow!(
                "Couldn't find master edition account: {}",
                &master_edition_pubkey.to_string()
            )
        })?;

    match data.first() {
        Some(key)
            if *key == Key::MasterEditionV1 as u8 || *key == Key::MasterEditionV2 as u8 =>
        {
            Ok(master_edition_pubkey)
        }
        _ => Err(anyhow!(
            "Invalid master edition account: {}",
            &master_edition_pubkey.to_string()
        )),
    }
}

pub fn find_candy_machine_creator_pda(candy_machine_id: &Pubkey) -> (Pubkey, u8) {
    // Derive metadata account
    let creator_seeds = &["candy_machine".as_bytes(), candy_machine_id.as_ref()];

    Pubkey::find_program_address(creator_seeds, &CANDY_MACHINE_ID)
}

pub fn find_collection_pda(candy_machine_id: &Pubkey) -> (Pubkey, u8) {
    // Derive collection PDA address
    let collection_seeds = &["collection".as_bytes(), candy_machine_id.as_ref()];

    Pubkey::find_program_address(collection_seeds, &CANDY_MACHINE_ID)
}

pub fn find_collection_authority_record_pda(mint: &Pubkey, authority: &Pubkey) -> Pubkey {
    let (pda, _bump) = find_collection_authority_account(mint, authority);

    pda
}

pub fn find_associated_token_pda(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(wallet, mint)
}

pub fn gateway_program_id() -> Result<Pubkey> {
    CIVIC
        .parse::<Pubkey>()
        .map_err(|err| anyhow!("Invalid gateway program id {}: {}", CIVIC, err))
}

/// Gateway token issued by `gatekeeper_network` to `wallet`.
pub fn find_gateway_token_pda(wallet: &Pubkey, gatekeeper_network: &Pubkey) -> Result<Pubkey> {
    let seeds = &[
        wallet.as_ref(),
        "gateway".as_bytes(),
        &[0u8; 8],
        gatekeeper_network.as_ref(),
    ];

    Ok(Pubkey::find_program_address(seeds, &gateway_program_id()?).0)
}

pub fn find_gateway_expire_pda(gatekeeper_network: &Pubkey) -> Result<Pubkey> {
    let seeds = &[gatekeeper_network.as_ref(), "expire".as_bytes()];

    Ok(Pubkey::find_program_address(seeds, &gateway_program_id()?).0)
}
