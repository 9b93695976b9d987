mod utils;

use candy_cli::{
    candy_machine::CANDY_MACHINE_ID,
    common::*,
    mint::{errors::MintError, mint_multiple, mint_one},
    pdas::{find_associated_token_pda, find_collection_pda},
};
use mpl_candy_machine::WhitelistMintSettings;
use utils::*;

const MINT_NFT_ACCOUNTS: usize = 16;

fn program_with(candy_machine: &CandyMachine) -> (MockProgram, Pubkey) {
    let program = MockProgram::new();
    let candy_machine_id = Pubkey::new_unique();
    program.set_account(candy_machine_id, candy_machine_account(candy_machine));
    (program, candy_machine_id)
}

#[test]
fn empty_candy_machine_is_not_minted() {
    let (program, candy_machine_id) = program_with(&candy_machine(10, 10));

    let err = mint_one(&program, &candy_machine_id).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MintError>(),
        Some(MintError::CandyMachineEmpty(_))
    ));
    assert!(program.sent().is_empty());
}

#[test]
fn missing_candy_machine_is_an_error() {
    let program = MockProgram::new();

    assert!(mint_one(&program, &Pubkey::new_unique()).is_err());
    assert!(program.sent().is_empty());
}

#[test]
fn mint_sets_up_the_token_before_minting() {
    let (program, candy_machine_id) = program_with(&candy_machine(10, 3));

    mint_one(&program, &candy_machine_id).unwrap();

    let sent = program.sent();
    assert_eq!(sent.len(), 1);

    let instructions = &sent[0];
    let program_ids: Vec<Pubkey> = instructions.iter().map(|ix| ix.program_id).collect();
    assert_eq!(
        program_ids,
        vec![
            system_program::id(),
            spl_token::ID,
            spl_associated_token_account::ID,
            spl_token::ID,
            CANDY_MACHINE_ID,
        ]
    );

    let mint_nft = &instructions[4];
    assert_eq!(mint_nft.accounts.len(), MINT_NFT_ACCOUNTS);
    assert_eq!(mint_nft.accounts[0].pubkey, candy_machine_id);
    assert_eq!(mint_nft.accounts[2].pubkey, program.payer());
    assert_eq!(mint_nft.accounts[14].pubkey, sysvar::slot_hashes::ID);
}

#[test]
fn whitelist_burn_and_token_payment_are_approved_and_revoked() {
    let mut state = candy_machine(10, 0);
    let whitelist_mint = Pubkey::new_unique();
    let token_mint = Pubkey::new_unique();
    state.token_mint = Some(token_mint);
    state.data.whitelist_mint_settings = Some(WhitelistMintSettings {
        mode: WhitelistMintMode::BurnEveryTime,
        mint: whitelist_mint,
        presale: false,
        discount_price: None,
    });

    let (program, candy_machine_id) = program_with(&state);
    let whitelist_token = find_associated_token_pda(&program.payer(), &whitelist_mint);
    program.set_account(whitelist_token, vec![0; 165]);

    mint_one(&program, &candy_machine_id).unwrap();

    let sent = program.sent();
    assert_eq!(sent.len(), 2);

    let instructions = &sent[0];
    assert_eq!(instructions.len(), 7);
    // approvals run before mint_nft
    assert_eq!(instructions[4].program_id, spl_token::ID);
    assert_eq!(instructions[5].program_id, spl_token::ID);

    let mint_nft = &instructions[6];
    assert_eq!(mint_nft.program_id, CANDY_MACHINE_ID);
    assert_eq!(mint_nft.accounts.len(), MINT_NFT_ACCOUNTS + 5);

    let remaining = &mint_nft.accounts[MINT_NFT_ACCOUNTS..];
    assert_eq!(remaining[0].pubkey, whitelist_token);
    assert_eq!(remaining[1].pubkey, whitelist_mint);
    assert!(remaining[2].is_signer);
    assert_eq!(
        remaining[3].pubkey,
        find_associated_token_pda(&program.payer(), &token_mint)
    );
    assert!(remaining[4].is_signer);

    // revokes are sent in a cleanup transaction
    assert_eq!(sent[1].len(), 2);
    assert!(sent[1].iter().all(|ix| ix.program_id == spl_token::ID));
}

#[test]
fn collection_is_set_during_mint() {
    let (program, candy_machine_id) = program_with(&candy_machine(10, 0));
    let (collection_pda, _) = find_collection_pda(&candy_machine_id);
    let collection_mint = Pubkey::new_unique();
    program.set_account(
        collection_pda,
        collection_pda_account(collection_mint, candy_machine_id),
    );

    mint_one(&program, &candy_machine_id).unwrap();

    let instructions = &program.sent()[0];
    assert_eq!(instructions.len(), 6);

    let set_collection = &instructions[5];
    assert_eq!(set_collection.program_id, CANDY_MACHINE_ID);
    assert_eq!(set_collection.accounts[3].pubkey, collection_pda);
    assert_eq!(set_collection.accounts[6].pubkey, collection_mint);
}

#[test]
fn mint_multiple_stops_at_the_first_failure() {
    let (program, candy_machine_id) = program_with(&candy_machine(10, 0));
    let program = program.failing_on_send(2);

    let err = mint_multiple(&program, &candy_machine_id, 3).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MintError>(),
        Some(MintError::MintFailed(2, 3, _))
    ));
    assert_eq!(program.sent().len(), 1);
}

#[test]
fn mint_multiple_returns_every_signature() {
    let (program, candy_machine_id) = program_with(&candy_machine(10, 0));

    let signatures = mint_multiple(&program, &candy_machine_id, 3).unwrap();

    assert_eq!(signatures.len(), 3);
    assert_eq!(program.sent().len(), 3);
}
