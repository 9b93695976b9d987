mod utils;

use candy_cli::{
    common::*,
    config::{data::ConfigData, errors::ConfigError, settings::resolve_candy_settings},
    pdas::find_associated_token_pda,
};
use solana_program::{program_option::COption, program_pack::Pack};
use spl_token::state::{Account, AccountState, Mint};
use utils::*;

fn mint_account(decimals: u8) -> Vec<u8> {
    let mint = Mint {
        mint_authority: COption::None,
        supply: 1_000_000,
        decimals,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    let mut data = vec![0; Mint::LEN];
    Mint::pack(mint, &mut data).unwrap();
    data
}

fn token_account(mint: Pubkey, owner: Pubkey) -> Vec<u8> {
    let account = Account {
        mint,
        owner,
        amount: 0,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0; Account::LEN];
    Account::pack(account, &mut data).unwrap();
    data
}

#[test]
fn sol_price_is_converted_to_lamports() {
    let program = MockProgram::new();
    let config = ConfigData {
        price: 1.5,
        ..Default::default()
    };

    let settings = resolve_candy_settings(&config, &program.payer(), &program).unwrap();

    assert_eq!(settings.price, 1_500_000_000);
    assert_eq!(settings.wallet, program.payer());
    assert!(settings.token_mint.is_none());
    assert!(settings.retain_authority);
    assert!(settings.is_mutable);
    assert_eq!(program.remote_calls(), 0);
}

#[test]
fn treasury_conflict_makes_no_remote_calls() {
    let program = MockProgram::new();
    let config = ConfigData {
        spl_token: Some(Pubkey::new_unique()),
        sol_treasury_account: Some(Pubkey::new_unique()),
        ..Default::default()
    };

    let err = resolve_candy_settings(&config, &program.payer(), &program).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::TreasuryConflict)
    ));
    assert_eq!(program.remote_calls(), 0);
}

#[test]
fn negative_price_fails_before_fetching_the_token() {
    let program = MockProgram::new();
    let config = ConfigData {
        price: -1.0,
        spl_token: Some(Pubkey::new_unique()),
        ..Default::default()
    };

    let err = resolve_candy_settings(&config, &program.payer(), &program).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidPrice(_))
    ));
    assert_eq!(program.remote_calls(), 0);
}

#[test]
fn invalid_date_fails_before_fetching_the_token() {
    let program = MockProgram::new();
    let config = ConfigData {
        spl_token: Some(Pubkey::new_unique()),
        go_live_date: Some("not a date".to_string()),
        ..Default::default()
    };

    let err = resolve_candy_settings(&config, &program.payer(), &program).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidDate(_))
    ));
    assert_eq!(program.remote_calls(), 0);
}

#[test]
fn spl_token_treasury_defaults_to_the_associated_account() {
    let program = MockProgram::new();
    let spl_token = Pubkey::new_unique();
    let treasury = find_associated_token_pda(&program.payer(), &spl_token);
    program.set_account(spl_token, mint_account(6));
    program.set_account(treasury, token_account(spl_token, program.payer()));

    let config = ConfigData {
        price: 2.5,
        spl_token: Some(spl_token),
        no_retain_authority: true,
        ..Default::default()
    };

    let settings = resolve_candy_settings(&config, &program.payer(), &program).unwrap();

    assert_eq!(settings.wallet, treasury);
    assert_eq!(settings.token_mint, Some(spl_token));
    assert_eq!(settings.price, 2_500_000);
    assert!(!settings.retain_authority);
}

#[test]
fn treasury_of_another_mint_is_rejected() {
    let program = MockProgram::new();
    let spl_token = Pubkey::new_unique();
    let treasury = Pubkey::new_unique();
    program.set_account(spl_token, mint_account(6));
    program.set_account(treasury, token_account(Pubkey::new_unique(), program.payer()));

    let config = ConfigData {
        spl_token: Some(spl_token),
        spl_token_account: Some(treasury),
        ..Default::default()
    };

    assert!(resolve_candy_settings(&config, &program.payer(), &program).is_err());
}
