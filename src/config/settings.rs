use anchor_client::solana_sdk::pubkey::Pubkey;
use anyhow::{anyhow, Result};
use mpl_candy_machine::{
    EndSettings as CandyEndSettings, GatekeeperConfig as CandyGatekeeperConfig,
    HiddenSettings as CandyHiddenSettings, WhitelistMintSettings as CandyWhitelistMintSettings,
};
use tracing::info;

use crate::{
    candy_machine::CandyProgram,
    config::{data::*, errors::ConfigError},
    pdas::find_associated_token_pda,
    utils::{check_spl_token, check_spl_token_account},
};

/// Configuration values converted into the units and types the candy
/// machine program expects.
#[derive(Debug, Clone)]
pub struct CandySettings {
    /// Price in lamports, or in base units of `token_mint`.
    pub price: u64,
    /// Treasury receiving the mint payments.
    pub wallet: Pubkey,
    pub token_mint: Option<Pubkey>,
    pub go_live_date: Option<i64>,
    pub end_settings: Option<CandyEndSettings>,
    pub whitelist_mint_settings: Option<CandyWhitelistMintSettings>,
    pub hidden_settings: Option<CandyHiddenSettings>,
    pub gatekeeper: Option<CandyGatekeeperConfig>,
    pub retain_authority: bool,
    pub is_mutable: bool,
}

/// Resolves the treasury and the payment token. Returns the treasury wallet,
/// the payment mint (if any) and the decimals used to convert prices.
fn resolve_treasury(
    config_data: &ConfigData,
    payer: &Pubkey,
    program: &dyn CandyProgram,
) -> Result<(Pubkey, Option<Pubkey>, u8)> {
    match (config_data.spl_token, config_data.spl_token_account) {
        (Some(spl_token), spl_token_account) => {
            if config_data.sol_treasury_account.is_some() {
                return Err(ConfigError::TreasuryConflict.into());
            }

            let mint = check_spl_token(program, &spl_token)?;
            let treasury =
                spl_token_account.unwrap_or_else(|| find_associated_token_pda(payer, &spl_token));
            let account = check_spl_token_account(program, &treasury)?;

            if account.mint != spl_token {
                return Err(anyhow!(
                    "The treasury token account {} does not belong to the spl-token {}",
                    treasury,
                    spl_token
                ));
            }

            info!("payment in spl-token {} to {}", spl_token, treasury);
            Ok((treasury, Some(spl_token), mint.decimals))
        }
        (None, Some(_)) => Err(ConfigError::MissingSplToken.into()),
        (None, None) => Ok((
            config_data.sol_treasury_account.unwrap_or(*payer),
            None,
            SOL_DECIMALS,
        )),
    }
}

/// Normalises `config_data` for `payer`. Local conversions run first so a
/// malformed config fails before any account is fetched.
pub fn resolve_candy_settings(
    config_data: &ConfigData,
    payer: &Pubkey,
    program: &dyn CandyProgram,
) -> Result<CandySettings> {
    let go_live_date = go_live_date_as_timestamp(&config_data.go_live_date)?;

    let end_settings = config_data
        .end_settings
        .as_ref()
        .map(EndSettings::to_candy_format)
        .transpose()?;

    let hidden_settings = config_data
        .hidden_settings
        .as_ref()
        .map(HiddenSettings::to_candy_format)
        .transpose()?;

    let gatekeeper = config_data
        .gatekeeper
        .as_ref()
        .map(GatekeeperConfig::to_candy_format);

    check_price(config_data.price)?;

    if let Some(whitelist) = &config_data.whitelist_mint_settings {
        whitelist.mode.to_candy_format()?;
        if let Some(discount_price) = whitelist.discount_price {
            check_price(discount_price)?;
        }
    }

    let (wallet, token_mint, decimals) = resolve_treasury(config_data, payer, program)?;

    let whitelist_mint_settings = config_data
        .whitelist_mint_settings
        .as_ref()
        .map(|whitelist| whitelist.to_candy_format(decimals))
        .transpose()?;

    Ok(CandySettings {
        price: price_as_base_units(config_data.price, decimals)?,
        wallet,
        token_mint,
        go_live_date,
        end_settings,
        whitelist_mint_settings,
        hidden_settings,
        gatekeeper,
        retain_authority: config_data.retain_authority(),
        is_mutable: config_data.is_mutable(),
    })
}
