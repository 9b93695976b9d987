use anchor_client::solana_sdk::native_token::LAMPORTS_PER_SOL;
use console::style;
use mpl_candy_machine::{CandyMachineData, Creator as CandyCreator};

use crate::{
    candy_machine::{get_space_for_candy, uuid_from_pubkey},
    common::*,
    config::{data::Creator, settings::CandySettings},
    deploy::errors::*,
    utils::spinner_with_style,
    validate::parser::{check_creators, check_seller_fee_basis_points, check_symbol},
};

/// Collection-wide metadata shared by every item of the candy machine.
#[derive(Debug, Clone)]
pub struct CollectionDetails {
    pub symbol: String,
    pub seller_fee_basis_points: u16,
    pub creators: Vec<CandyCreator>,
}

impl CollectionDetails {
    /// Validates and converts the values; nothing here touches the network.
    pub fn new(symbol: &str, seller_fee_basis_points: u16, creators: &[Creator]) -> Result<Self> {
        check_symbol(symbol)?;
        check_seller_fee_basis_points(seller_fee_basis_points)?;
        let creators = check_creators(creators)?;

        Ok(CollectionDetails {
            symbol: symbol.to_string(),
            seller_fee_basis_points,
            creators,
        })
    }
}

/// Create the candy machine data struct.
pub fn create_candy_machine_data(
    settings: &CandySettings,
    details: &CollectionDetails,
    items_available: u64,
    uuid: String,
) -> CandyMachineData {
    CandyMachineData {
        uuid,
        price: settings.price,
        symbol: details.symbol.clone(),
        seller_fee_basis_points: details.seller_fee_basis_points,
        max_supply: 0,
        is_mutable: settings.is_mutable,
        retain_authority: settings.retain_authority,
        go_live_date: settings.go_live_date,
        end_settings: settings.end_settings.clone(),
        creators: details.creators.clone(),
        hidden_settings: settings.hidden_settings.clone(),
        whitelist_mint_settings: settings.whitelist_mint_settings.clone(),
        items_available,
        gatekeeper: settings.gatekeeper.clone(),
    }
}

/// Send the `initialize_candy_machine` instruction to the candy machine program.
pub fn initialize_candy_machine(
    program: &dyn CandyProgram,
    candy_account: &Keypair,
    candy_machine_data: CandyMachineData,
    settings: &CandySettings,
) -> Result<Signature> {
    let payer = program.payer();
    let candy_account_size = get_space_for_candy(&candy_machine_data)?;

    info!(
        "Initializing candy machine with account size of: {} and address of: {}",
        candy_account_size,
        candy_account.pubkey().to_string()
    );

    let lamports = program.get_minimum_balance_for_rent_exemption(candy_account_size)?;
    let balance = program.get_balance(&payer)?;

    if lamports > balance {
        return Err(DeployError::BalanceTooLow(
            format!("{:.3}", (balance as f64 / LAMPORTS_PER_SOL as f64)),
            format!("{:.3}", (lamports as f64 / LAMPORTS_PER_SOL as f64)),
        )
        .into());
    }

    let create_account_ix = system_instruction::create_account(
        &payer,
        &candy_account.pubkey(),
        lamports,
        candy_account_size as u64,
        &CANDY_MACHINE_ID,
    );

    let mut accounts = nft_accounts::InitializeCandyMachine {
        candy_machine: candy_account.pubkey(),
        wallet: settings.wallet,
        authority: payer,
        payer,
        system_program: system_program::id(),
        rent: sysvar::rent::ID,
    }
    .to_account_metas(None);

    // the payment token mint goes in the remaining accounts
    if let Some(token_mint) = settings.token_mint {
        accounts.push(AccountMeta::new_readonly(token_mint, false));
    }

    let initialize_ix = Instruction {
        program_id: CANDY_MACHINE_ID,
        accounts,
        data: nft_instruction::InitializeCandyMachine {
            data: candy_machine_data,
        }
        .data(),
    };

    program.send_instructions(vec![create_account_ix, initialize_ix], &[candy_account])
}

/// Creates a new candy machine account for `items_available` items and
/// returns its address.
pub fn create_candy_machine(
    program: &dyn CandyProgram,
    settings: &CandySettings,
    details: &CollectionDetails,
    items_available: u64,
) -> Result<Pubkey> {
    let spinner = spinner_with_style();
    spinner.set_message("Creating candy machine...");

    let candy_keypair = Keypair::new();
    let candy_pubkey = candy_keypair.pubkey();

    let uuid = uuid_from_pubkey(&candy_pubkey);
    let candy_data = create_candy_machine_data(settings, details, items_available, uuid);

    match initialize_candy_machine(program, &candy_keypair, candy_data, settings) {
        Ok(sig) => {
            info!("initialize_candy_machine signature: {}", sig);
            spinner.finish_with_message(format!(
                "Candy machine ID: {}",
                style(candy_pubkey).green()
            ));
            Ok(candy_pubkey)
        }
        Err(err) => {
            spinner.finish_with_message(format!("{}", style("Candy machine creation failed").red()));
            error!("Error deploying config to Solana network: {}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CandySettings {
        CandySettings {
            price: 1_000_000_000,
            wallet: Pubkey::new_unique(),
            token_mint: None,
            go_live_date: Some(1640390400),
            end_settings: None,
            whitelist_mint_settings: None,
            hidden_settings: None,
            gatekeeper: None,
            retain_authority: true,
            is_mutable: false,
        }
    }

    #[test]
    fn data_carries_settings_and_details() {
        let creators = [Creator {
            address: Some(Pubkey::new_unique().to_string()),
            share: 100,
        }];
        let details = CollectionDetails::new("NB", 500, &creators).unwrap();

        let data = create_candy_machine_data(&settings(), &details, 10, "AbC123".to_string());

        assert_eq!(data.uuid, "AbC123");
        assert_eq!(data.items_available, 10);
        assert_eq!(data.price, 1_000_000_000);
        assert_eq!(data.symbol, "NB");
        assert_eq!(data.seller_fee_basis_points, 500);
        assert_eq!(data.max_supply, 0);
        assert!(data.retain_authority);
        assert!(!data.is_mutable);
        assert_eq!(data.go_live_date, Some(1640390400));
        assert_eq!(data.creators.len(), 1);
    }

    #[test]
    fn details_validate_symbol_and_fees() {
        let creators = [Creator {
            address: Some(Pubkey::new_unique().to_string()),
            share: 100,
        }];

        assert!(CollectionDetails::new("WAYTOOLONGSYMBOL", 500, &creators).is_err());
        assert!(CollectionDetails::new("NB", 10001, &creators).is_err());
    }
}
