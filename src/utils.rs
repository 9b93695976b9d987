use anchor_client::solana_sdk::{
    program_pack::{IsInitialized, Pack},
    pubkey::Pubkey,
};
pub use anyhow::{anyhow, Result};
pub use indicatif::{ProgressBar, ProgressStyle};
use spl_token::state::{Account, Mint};

use crate::{candy_machine::CandyProgram, constants::MINT_LAYOUT};

/// Check that the mint token is a valid address.
pub fn check_spl_token(program: &dyn CandyProgram, mint: &Pubkey) -> Result<Mint> {
    let token_data = program
        .get_account_data(mint)?
        .ok_or_else(|| anyhow!("The specified spl-token does not exist: {}", mint))?;

    if token_data.len() != MINT_LAYOUT as usize {
        return Err(anyhow!("Invalid spl-token passed in: {}", mint));
    }
    let token_mint = Mint::unpack_from_slice(&token_data)?;

    if token_mint.is_initialized {
        Ok(token_mint)
    } else {
        Err(anyhow!(
            "The specified spl-token is not initialized: {}",
            mint
        ))
    }
}

/// Check that the mint token account is a valid account.
pub fn check_spl_token_account(program: &dyn CandyProgram, account: &Pubkey) -> Result<Account> {
    let ata_data = program
        .get_account_data(account)?
        .ok_or_else(|| anyhow!("The specified spl-token account does not exist: {}", account))?;
    let ata_account = Account::unpack_unchecked(&ata_data)?;

    if IsInitialized::is_initialized(&ata_account) {
        Ok(ata_account)
    } else {
        Err(anyhow!(
            "The specified spl-token account is not initialized: {}",
            account
        ))
    }
}

pub fn spinner_with_style() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(120);
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "▹▹▹▹▹",
                "▸▹▹▹▹",
                "▹▸▹▹▹",
                "▹▹▸▹▹",
                "▹▹▹▸▹",
                "▹▹▹▹▸",
                "▪▪▪▪▪",
            ])
            .template("{spinner:.dim} {msg}"),
    );
    pb
}

pub fn progress_bar_with_style(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    // forces the progress bar to show immediately
    pb.tick();
    pb.enable_steady_tick(1000);
    pb.set_style(
        ProgressStyle::default_bar().template("[{elapsed_precise}] {msg}{wide_bar} {pos}/{len}"),
    );
    pb
}
