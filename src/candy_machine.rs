use std::sync::Arc;

use anchor_client::{
    solana_sdk::{
        commitment_config::CommitmentConfig,
        instruction::Instruction,
        pubkey::Pubkey,
        signature::{Keypair, Signature},
    },
    Program,
};
use anchor_lang::AccountDeserialize;
use anyhow::{anyhow, Result};
pub use mpl_candy_machine::ID as CANDY_MACHINE_ID;
use mpl_candy_machine::{CandyMachine, CandyMachineData, CollectionPDA};

use crate::{
    constants::{CONFIG_ARRAY_START, CONFIG_LINE_SIZE},
    deploy::errors::DeployError,
};

/// Remote surface of the candy machine program used by the commands.
///
/// Every network interaction goes through this trait, so anything that runs
/// before the first call on it is guaranteed to be local.
pub trait CandyProgram: Send + Sync {
    /// Wallet paying for (and signing) every transaction.
    fn payer(&self) -> Pubkey;

    /// Raw account data, or `None` when the account does not exist.
    fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;

    fn get_balance(&self, address: &Pubkey) -> Result<u64>;

    fn get_minimum_balance_for_rent_exemption(&self, size: usize) -> Result<u64>;

    /// Sends the instructions in a single transaction signed by the payer and
    /// the additional `signers`.
    fn send_instructions(
        &self,
        instructions: Vec<Instruction>,
        signers: &[&Keypair],
    ) -> Result<Signature>;
}

/// [`CandyProgram`] backed by an anchor client connected to a cluster.
pub struct AnchorCandyProgram {
    program: Program<Arc<Keypair>>,
    commitment: CommitmentConfig,
}

impl AnchorCandyProgram {
    pub fn new(program: Program<Arc<Keypair>>) -> Self {
        AnchorCandyProgram {
            program,
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

impl CandyProgram for AnchorCandyProgram {
    fn payer(&self) -> Pubkey {
        self.program.payer()
    }

    fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let account = self
            .program
            .rpc()
            .get_account_with_commitment(address, self.commitment)?
            .value;

        Ok(account.map(|account| account.data))
    }

    fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        Ok(self.program.rpc().get_balance(address)?)
    }

    fn get_minimum_balance_for_rent_exemption(&self, size: usize) -> Result<u64> {
        Ok(self
            .program
            .rpc()
            .get_minimum_balance_for_rent_exemption(size)?)
    }

    fn send_instructions(
        &self,
        instructions: Vec<Instruction>,
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let mut builder = self.program.request();

        for instruction in instructions {
            builder = builder.instruction(instruction);
        }

        for signer in signers {
            builder = builder.signer(*signer);
        }

        Ok(builder.send()?)
    }
}

pub fn get_candy_machine_state(
    program: &dyn CandyProgram,
    candy_machine_id: &Pubkey,
) -> Result<CandyMachine> {
    let data = program
        .get_account_data(candy_machine_id)?
        .ok_or_else(|| anyhow!("Candy machine account not found: {}", candy_machine_id))?;

    let candy_machine = CandyMachine::try_deserialize(&mut data.as_slice())?;
    Ok(candy_machine)
}

pub fn get_collection_pda_state(
    program: &dyn CandyProgram,
    collection_pda: &Pubkey,
) -> Result<Option<CollectionPDA>> {
    match program.get_account_data(collection_pda)? {
        Some(data) if !data.is_empty() => {
            Ok(Some(CollectionPDA::try_deserialize(&mut data.as_slice())?))
        }
        _ => Ok(None),
    }
}

pub fn uuid_from_pubkey(pubkey: &Pubkey) -> String {
    pubkey.to_string()[0..6].to_string()
}

/// Size of the candy machine account for the given data.
pub fn get_space_for_candy(data: &CandyMachineData) -> Result<usize> {
    if data.hidden_settings.is_some() {
        return Ok(CONFIG_ARRAY_START);
    }

    let overflow = || DeployError::TooManyItems(data.items_available);
    let items = usize::try_from(data.items_available).map_err(|_| overflow())?;

    let space = items
        .checked_mul(CONFIG_LINE_SIZE)
        .and_then(|lines| lines.checked_add(CONFIG_ARRAY_START + 4 + 8))
        .and_then(|space| {
            (items / 8 + 1)
                .checked_mul(2)
                .and_then(|mint_bits| space.checked_add(mint_bits))
        })
        .ok_or_else(overflow)?;

    Ok(space)
}

#[cfg(test)]
mod tests {
    use mpl_candy_machine::HiddenSettings;

    use super::*;

    #[test]
    fn uuid_is_the_address_prefix() {
        let pubkey = Pubkey::new_unique();
        let uuid = uuid_from_pubkey(&pubkey);

        assert_eq!(uuid.len(), 6);
        assert!(pubkey.to_string().starts_with(&uuid));
    }

    #[test]
    fn space_grows_with_items() {
        let data = CandyMachineData {
            items_available: 10,
            ..Default::default()
        };

        assert_eq!(
            get_space_for_candy(&data).unwrap(),
            CONFIG_ARRAY_START + 4 + 10 * CONFIG_LINE_SIZE + 8 + 2 * 2
        );
    }

    #[test]
    fn hidden_settings_only_need_the_header() {
        let data = CandyMachineData {
            items_available: 1000,
            hidden_settings: Some(HiddenSettings {
                name: "Hidden".to_string(),
                uri: "https://example.com/hidden.json".to_string(),
                hash: [0; 32],
            }),
            ..Default::default()
        };

        assert_eq!(get_space_for_candy(&data).unwrap(), CONFIG_ARRAY_START);
    }

    #[test]
    fn oversized_item_count_is_an_error() {
        let data = CandyMachineData {
            items_available: u64::MAX,
            ..Default::default()
        };

        let err = get_space_for_candy(&data).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::TooManyItems(u64::MAX))
        ));
    }
}
