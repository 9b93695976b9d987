pub use anchor_client::solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction, system_program, sysvar,
};
pub use anchor_lang::{InstructionData, ToAccountMetas};
pub use anyhow::{anyhow, Result};
pub use std::{
    fs::File,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};
pub use tracing::{debug, error, info, warn};

pub use mpl_candy_machine::accounts as nft_accounts;
pub use mpl_candy_machine::instruction as nft_instruction;
pub use mpl_candy_machine::{CandyMachine, WhitelistMintMode};

pub use crate::cache::{Cache, CacheItem};
pub use crate::candy_machine::{CandyProgram, CANDY_MACHINE_ID};
pub use crate::constants::*;
pub use crate::errors::*;
pub use crate::parse::path_to_string;
pub use crate::setup::{setup_client, CandySetup};
