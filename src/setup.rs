use std::sync::Arc;

use anchor_client::{
    solana_sdk::{
        commitment_config::CommitmentConfig,
        signature::{read_keypair_file, Keypair, Signer},
    },
    Client, Cluster as AnchorCluster,
};
use anyhow::Result;
use tracing::info;

use crate::{
    candy_machine::{AnchorCandyProgram, CandyProgram, CANDY_MACHINE_ID},
    config::data::Cluster,
    constants::DEFAULT_KEYPAIR,
    errors::SetupError,
};

/// Wallet and connection settings shared by all commands.
pub struct CandySetup {
    pub keypair: Arc<Keypair>,
    pub rpc_url: String,
    pub cluster: Cluster,
}

/// Reads a JSON keypair file. `~` is expanded; without a path the default
/// Solana CLI location is used.
pub fn load_wallet_key(keypair: Option<&str>) -> Result<Keypair> {
    let keypair_path = match keypair {
        Some(path) if path.trim().is_empty() => return Err(SetupError::MissingKeypair.into()),
        Some(path) => path,
        None => DEFAULT_KEYPAIR,
    };

    let keypair_path = shellexpand::tilde(keypair_path).to_string();
    let loaded = read_keypair_file(&keypair_path)
        .map_err(|err| SetupError::InvalidKeypair(keypair_path.clone(), err.to_string()))?;

    info!("wallet public key: {}", loaded.pubkey());
    Ok(loaded)
}

pub fn candy_setup(
    keypair_opt: Option<String>,
    env: &str,
    rpc_url_opt: Option<String>,
) -> Result<CandySetup> {
    let cluster: Cluster = env.parse()?;

    let rpc_url = match rpc_url_opt {
        Some(rpc_url) => {
            info!("USING CUSTOM URL {}", rpc_url);
            rpc_url
        }
        None => cluster.url().to_string(),
    };

    let keypair = load_wallet_key(keypair_opt.as_deref())?;

    Ok(CandySetup {
        keypair: Arc::new(keypair),
        rpc_url,
        cluster,
    })
}

pub fn setup_client(candy_setup: &CandySetup) -> Result<Client<Arc<Keypair>>> {
    let rpc_url = candy_setup.rpc_url.clone();
    let ws_url = rpc_url.replace("http", "ws");
    let cluster = AnchorCluster::Custom(rpc_url, ws_url);

    let opts = CommitmentConfig::confirmed();
    Ok(Client::new_with_options(
        cluster,
        candy_setup.keypair.clone(),
        opts,
    ))
}

/// Client handle for the candy machine program.
pub fn setup_program(candy_setup: &CandySetup) -> Result<Arc<dyn CandyProgram>> {
    let client = setup_client(candy_setup)?;
    let program = client.program(CANDY_MACHINE_ID);

    tracing::debug!("program id from anchor {}", program.id());
    Ok(Arc::new(AnchorCandyProgram::new(program)))
}
