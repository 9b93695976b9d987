use clap::{AppSettings, Args, Parser, Subcommand};

use crate::constants::{DEFAULT_CACHE_NAME, DEFAULT_ENV};

#[derive(Parser)]
#[clap(author, version, about)]
#[clap(setting(AppSettings::SubcommandRequiredElseHelp))]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error, off
    #[clap(short, long, global = true)]
    pub log_level: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Solana cluster env name: mainnet-beta, testnet or devnet
    #[clap(short, long, default_value = DEFAULT_ENV)]
    pub env: String,

    /// Path to the keypair file, defaults to "~/.config/solana/id.json"
    #[clap(short, long)]
    pub keypair: Option<String>,

    /// Cache file name, the cache is stored in ".cache/<env>-<cache-name>.json"
    #[clap(short, long, default_value = DEFAULT_CACHE_NAME)]
    pub cache_name: String,

    /// Custom RPC url, overrides the env url
    #[clap(short, long)]
    pub rpc_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CollectionArgs {
    /// Max number of add_config_lines requests in flight
    #[clap(long, default_value = "5")]
    pub rate_limit: usize,

    /// Collection mint to set on the candy machine
    #[clap(short = 'm', long)]
    pub collection_mint: Option<String>,

    /// Do not set the collection even if a collection mint is given
    #[clap(long)]
    pub no_set_collection_mint: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a candy machine from a config file
    #[clap(name = "deploy")]
    Deploy {
        #[clap(flatten)]
        common: CommonArgs,

        /// Path to the JSON config file
        #[clap(long)]
        config_path: String,

        #[clap(flatten)]
        collection: CollectionArgs,
    },

    /// Register the assets of a directory as config lines of a candy machine
    #[clap(name = "upload")]
    Upload {
        /// Assets directory (images, animations and their JSON metadata)
        directory: String,

        #[clap(flatten)]
        common: CommonArgs,

        /// Path to the JSON config file
        #[clap(long)]
        config_path: String,

        #[clap(flatten)]
        collection: CollectionArgs,
    },

    /// Mint one NFT from the candy machine in the cache
    #[clap(name = "mint_one_token")]
    MintOneToken {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Mint several NFTs from the candy machine in the cache
    #[clap(name = "mint_multiple_tokens")]
    MintMultipleTokens {
        #[clap(flatten)]
        common: CommonArgs,

        /// Number of NFTs to mint
        #[clap(short, long)]
        number: u64,
    },
}
