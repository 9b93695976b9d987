use console::Emoji;
pub use mpl_token_metadata::state::{
    MAX_CREATOR_LEN, MAX_CREATOR_LIMIT, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH,
};

pub const CANDY_MACHINE_V2: &str = "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ";
pub const CIVIC: &str = "gatem74V238djXdzWnJf94Wo1DcnuGkfijbf3AuBhfs";

pub const CONFIG_ARRAY_START: usize = 8 + // key
32 + // authority
32 + //wallet
33 + // token mint
4 + 6 + // uuid
8 + // price
8 + // items available
9 + // go live
10 + // end settings
4 + MAX_SYMBOL_LENGTH + // u32 len + symbol
2 + // seller fee basis points
4 + MAX_CREATOR_LIMIT*MAX_CREATOR_LEN + // optional + u32 len + actual vec
8 + //max supply
1 + // is mutable
1 + // retain authority
1 + // option for hidden setting
4 + MAX_NAME_LENGTH + // name length,
4 + MAX_URI_LENGTH + // uri length,
32 + // hash
4 +  // max number of lines;
8 + // items redeemed
1 + // whitelist option
1 + // whitelist mint mode
1 + // allow presale
9 + // discount price
32 + // mint key for whitelist
1 + 32 + 1 // gatekeeper
;

pub const CONFIG_LINE_SIZE: usize = 4 + MAX_NAME_LENGTH + 4 + MAX_URI_LENGTH;
pub const STRING_LEN_SIZE: usize = 4;

pub const MINT_LAYOUT: u64 = 82;

/// Directory holding the cache files, relative to the working directory.
pub const CACHE_PATH: &str = "./.cache";

pub const DEFAULT_ENV: &str = "devnet";
pub const DEFAULT_CACHE_NAME: &str = "temp";
pub const DEFAULT_KEYPAIR: &str = "~/.config/solana/id.json";

/// Max number of `add_config_lines` requests in flight.
pub const DEFAULT_RATE_LIMIT: usize = 5;

/// Pause after a failed config line batch, in milliseconds.
pub const WRITE_INDICES_BACKOFF_MS: u64 = 5000;

pub const LOG_FILE: &str = "candy-cli.log";

// transaction size estimate (bytes) for mint_nft
pub const MINT_TX_BASE_SIZE: usize = 892;
pub const MINT_TX_COLLECTION_SIZE: usize = 182;
pub const MINT_TX_TOKEN_MINT_SIZE: usize = 177;
pub const MINT_TX_WHITELIST_SIZE: usize = 33;
pub const MINT_TX_WHITELIST_BURN_SIZE: usize = 145;
pub const MINT_TX_GATEKEEPER_SIZE: usize = 33;
pub const MINT_TX_GATEKEEPER_EXPIRE_SIZE: usize = 66;

pub const CANDY_EMOJI: Emoji<'_, '_> = Emoji("🍬 ", "");
pub const ASSETS_EMOJI: Emoji<'_, '_> = Emoji("🗂  ", "");
pub const PAPER_EMOJI: Emoji<'_, '_> = Emoji("📝 ", "");
pub const COLLECTION_EMOJI: Emoji<'_, '_> = Emoji("📦 ", "");
pub const COMPLETE_EMOJI: Emoji<'_, '_> = Emoji("✅ ", "");
pub const ERROR_EMOJI: Emoji<'_, '_> = Emoji("🛑 ", "");
