use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing the config file: {0}")]
    ParseError(String),

    #[error("Error opening the config file: {0}")]
    FileOpenError(String),

    #[error("Invalid cluster: {0}. Use 'mainnet-beta', 'testnet' or 'devnet'")]
    InvalidCluster(String),

    #[error("Storage option must either be {0}. Got: {1}")]
    InvalidStorage(String, String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid price: {0}. Prices cannot be negative")]
    InvalidPrice(f64),

    #[error("Invalid end settings: {0}")]
    InvalidEndSettings(String),

    #[error("Invalid whitelist mint mode, use either 'burnEveryTime' or 'neverBurn'")]
    InvalidWhitelistMintMode,

    #[error("Hidden settings hash has to be 32 characters long, found {0}")]
    InvalidHiddenSettingsHash(usize),

    #[error("If spl-token-account or spl-token is set then sol-treasury-account cannot be set")]
    TreasuryConflict,

    #[error("If spl-token-account is set, spl-token must also be set")]
    MissingSplToken,
}
