use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Missing metadata link for cache item {0}")]
    MissingMetadataLink(String),
    #[error("Missing name for cache item {0}")]
    MissingName(String),
    #[error("{0}")]
    AddConfigLineFailed(String),
    #[error(
        "Your current wallet balance of {0} SOL is not enough. {1} SOL is needed to deploy the candy machine."
    )]
    BalanceTooLow(String, String),
    #[error("The number of items available ('number') must be set in the config file")]
    MissingItemsAvailable,
    #[error("Too many items available ({0}): the candy machine account size overflows")]
    TooManyItems(u64),
    #[error("Invalid collection mint '{0}'")]
    InvalidCollectionMint(String),
    #[error("The collection update authority {0} does not match the wallet {1}")]
    InvalidCollectionUpdateAuthority(String, String),
}
