use thiserror::Error;

#[derive(Debug, Error)]
pub enum MintError {
    #[error("Candy machine {0} has no items left to mint")]
    CandyMachineEmpty(String),

    #[error("The number of tokens to mint must be greater than zero")]
    InvalidNumber,

    #[error("Mint {0} of {1} failed: {2}")]
    MintFailed(u64, u64, String),
}
