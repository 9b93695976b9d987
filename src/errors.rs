use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Error setting up candy-cli: {0}")]
    CandySetupError(String),

    #[error("Keypair is required!")]
    MissingKeypair,

    #[error("Failed to read keypair file '{0}': {1}")]
    InvalidKeypair(String, String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file '{0}' not found. Run `candy-cli upload` or `candy-cli deploy` to create it or provide it with the --cache-name option.")]
    CacheFileNotFound(String),

    #[error("Invalid candy machine address: {0}")]
    InvalidCandyMachineAddress(String),

    #[error("Failed to open cache file: {0} with error: {1}")]
    FailedToOpenCacheFile(String, String),

    #[error("Failed to parse cache file with error: {0}")]
    CacheFileWrongFormat(String),
}
