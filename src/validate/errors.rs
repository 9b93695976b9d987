use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("Name exceeds 32 chars.")]
    NameTooLong,

    #[error("Symbol exceeds 10 chars.")]
    SymbolTooLong,

    #[error("Url exceeds 200 chars.")]
    UrlTooLong,

    #[error("Creator address: '{0}' is invalid.")]
    InvalidCreatorAddress(String),

    #[error("Creator address is missing")]
    MissingCreatorAddress,

    #[error("Combined creators' share does not equal 100%.")]
    InvalidCreatorShare,

    #[error("Seller fee basis points value '{0}' is invalid: must be between 0 and 10,000.")]
    InvalidSellerFeeBasisPoints(u16),

    #[error("Missing creators field")]
    MissingCreators,

    #[error("Too many creators: {0}, the maximum is {1}")]
    TooManyCreators(usize, usize),

    #[error("The arweave-bundle storage option only works on mainnet. For devnet, please use either arweave, ipfs or aws options")]
    ArweaveBundleNotMainnet,

    #[error("Path to Arweave JWK wallet file (arweaveJwk) must be provided when using arweave-bundle")]
    MissingArweaveJwk,

    #[error("IPFS selected as storage option but Infura project id or secret key were not provided.")]
    MissingIpfsCredentials,

    #[error("AWS selected as storage option but existing bucket name (awsS3Bucket) not provided.")]
    MissingAwsBucket,

    #[error("Storage option must either be {0}. Got: {1}")]
    UnsupportedStorage(String, String),
}
