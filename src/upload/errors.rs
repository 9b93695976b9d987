use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid assets directory: {0}")]
    InvalidAssetsDirectory(String),

    #[error("The \"arweave\" storage option is incompatible with animation files. Please use another storage option")]
    AnimationsNotSupported,

    #[error("number of animation files ({0}) is different than the number of json files ({1})")]
    AnimationCountMismatch(usize, usize),

    #[error("number of img files ({0}) is different than the number of json files ({1})")]
    ImageCountMismatch(usize, usize),

    #[error("max number ({0}) cannot be smaller than the number of images in the source folder ({1})")]
    NumberTooSmall(u64, usize),

    #[error("No metadata files found in the assets directory")]
    NoMetadataFiles,

    #[error("A base uri ('baseUri') must be set in the config file to build the metadata links")]
    MissingBaseUri,

    #[error("Couldn't parse filename '{0}' to a valid index number")]
    InvalidFileName(String),

    #[error("Metadata files must be numbered without gaps: expected index {0}, found '{1}'")]
    NonContiguousIndex(u64, String),

    #[error("Invalid metadata file {0}: {1}")]
    InvalidMetadata(String, String),
}
