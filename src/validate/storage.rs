use tracing::warn;

use crate::{
    config::data::{Cluster, ConfigData, StorageType},
    validate::errors::ValidateError,
};

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |value| value.trim().is_empty())
}

/// Checks that the storage selected in the config can be used on `cluster`
/// with the credentials provided. Returns the parsed storage type.
pub fn check_storage(config_data: &ConfigData, cluster: Cluster) -> Result<StorageType, ValidateError> {
    let storage_name = config_data.storage.clone().unwrap_or_default();

    let storage = storage_name.parse::<StorageType>().map_err(|_| {
        let options = StorageType::ALL
            .iter()
            .map(StorageType::as_str)
            .collect::<Vec<&str>>()
            .join(", ");
        ValidateError::UnsupportedStorage(options, storage_name.clone())
    })?;

    match storage {
        StorageType::ArweaveSol if !cluster.is_mainnet() => {
            warn!("On {}, the arweave-sol storage option only stores your files for 1 week. Please upload via mainnet-beta for your final collection.", cluster);
        }
        StorageType::ArweaveBundle => {
            if !cluster.is_mainnet() {
                return Err(ValidateError::ArweaveBundleNotMainnet);
            }
            if is_blank(&config_data.arweave_jwk) {
                return Err(ValidateError::MissingArweaveJwk);
            }
        }
        StorageType::Arweave => {
            warn!("The arweave storage option will be going away soon. Please migrate to arweave-bundle or arweave-sol for mainnet.");
        }
        StorageType::Ipfs => {
            if is_blank(&config_data.ipfs_infura_project_id) || is_blank(&config_data.ipfs_infura_secret) {
                return Err(ValidateError::MissingIpfsCredentials);
            }
        }
        StorageType::Aws => {
            if is_blank(&config_data.aws_s3_bucket) {
                return Err(ValidateError::MissingAwsBucket);
            }
        }
        _ => (),
    }

    Ok(storage)
}
