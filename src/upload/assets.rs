use std::fs;

use crate::{
    common::*,
    config::data::StorageType,
    upload::errors::UploadError,
    validate::{
        format::Metadata,
        parser::{check_name, check_url},
    },
};

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "gif", "jpg", "jpeg"];
const ANIMATION_EXTENSIONS: [&str; 7] = ["mp4", "mov", "mp3", "flac", "wav", "glb", "html"];
const METADATA_EXTENSION: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Animation,
    Metadata,
}

/// Kind of asset based on the file extension (case insensitive).
pub fn asset_kind(path: &Path) -> Option<AssetKind> {
    let extension = path.extension()?.to_str()?.to_lowercase();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(AssetKind::Image)
    } else if ANIMATION_EXTENSIONS.contains(&extension.as_str()) {
        Some(AssetKind::Animation)
    } else if extension == METADATA_EXTENSION {
        Some(AssetKind::Metadata)
    } else {
        None
    }
}

/// Supported files of an assets directory, grouped by kind.
#[derive(Debug, Default)]
pub struct AssetFiles {
    pub images: Vec<PathBuf>,
    pub animations: Vec<PathBuf>,
    /// Sorted by the index in the file name.
    pub metadata: Vec<PathBuf>,
}

impl AssetFiles {
    pub fn from_dir<P: AsRef<Path>>(assets_dir: P) -> Result<Self> {
        let assets_dir = assets_dir.as_ref();
        let entries = fs::read_dir(assets_dir)
            .map_err(|_| UploadError::InvalidAssetsDirectory(assets_dir.display().to_string()))?;

        let mut files = AssetFiles::default();

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');

            // filters out directories and hidden files
            if hidden || !path.is_file() {
                continue;
            }

            match asset_kind(&path) {
                Some(AssetKind::Image) => files.images.push(path),
                Some(AssetKind::Animation) => files.animations.push(path),
                Some(AssetKind::Metadata) => files.metadata.push(path),
                None => warn!("Skipping unsupported file type {:?}", path),
            }
        }

        let mut indexed = files
            .metadata
            .into_iter()
            .map(|path| Ok((file_index(&path)?, path)))
            .collect::<Result<Vec<(u64, PathBuf)>, UploadError>>()?;
        indexed.sort_by_key(|(index, _)| *index);

        if let Some((first, _)) = indexed.first() {
            for (expected, (index, path)) in (*first..).zip(&indexed) {
                if *index != expected {
                    return Err(UploadError::NonContiguousIndex(
                        expected,
                        path.display().to_string(),
                    )
                    .into());
                }
            }
        }

        files.metadata = indexed.into_iter().map(|(_, path)| path).collect();

        Ok(files)
    }

    /// Checks the file counts and returns the number of items available.
    pub fn check_counts(&self, storage: StorageType, number: Option<u64>) -> Result<u64, UploadError> {
        let image_count = self.images.len();
        let animation_count = self.animations.len();
        let json_count = self.metadata.len();

        if animation_count != 0 && storage == StorageType::Arweave {
            return Err(UploadError::AnimationsNotSupported);
        }

        if animation_count != 0 && animation_count != json_count {
            return Err(UploadError::AnimationCountMismatch(animation_count, json_count));
        } else if image_count != json_count {
            return Err(UploadError::ImageCountMismatch(image_count, json_count));
        }

        let elem_count = number.unwrap_or(image_count as u64);
        if elem_count < image_count as u64 {
            return Err(UploadError::NumberTooSmall(elem_count, image_count));
        }

        if animation_count == 0 {
            info!("Beginning the upload for {} (img+json) pairs", elem_count);
        } else {
            info!("Beginning the upload for {} (img+animation+json) sets", elem_count);
        }

        Ok(elem_count)
    }
}

/// Index of an asset, taken from its file name (`<index>.<ext>`).
pub fn file_index(path: &Path) -> Result<u64, UploadError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse::<u64>().ok())
        .ok_or_else(|| {
            let error = UploadError::InvalidFileName(file_name);
            error!("{:?}", error);
            error
        })
}

/// Reads and checks the metadata files in order.
pub fn read_metadata_files(files: &[PathBuf]) -> Result<Vec<Metadata>> {
    if files.is_empty() {
        return Err(UploadError::NoMetadataFiles.into());
    }

    files
        .iter()
        .map(|path| -> Result<Metadata> {
            let file_name = path_to_string(path)?;
            let file = File::open(path)
                .map_err(|err| UploadError::InvalidMetadata(file_name.clone(), err.to_string()))?;
            let metadata: Metadata = serde_json::from_reader(file)
                .map_err(|err| UploadError::InvalidMetadata(file_name.clone(), err.to_string()))?;

            metadata
                .validate()
                .map_err(|err| UploadError::InvalidMetadata(file_name, err.to_string()))?;

            Ok(metadata)
        })
        .collect()
}

/// Cache items for the metadata files. Keys are the config line positions;
/// links use the index in each file name.
pub fn metadata_to_cache_items(
    files: &[PathBuf],
    metadata: &[Metadata],
    base_uri: &str,
) -> Result<Vec<(String, CacheItem)>> {
    let base_uri = base_uri.trim_end_matches('/');

    files
        .iter()
        .zip(metadata)
        .enumerate()
        .map(|(position, (path, metadata))| -> Result<(String, CacheItem)> {
            let link = format!("{}/{}", base_uri, file_index(path)?);
            check_name(&metadata.name)?;
            check_url(&link)?;

            Ok((
                position.to_string(),
                CacheItem {
                    name: metadata.name.clone(),
                    link,
                    on_chain: false,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn files_are_grouped_by_extension() {
        assert_eq!(asset_kind(Path::new("0.PNG")), Some(AssetKind::Image));
        assert_eq!(asset_kind(Path::new("0.jpeg")), Some(AssetKind::Image));
        assert_eq!(asset_kind(Path::new("0.glb")), Some(AssetKind::Animation));
        assert_eq!(asset_kind(Path::new("0.json")), Some(AssetKind::Metadata));
        assert_eq!(asset_kind(Path::new("notes.txt")), None);
        assert_eq!(asset_kind(Path::new("README")), None);
    }

    #[test]
    fn metadata_sorted_by_index() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10.json", "9.json", "8.json", "1.png", ".hidden.json", "notes.txt"] {
            touch(dir.path(), name, "{}");
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = AssetFiles::from_dir(dir.path()).unwrap();
        let names: Vec<String> = files
            .metadata
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["8.json", "9.json", "10.json"]);
        assert_eq!(files.images.len(), 1);
        assert!(files.animations.is_empty());
    }

    #[test]
    fn metadata_names_must_be_indices() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "0.json", "{}");
        touch(dir.path(), "cover.json", "{}");

        let err = AssetFiles::from_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::InvalidFileName(name)) if name == "cover.json"
        ));
    }

    #[test]
    fn gaps_in_the_metadata_indices_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "0.json", "{}");
        touch(dir.path(), "2.json", "{}");

        let err = AssetFiles::from_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::NonContiguousIndex(1, _))
        ));
    }

    #[test]
    fn counts_must_match() {
        let files = AssetFiles {
            images: vec![PathBuf::from("0.png"), PathBuf::from("1.png")],
            animations: vec![],
            metadata: vec![PathBuf::from("0.json")],
        };
        assert!(matches!(
            files.check_counts(StorageType::Aws, None),
            Err(UploadError::ImageCountMismatch(2, 1))
        ));

        let files = AssetFiles {
            images: vec![PathBuf::from("0.png")],
            animations: vec![PathBuf::from("0.mp4")],
            metadata: vec![PathBuf::from("0.json")],
        };
        assert!(matches!(
            files.check_counts(StorageType::Arweave, None),
            Err(UploadError::AnimationsNotSupported)
        ));
        assert_eq!(files.check_counts(StorageType::Ipfs, None).unwrap(), 1);
        assert_eq!(files.check_counts(StorageType::Ipfs, Some(5)).unwrap(), 5);
    }

    #[test]
    fn number_cannot_be_smaller_than_the_images() {
        let files = AssetFiles {
            images: vec![PathBuf::from("0.png"), PathBuf::from("1.png")],
            animations: vec![],
            metadata: vec![PathBuf::from("0.json"), PathBuf::from("1.json")],
        };
        assert!(matches!(
            files.check_counts(StorageType::Aws, Some(1)),
            Err(UploadError::NumberTooSmall(1, 2))
        ));
    }

    #[test]
    fn cache_items_link_to_the_file_index() {
        let files = vec![PathBuf::from("1.json"), PathBuf::from("2.json")];
        let metadata = vec![
            Metadata {
                name: "One".to_string(),
                ..Default::default()
            },
            Metadata {
                name: "Two".to_string(),
                ..Default::default()
            },
        ];

        let items = metadata_to_cache_items(&files, &metadata, "https://example.com/ipfs/").unwrap();

        assert_eq!(items[0].0, "0");
        assert_eq!(items[0].1.link, "https://example.com/ipfs/1");
        assert_eq!(items[1].0, "1");
        assert_eq!(items[1].1.link, "https://example.com/ipfs/2");
        assert_eq!(items[1].1.name, "Two");
        assert!(!items[0].1.on_chain);
    }
}
