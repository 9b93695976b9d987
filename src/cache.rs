use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anchor_client::solana_sdk::pubkey::Pubkey;
use anyhow::Result;
use indexmap::IndexMap;
use mpl_candy_machine::ConfigLine;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{candy_machine::uuid_from_pubkey, errors::CacheError, parse::path_to_string};

/// Local record of a deployment, used to resume uploads and to mint.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Cache {
    pub program: CacheProgram,
    #[serde(default)]
    pub items: CacheItems,
    #[serde(default)]
    pub env: String,
    #[serde(rename = "cacheName", default)]
    pub cache_name: String,
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(file_path: P, env: &str, cache_name: &str) -> Self {
        Cache {
            program: CacheProgram::default(),
            items: CacheItems::default(),
            env: env.to_string(),
            cache_name: cache_name.to_string(),
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Writes the cache to its file, creating the cache directory if needed.
    pub fn sync_file(&mut self) -> Result<()> {
        let file_path = self.file_path.clone();
        self.write_to_file(file_path)
    }

    pub fn write_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut f = File::create(path)?;
        self.items.0.sort_keys();
        let c = serde_json::to_string(&self)?;
        f.write_all(c.as_bytes())?;

        Ok(())
    }

    /// Candy machine address recorded in the cache, if any.
    pub fn candy_machine(&self) -> Result<Option<Pubkey>> {
        if self.program.candy_machine.is_empty() {
            return Ok(None);
        }

        self.program
            .candy_machine
            .parse::<Pubkey>()
            .map(Some)
            .map_err(|_| {
                CacheError::InvalidCandyMachineAddress(self.program.candy_machine.clone()).into()
            })
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CacheProgram {
    #[serde(default)]
    pub uuid: String,
    #[serde(rename = "candyMachine")]
    pub candy_machine: String,
    #[serde(rename = "collectionMint", default)]
    pub collection_mint: String,
}

impl CacheProgram {
    pub fn new_from_cm(candy_machine: &Pubkey) -> Self {
        CacheProgram {
            uuid: uuid_from_pubkey(candy_machine),
            candy_machine: candy_machine.to_string(),
            collection_mint: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CacheItems(pub IndexMap<String, CacheItem>);

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheItem {
    pub name: String,
    pub link: String,
    #[serde(rename = "onChain")]
    pub on_chain: bool,
}

impl CacheItem {
    pub fn to_config_line(&self) -> Option<ConfigLine> {
        if !self.on_chain {
            Some(ConfigLine {
                name: self.name.clone(),
                uri: self.link.clone(),
            })
        } else {
            None
        }
    }
}

/// `<cache_dir>/<env>-<cache_name>.json`
pub fn cache_path<P: AsRef<Path>>(cache_dir: P, env: &str, cache_name: &str) -> PathBuf {
    cache_dir
        .as_ref()
        .join(format!("{}-{}.json", env, cache_name))
}

/// Loads the cache of `env`/`cache_name`. When the file does not exist an
/// empty cache is returned if `create` is set, otherwise it is an error.
pub fn load_cache<P: AsRef<Path>>(
    cache_dir: P,
    env: &str,
    cache_name: &str,
    create: bool,
) -> Result<Cache> {
    let cache_file_path = cache_path(cache_dir, env, cache_name);

    if !cache_file_path.exists() {
        if create {
            info!("No cache found at {:?}, starting a new one", cache_file_path);
            return Ok(Cache::new(&cache_file_path, env, cache_name));
        }

        let cache_file_string = path_to_string(&cache_file_path)?;
        let error = CacheError::CacheFileNotFound(cache_file_string).into();
        error!("{:?}", error);
        return Err(error);
    }

    info!("Cache exists, loading...");
    let file = match File::open(&cache_file_path) {
        Ok(file) => file,
        Err(err) => {
            let cache_file_string = path_to_string(&cache_file_path)?;
            let error =
                CacheError::FailedToOpenCacheFile(cache_file_string, err.to_string()).into();
            error!("{:?}", error);
            return Err(error);
        }
    };

    let mut cache: Cache = match serde_json::from_reader(file) {
        Ok(cache) => cache,
        Err(err) => {
            let error = CacheError::CacheFileWrongFormat(err.to_string()).into();
            error!("{:?}", error);
            return Err(error);
        }
    };
    cache.file_path = cache_file_path;

    Ok(cache)
}
