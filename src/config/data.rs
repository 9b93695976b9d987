use std::{
    fmt::{self, Display},
    str::FromStr,
};

use anchor_client::solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};
pub use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use mpl_candy_machine::{
    EndSettingType as CandyEndSettingType, EndSettings as CandyEndSettings,
    GatekeeperConfig as CandyGatekeeperConfig, HiddenSettings as CandyHiddenSettings,
    WhitelistMintMode as CandyWhitelistMintMode,
    WhitelistMintSettings as CandyWhitelistMintSettings,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::config::errors::*;

/// Decimals of the native token.
pub const SOL_DECIMALS: u8 = 9;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigData {
    pub price: f64,

    /// Number of items available; the upload command falls back to the
    /// number of images found.
    pub number: Option<u64>,

    pub gatekeeper: Option<GatekeeperConfig>,

    #[serde(deserialize_with = "to_option_pubkey")]
    #[serde(serialize_with = "to_option_string")]
    pub sol_treasury_account: Option<Pubkey>,

    #[serde(deserialize_with = "to_option_pubkey")]
    #[serde(serialize_with = "to_option_string")]
    pub spl_token_account: Option<Pubkey>,

    #[serde(deserialize_with = "to_option_pubkey")]
    #[serde(serialize_with = "to_option_string")]
    pub spl_token: Option<Pubkey>,

    pub go_live_date: Option<String>,

    pub end_settings: Option<EndSettings>,

    pub whitelist_mint_settings: Option<WhitelistMintSettings>,

    pub hidden_settings: Option<HiddenSettings>,

    pub storage: Option<String>,

    pub ipfs_infura_project_id: Option<String>,

    pub ipfs_infura_secret: Option<String>,

    pub nft_storage_key: Option<String>,

    pub pinata_jwt: Option<String>,

    pub pinata_gateway: Option<String>,

    pub aws_s3_bucket: Option<String>,

    pub arweave_jwk: Option<String>,

    pub no_retain_authority: bool,

    pub no_mutable: bool,

    pub batch_size: Option<u64>,

    /// Kept for compatibility; the uuid is always derived from the candy
    /// machine address.
    pub uuid: Option<String>,

    pub symbol: String,

    pub seller_fee_basis_points: u16,

    pub creators: Vec<Creator>,

    /// Prefix of the metadata links registered by the upload command.
    pub base_uri: Option<String>,
}

impl ConfigData {
    pub fn retain_authority(&self) -> bool {
        !self.no_retain_authority
    }

    pub fn is_mutable(&self) -> bool {
        !self.no_mutable
    }
}

pub fn to_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn to_option_string<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(&v),
        None => serializer.serialize_none(),
    }
}

fn to_pubkey<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(serde::de::Error::custom)
}

fn to_option_pubkey<'de, D>(deserializer: D) -> Result<Option<Pubkey>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;

    s.map(|s| Pubkey::from_str(&s).map_err(serde::de::Error::custom))
        .transpose()
}

/// Parses a date into a unix timestamp (seconds).
///
/// Accepts `now`, RFC2822 (`25 Dec 2021 00:00:00 GMT`), RFC3339
/// (`2022-02-25T13:00:00Z`), a unix timestamp, or anything `dateparser`
/// understands.
pub fn parse_date(date: &str) -> Result<i64, ConfigError> {
    let date = date.trim();

    if date.eq_ignore_ascii_case("now") {
        Ok(Utc::now().timestamp())
    } else if let Ok(parsed) = DateTime::parse_from_rfc2822(date) {
        Ok(parsed.timestamp())
    } else if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        Ok(parsed.timestamp())
    } else if let Ok(timestamp) = date.parse::<i64>() {
        Ok(timestamp)
    } else {
        dateparser::parse(date)
            .map(|parsed| parsed.timestamp())
            .map_err(|_| ConfigError::InvalidDate(date.to_string()))
    }
}

pub fn go_live_date_as_timestamp(go_live_date: &Option<String>) -> Result<Option<i64>> {
    match go_live_date {
        Some(go_live_date) => Ok(Some(parse_date(go_live_date)?)),
        None => Ok(None),
    }
}

pub fn check_price(price: f64) -> Result<(), ConfigError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrice(price))
    }
}

/// Converts a price expressed in whole tokens into base units.
pub fn price_as_base_units(price: f64, decimals: u8) -> Result<u64, ConfigError> {
    check_price(price)?;

    let units = if decimals == SOL_DECIMALS {
        price * LAMPORTS_PER_SOL as f64
    } else {
        price * 10f64.powi(decimals as i32)
    };

    Ok(units.round() as u64)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatekeeperConfig {
    /// The network for the gateway token required
    #[serde(deserialize_with = "to_pubkey")]
    #[serde(serialize_with = "to_string")]
    pub gatekeeper_network: Pubkey,
    /// Whether or not the token should expire after minting.
    #[serde(default)]
    pub expire_on_use: bool,
}

impl GatekeeperConfig {
    pub fn to_candy_format(&self) -> CandyGatekeeperConfig {
        CandyGatekeeperConfig {
            gatekeeper_network: self.gatekeeper_network,
            expire_on_use: self.expire_on_use,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSettingTypeFlags {
    #[serde(default)]
    pub date: bool,
    #[serde(default)]
    pub amount: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSettings {
    pub end_setting_type: EndSettingTypeFlags,
    pub value: Value,
}

impl EndSettings {
    pub fn to_candy_format(&self) -> Result<CandyEndSettings, ConfigError> {
        if self.end_setting_type.date {
            let timestamp = match &self.value {
                Value::String(date) => parse_date(date)?,
                Value::Number(number) => number
                    .as_i64()
                    .ok_or_else(|| ConfigError::InvalidDate(number.to_string()))?,
                other => return Err(ConfigError::InvalidDate(other.to_string())),
            };

            let number = u64::try_from(timestamp)
                .map_err(|_| ConfigError::InvalidDate(timestamp.to_string()))?;

            Ok(CandyEndSettings {
                end_setting_type: CandyEndSettingType::Date,
                number,
            })
        } else if self.end_setting_type.amount {
            let amount = match &self.value {
                Value::Number(number) => number.as_u64(),
                Value::String(amount) => amount.trim().parse::<u64>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                ConfigError::InvalidEndSettings(format!("invalid amount {}", self.value))
            })?;

            Ok(CandyEndSettings {
                end_setting_type: CandyEndSettingType::Amount,
                number: amount,
            })
        } else {
            Err(ConfigError::InvalidEndSettings(
                "endSettingType must be either 'date' or 'amount'".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistMintModeFlags {
    #[serde(default)]
    pub burn_every_time: bool,
    #[serde(default)]
    pub never_burn: bool,
}

impl WhitelistMintModeFlags {
    pub fn to_candy_format(&self) -> Result<CandyWhitelistMintMode, ConfigError> {
        match (self.burn_every_time, self.never_burn) {
            (true, false) => Ok(CandyWhitelistMintMode::BurnEveryTime),
            (false, true) => Ok(CandyWhitelistMintMode::NeverBurn),
            _ => Err(ConfigError::InvalidWhitelistMintMode),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistMintSettings {
    pub mode: WhitelistMintModeFlags,
    #[serde(deserialize_with = "to_pubkey")]
    #[serde(serialize_with = "to_string")]
    pub mint: Pubkey,
    #[serde(default)]
    pub presale: bool,
    pub discount_price: Option<f64>,
}

impl WhitelistMintSettings {
    /// `decimals` of the payment token (9 when paying in SOL).
    pub fn to_candy_format(&self, decimals: u8) -> Result<CandyWhitelistMintSettings, ConfigError> {
        Ok(CandyWhitelistMintSettings {
            mode: self.mode.to_candy_format()?,
            mint: self.mint,
            presale: self.presale,
            discount_price: self
                .discount_price
                .map(|price| price_as_base_units(price, decimals))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenSettings {
    pub name: String,
    pub uri: String,
    pub hash: String,
}

impl HiddenSettings {
    pub fn to_candy_format(&self) -> Result<CandyHiddenSettings, ConfigError> {
        let hash: [u8; 32] = self
            .hash
            .as_bytes()
            .try_into()
            .map_err(|_| ConfigError::InvalidHiddenSettingsHash(self.hash.len()))?;

        Ok(CandyHiddenSettings {
            name: self.name.clone(),
            uri: self.uri.clone(),
            hash,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub address: Option<String>,
    #[serde(default)]
    pub share: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    ArweaveBundle,
    ArweaveSol,
    Arweave,
    Ipfs,
    Aws,
    NftStorage,
    Pinata,
}

impl StorageType {
    pub const ALL: [StorageType; 7] = [
        StorageType::ArweaveBundle,
        StorageType::ArweaveSol,
        StorageType::Arweave,
        StorageType::Ipfs,
        StorageType::Aws,
        StorageType::NftStorage,
        StorageType::Pinata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::ArweaveBundle => "arweave-bundle",
            StorageType::ArweaveSol => "arweave-sol",
            StorageType::Arweave => "arweave",
            StorageType::Ipfs => "ipfs",
            StorageType::Aws => "aws",
            StorageType::NftStorage => "nft-storage",
            StorageType::Pinata => "pinata",
        }
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageType::ALL
            .iter()
            .find(|storage| storage.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let options = StorageType::ALL
                    .iter()
                    .map(StorageType::as_str)
                    .collect::<Vec<&str>>()
                    .join(", ");
                ConfigError::InvalidStorage(options, s.to_string())
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Testnet,
    Devnet,
}

impl Cluster {
    pub fn url(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "https://api.metaplex.solana.com/",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Cluster::MainnetBeta)
    }
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "testnet" => Ok(Cluster::Testnet),
            "devnet" => Ok(Cluster::Devnet),
            _ => Err(ConfigError::InvalidCluster(s.to_string())),
        }
    }
}

impl Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Testnet => "testnet",
            Cluster::Devnet => "devnet",
        };
        write!(f, "{}", name)
    }
}
