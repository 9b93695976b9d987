use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{config::data::Creator, validate::parser};

/// Metadata JSON file of an asset.
#[derive(Debug, Clone, Deserialize, Default, Serialize)]
#[serde(default)]
pub struct Metadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub seller_fee_basis_points: u16,
    pub image: String,
    pub animation_url: Option<String>,
    pub external_url: Option<String>,
    pub properties: Property,
}

impl Metadata {
    pub fn validate(&self) -> Result<()> {
        parser::check_name(&self.name)?;
        parser::check_symbol(&self.symbol)?;
        parser::check_url(&self.image)?;
        if let Some(animation_url) = &self.animation_url {
            parser::check_url(animation_url)?;
        }
        parser::check_seller_fee_basis_points(self.seller_fee_basis_points)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Default, Serialize)]
#[serde(default)]
pub struct Property {
    pub files: Vec<FileAttr>,
    pub category: String,
    pub creators: Vec<Creator>,
}

#[derive(Debug, Clone, Deserialize, Default, Serialize)]
pub struct FileAttr {
    pub uri: String,
    #[serde(rename = "type")]
    pub file_type: String,
}
