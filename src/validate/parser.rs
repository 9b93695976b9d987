use std::str::FromStr;

use anchor_client::solana_sdk::pubkey::Pubkey;
use mpl_candy_machine::Creator as CandyCreator;
pub use mpl_token_metadata::state::{
    MAX_CREATOR_LIMIT, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH,
};

use crate::{config::data::Creator, validate::errors::ValidateError};

pub fn check_name(name: &str) -> Result<(), ValidateError> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidateError::NameTooLong);
    }
    Ok(())
}

pub fn check_symbol(symbol: &str) -> Result<(), ValidateError> {
    if symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(ValidateError::SymbolTooLong);
    }
    Ok(())
}

pub fn check_url(url: &str) -> Result<(), ValidateError> {
    if url.len() > MAX_URI_LENGTH {
        return Err(ValidateError::UrlTooLong);
    }
    Ok(())
}

pub fn check_seller_fee_basis_points(seller_fee_basis_points: u16) -> Result<(), ValidateError> {
    if seller_fee_basis_points > 10000 {
        return Err(ValidateError::InvalidSellerFeeBasisPoints(
            seller_fee_basis_points,
        ));
    }
    Ok(())
}

pub fn check_creators_shares(creators: &[Creator]) -> Result<(), ValidateError> {
    let shares: u32 = creators.iter().map(|creator| creator.share as u32).sum();

    if shares != 100 {
        return Err(ValidateError::InvalidCreatorShare);
    }
    Ok(())
}

pub fn check_creators_addresses(creators: &[Creator]) -> Result<Vec<Pubkey>, ValidateError> {
    creators
        .iter()
        .map(|creator| {
            let address = creator
                .address
                .as_deref()
                .ok_or(ValidateError::MissingCreatorAddress)?;
            Pubkey::from_str(address)
                .map_err(|_| ValidateError::InvalidCreatorAddress(address.to_string()))
        })
        .collect()
}

/// Checks the creators list and converts it into the program's format.
pub fn check_creators(creators: &[Creator]) -> Result<Vec<CandyCreator>, ValidateError> {
    if creators.is_empty() {
        return Err(ValidateError::MissingCreators);
    }
    if creators.len() > MAX_CREATOR_LIMIT - 1 {
        return Err(ValidateError::TooManyCreators(
            creators.len(),
            MAX_CREATOR_LIMIT - 1,
        ));
    }

    let addresses = check_creators_addresses(creators)?;
    check_creators_shares(creators)?;

    Ok(addresses
        .into_iter()
        .zip(creators)
        .map(|(address, creator)| CandyCreator {
            address,
            verified: false,
            share: creator.share,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(share: u8) -> Creator {
        Creator {
            address: Some(Pubkey::new_unique().to_string()),
            share,
        }
    }

    #[test]
    fn lengths() {
        assert!(check_name(&"a".repeat(32)).is_ok());
        assert_eq!(check_name(&"a".repeat(33)), Err(ValidateError::NameTooLong));
        assert!(check_symbol("NFT").is_ok());
        assert_eq!(
            check_symbol("LONGSYMBOL1"),
            Err(ValidateError::SymbolTooLong)
        );
        assert_eq!(check_url(&"u".repeat(201)), Err(ValidateError::UrlTooLong));
        assert!(check_seller_fee_basis_points(10000).is_ok());
        assert!(check_seller_fee_basis_points(10001).is_err());
    }

    #[test]
    fn shares_must_add_up_to_100() {
        assert!(check_creators(&[creator(60), creator(40)]).is_ok());
        assert!(matches!(
            check_creators(&[creator(60), creator(30)]),
            Err(ValidateError::InvalidCreatorShare)
        ));
        assert!(matches!(
            check_creators(&[creator(200), creator(200)]),
            Err(ValidateError::InvalidCreatorShare)
        ));
    }

    #[test]
    fn creators_need_addresses() {
        let missing = Creator {
            address: None,
            share: 100,
        };
        assert!(matches!(
            check_creators(&[missing]),
            Err(ValidateError::MissingCreatorAddress)
        ));

        let invalid = Creator {
            address: Some("not-a-key".to_string()),
            share: 100,
        };
        assert!(matches!(
            check_creators(&[invalid]),
            Err(ValidateError::InvalidCreatorAddress(address)) if address == "not-a-key"
        ));

        assert!(matches!(
            check_creators(&[]),
            Err(ValidateError::MissingCreators)
        ));
        assert!(matches!(
            check_creators(&[creator(20), creator(20), creator(20), creator(20), creator(20)]),
            Err(ValidateError::TooManyCreators(5, 4))
        ));
    }

    #[test]
    fn converted_creators_keep_their_share() {
        let creators = [creator(70), creator(30)];
        let converted = check_creators(&creators).unwrap();

        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].share, 70);
        assert_eq!(
            Some(converted[1].address.to_string()),
            creators[1].address
        );
        assert!(!converted[0].verified);
    }
}
