/*
Copyright 2022 EmeraldPay, Inc

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
//! # EIP-2930 access list

use super::{address::ConfluxAddress, hex::ConfluxHex};
use crate::{
    convert::error::ConversionError,
    error::CodecError,
    rlp::RlpItem,
    util::to_arr,
};
use std::{fmt, ops, str::FromStr};

/// Storage key length in bytes
pub const STORAGE_KEY_BYTES: usize = 32;

/// Storage slot of a contract
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StorageKey(pub [u8; STORAGE_KEY_BYTES]);

impl StorageKey {
    pub fn try_from(data: &[u8]) -> Result<Self, ConversionError> {
        if data.len() != STORAGE_KEY_BYTES {
            return Err(ConversionError::InvalidLength);
        }
        Ok(StorageKey(to_arr(data)))
    }
}

impl ops::Deref for StorageKey {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; STORAGE_KEY_BYTES]> for StorageKey {
    fn from(bytes: [u8; STORAGE_KEY_BYTES]) -> Self {
        StorageKey(bytes)
    }
}

impl FromStr for StorageKey {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::try_from(ConfluxHex::decode(s)?.as_slice())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Address and the storage keys a transaction intends to touch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
    /// Accessed contract
    pub address: ConfluxAddress,
    /// Accessed slots, in declaration order
    #[serde(default)]
    pub storage_keys: Vec<StorageKey>,
}

/// Ordered list of `AccessListItem`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessListItem {
    pub fn new(address: ConfluxAddress, storage_keys: Vec<StorageKey>) -> Self {
        AccessListItem {
            address,
            storage_keys,
        }
    }

    /// `[address, [key, ...]]`
    pub fn to_rlp(&self) -> RlpItem {
        RlpItem::List(vec![
            RlpItem::bytes(self.address.0.to_vec()),
            RlpItem::List(
                self.storage_keys
                    .iter()
                    .map(|k| RlpItem::bytes(k.0.to_vec()))
                    .collect(),
            ),
        ])
    }

    pub fn from_rlp(item: &RlpItem) -> Result<Self, CodecError> {
        let parts = item.as_list_of(2)?;
        let address = ConfluxAddress::try_from(parts[0].as_bytes()?)?;
        let storage_keys = parts[1]
            .as_list()?
            .iter()
            .map(|k| -> Result<StorageKey, CodecError> {
                Ok(StorageKey::try_from(k.as_bytes()?)?)
            })
            .collect::<Result<Vec<StorageKey>, CodecError>>()?;
        Ok(AccessListItem {
            address,
            storage_keys,
        })
    }
}

impl AccessList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encode as a list of entries. An empty access list is still an (empty) list
    pub fn to_rlp(&self) -> RlpItem {
        RlpItem::List(self.0.iter().map(AccessListItem::to_rlp).collect())
    }

    pub fn from_rlp(item: &RlpItem) -> Result<Self, CodecError> {
        let items = item
            .as_list()?
            .iter()
            .map(AccessListItem::from_rlp)
            .collect::<Result<Vec<AccessListItem>, CodecError>>()?;
        Ok(AccessList(items))
    }
}

impl From<Vec<AccessListItem>> for AccessList {
    fn from(items: Vec<AccessListItem>) -> Self {
        AccessList(items)
    }
}

impl ops::Deref for AccessList {
    type Target = [AccessListItem];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
