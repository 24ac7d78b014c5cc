/*
Copyright 2019 ETCDEV GmbH
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
//! # Account address (20 bytes)

use super::hex::ConfluxHex;
use crate::{
    convert::error::ConversionError,
    util::{keccak256, to_arr},
};
use secp256k1::PublicKey;
use std::{fmt, ops, str::FromStr};

/// Fixed bytes number to represent `Address`
pub const CONFLUX_ADDRESS_BYTES: usize = 20;

/// Type nibble of a user (externally owned) account address
const USER_ADDRESS_TYPE: u8 = 0x10;

/// Account address (20 bytes)
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfluxAddress(pub [u8; CONFLUX_ADDRESS_BYTES]);

impl ConfluxAddress {
    /// Try to convert a byte vector to `Address`.
    ///
    /// # Arguments
    ///
    /// * `data` - A byte slice with `CONFLUX_ADDRESS_BYTES` length
    ///
    /// # Example
    ///
    /// ```
    /// let addr = conflux_tx::ConfluxAddress::try_from(&[0u8; conflux_tx::CONFLUX_ADDRESS_BYTES]).unwrap();
    /// assert_eq!(addr.to_string(), "0x0000000000000000000000000000000000000000");
    /// ```
    pub fn try_from(data: &[u8]) -> Result<Self, ConversionError> {
        if data.len() != CONFLUX_ADDRESS_BYTES {
            return Err(ConversionError::InvalidLength);
        }

        Ok(ConfluxAddress(to_arr(data)))
    }

    /// Read the `to` field of a transaction, where an empty value means contract creation
    pub fn from_optional(data: &[u8]) -> Result<Option<Self>, ConversionError> {
        if data.is_empty() {
            return Ok(None);
        }
        ConfluxAddress::try_from(data).map(Some)
    }

    /// Derive user account address from an uncompressed public key (64 bytes, without the `0x04` tag).
    /// Conflux takes the last 20 bytes of the Keccak-256 hash and marks it as a user account by
    /// setting the highest nibble to `0x1`
    pub fn from_public_key(key: &[u8; 64]) -> Self {
        let hash = keccak256(key);
        let mut addr: [u8; CONFLUX_ADDRESS_BYTES] = to_arr(&hash[12..]);
        addr[0] = (addr[0] & 0x0f) | USER_ADDRESS_TYPE;
        ConfluxAddress(addr)
    }

    /// Check if the address has the user account type
    pub fn is_user_account(&self) -> bool {
        self.0[0] & 0xf0 == USER_ADDRESS_TYPE
    }
}

impl ops::Deref for ConfluxAddress {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; CONFLUX_ADDRESS_BYTES]> for ConfluxAddress {
    fn from(bytes: [u8; CONFLUX_ADDRESS_BYTES]) -> Self {
        ConfluxAddress(bytes)
    }
}

impl AsRef<[u8]> for ConfluxAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for ConfluxAddress {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfluxAddress::try_from(ConfluxHex::decode(s)?.as_slice())
    }
}

impl fmt::Display for ConfluxAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ConfluxAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<PublicKey> for ConfluxAddress {
    fn from(value: PublicKey) -> Self {
        let mut key = [0u8; 64];
        key.copy_from_slice(&value.serialize_uncompressed()[1..] /* cut '04' */);
        ConfluxAddress::from_public_key(&key)
    }
}
