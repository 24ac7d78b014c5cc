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
//! # Account ECDSA signatures using the SECG curve secp256k1

use super::{address::ConfluxAddress, hex::ConfluxHex};
use crate::{
    error::CodecError,
    util::{left_pad, to_arr, KECCAK256_BYTES},
};
use num::ToPrimitive;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey,
};
use std::{fmt, ops, str};

/// Private key length in bytes
pub const PRIVATE_KEY_BYTES: usize = 32;

/// Uncompressed public key length in bytes, without the `0x04` tag
pub const PUBLIC_KEY_BYTES: usize = 64;

/// ECDSA crypto signature length in bytes
pub const ECDSA_SIGNATURE_BYTES: usize = 65;

lazy_static! {
    static ref ECDSA: Secp256k1<All> = Secp256k1::new();
}

/// Transaction signature.
///
/// Values are kept as they come from the wire, so a decoded transaction with a malformed
/// signature can still be encoded back. Whether they make a usable signature is checked on
/// `recover`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfluxSignature {
    /// Recovery id, `0` or `1` for a usable signature
    pub v: BigUint,

    /// ECDSA signature first point (0 < r < secp256k1n)
    pub r: BigUint,

    /// ECDSA signature second point (0 < s < secp256k1n ÷ 2 + 1)
    pub s: BigUint,
}

impl From<[u8; ECDSA_SIGNATURE_BYTES]> for ConfluxSignature {
    fn from(data: [u8; ECDSA_SIGNATURE_BYTES]) -> Self {
        ConfluxSignature {
            v: BigUint::from(data[0]),
            r: BigUint::from_bytes_be(&data[1..(1 + 32)]),
            s: BigUint::from_bytes_be(&data[(1 + 32)..(1 + 32 + 32)]),
        }
    }
}

fn scalar_bytes(value: &BigUint) -> Result<[u8; 32], CodecError> {
    left_pad::<32>(&value.to_bytes_be()).ok_or(CodecError::SignatureRecoveryUnavailable)
}

impl ConfluxSignature {
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        ConfluxSignature {
            v: BigUint::from(v),
            r: BigUint::from_bytes_be(&r),
            s: BigUint::from_bytes_be(&s),
        }
    }

    /// Recover public key of the signer of `hash`
    pub fn recover(&self, hash: [u8; KECCAK256_BYTES]) -> Result<ConfluxPublicKey, CodecError> {
        let msg = Message::from_slice(&hash)?;
        let rid = self
            .v
            .to_i32()
            .and_then(|v| RecoveryId::from_i32(v).ok())
            .ok_or(CodecError::SignatureRecoveryUnavailable)?;

        let mut compact = [0u8; 64];
        compact[0..32].copy_from_slice(&scalar_bytes(&self.r)?);
        compact[32..64].copy_from_slice(&scalar_bytes(&self.s)?);
        let sig = RecoverableSignature::from_compact(&compact, rid)
            .map_err(|_| CodecError::SignatureRecoveryUnavailable)?;

        let key = ECDSA
            .recover_ecdsa(&msg, &sig)
            .map_err(|_| CodecError::SignatureRecoveryUnavailable)?;
        Ok(ConfluxPublicKey::from(key))
    }
}

/// Uncompressed secp256k1 public key, without the `0x04` tag
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfluxPublicKey(pub [u8; PUBLIC_KEY_BYTES]);

impl ConfluxPublicKey {
    /// Address of the user account owning the key
    pub fn to_address(&self) -> ConfluxAddress {
        ConfluxAddress::from_public_key(&self.0)
    }
}

impl From<PublicKey> for ConfluxPublicKey {
    fn from(key: PublicKey) -> Self {
        let mut buf = [0u8; PUBLIC_KEY_BYTES];
        buf.copy_from_slice(&key.serialize_uncompressed()[1..] /* cut '04' */);
        ConfluxPublicKey(buf)
    }
}

impl fmt::Display for ConfluxPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ConfluxPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Private key used as x in an ECDSA signature
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct ConfluxPrivateKey(pub [u8; PRIVATE_KEY_BYTES]);

impl ConfluxPrivateKey {
    /// Generate a new `PrivateKey` at random (`rand::OsRng`)
    pub fn gen() -> Self {
        ConfluxPrivateKey::from(SecretKey::new(&mut OsRng))
    }

    /// Try to convert a byte slice into `PrivateKey`.
    ///
    /// # Arguments
    ///
    /// * `data` - A byte slice with `PRIVATE_KEY_BYTES` length, a valid secp256k1 scalar
    pub fn try_from(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() != PRIVATE_KEY_BYTES {
            return Err(CodecError::InvalidPrivateKey);
        }
        SecretKey::from_slice(data)?;

        Ok(ConfluxPrivateKey(to_arr(data)))
    }

    fn secret(&self) -> Result<SecretKey, CodecError> {
        Ok(SecretKey::from_slice(&self.0)?)
    }

    /// Public key of the private key
    pub fn to_public(&self) -> Result<ConfluxPublicKey, CodecError> {
        let key = PublicKey::from_secret_key(&ECDSA, &self.secret()?);
        Ok(ConfluxPublicKey::from(key))
    }

    /// Extract `Address` from current private key.
    pub fn to_address(&self) -> Result<ConfluxAddress, CodecError> {
        Ok(self.to_public()?.to_address())
    }

    /// Sign hash from message (Keccak-256)
    pub fn sign_hash(&self, hash: [u8; KECCAK256_BYTES]) -> Result<ConfluxSignature, CodecError> {
        let msg = Message::from_slice(&hash)?;
        let key = self.secret()?;

        let s = ECDSA.sign_ecdsa_recoverable(&msg, &key);
        let (rid, sig) = s.serialize_compact();

        let mut buf = [0u8; ECDSA_SIGNATURE_BYTES];
        buf[0] = rid.to_i32() as u8;
        buf[1..65].copy_from_slice(&sig[0..64]);

        Ok(ConfluxSignature::from(buf))
    }
}

impl ops::Deref for ConfluxPrivateKey {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SecretKey> for ConfluxPrivateKey {
    fn from(key: SecretKey) -> Self {
        ConfluxPrivateKey(key.secret_bytes())
    }
}

impl str::FromStr for ConfluxPrivateKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfluxPrivateKey::try_from(ConfluxHex::decode(s)?.as_slice())
    }
}

/// Never prints the key itself
impl fmt::Debug for ConfluxPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ConfluxPrivateKey(***)")
    }
}
