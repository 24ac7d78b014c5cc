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
//! # Codec errors

use crate::convert::error::ConversionError;
use std::fmt;

/// Errors raised while encoding, decoding or signing a transaction
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Input is not a well-formed (or not a canonical) RLP structure
    MalformedEncoding(String),
    /// Transaction type tag outside of the known set
    UnsupportedType(u64),
    /// A field failed canonical normalization
    InvalidFieldValue(ConversionError),
    /// Signature is absent or cannot be used to recover the signer
    SignatureRecoveryUnavailable,
    /// Private key bytes are not a valid secp256k1 scalar
    InvalidPrivateKey,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::MalformedEncoding(msg) => write!(f, "malformed encoding: {}", msg),
            CodecError::UnsupportedType(t) => write!(f, "unsupported transaction type: {}", t),
            CodecError::InvalidFieldValue(err) => write!(f, "invalid field value: {}", err),
            CodecError::SignatureRecoveryUnavailable => f.write_str("signature recovery unavailable"),
            CodecError::InvalidPrivateKey => f.write_str("invalid private key"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<ConversionError> for CodecError {
    fn from(err: ConversionError) -> Self {
        CodecError::InvalidFieldValue(err)
    }
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        CodecError::InvalidFieldValue(ConversionError::from(err))
    }
}

impl From<secp256k1::Error> for CodecError {
    fn from(err: secp256k1::Error) -> Self {
        match err {
            secp256k1::Error::InvalidSecretKey => CodecError::InvalidPrivateKey,
            _ => CodecError::SignatureRecoveryUnavailable,
        }
    }
}
