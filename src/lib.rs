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
//! # Conflux Core Space transaction codec
//!
//! Encodes, decodes and signs the three Conflux transaction variants (legacy, EIP-2930 access
//! list, EIP-1559 dynamic fee), which extend the Ethereum field set with `storageLimit` and
//! `epochHeight`.

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate enum_display_derive;

pub mod blockchain;
pub mod convert;
pub mod error;
pub mod rlp;
pub mod util;

pub use self::blockchain::{
    chains::ConfluxNetwork,
    conflux::{
        access_list::{AccessList, AccessListItem, StorageKey},
        address::{ConfluxAddress, CONFLUX_ADDRESS_BYTES},
        hex::ConfluxHex,
        signature::{
            ConfluxPrivateKey, ConfluxPublicKey, ConfluxSignature, ECDSA_SIGNATURE_BYTES,
            PRIVATE_KEY_BYTES, PUBLIC_KEY_BYTES,
        },
        transaction::{Sender, Transaction, TransactionFee, TransactionType},
    },
};
pub use self::convert::{
    error::ConversionError,
    json::transaction::{QuantityValue, TransactionMeta},
    quantity::IntoQuantity,
};
pub use self::error::CodecError;
pub use self::util::{keccak256, KECCAK256_BYTES};
pub use num_bigint::BigUint;

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// Get the current library version.
pub fn version() -> &'static str {
    VERSION.unwrap_or("unknown")
}
