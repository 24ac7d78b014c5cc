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
//! # Transaction field set, as it's passed around in JSON by wallets and RPC clients

use crate::{
    blockchain::conflux::{
        access_list::AccessList,
        address::ConfluxAddress,
        hex::ConfluxHex,
        signature::ConfluxSignature,
        transaction::{Sender, Transaction, TransactionFee, TransactionType},
    },
    convert::{
        error::ConversionError,
        quantity::{self, IntoQuantity},
    },
    error::CodecError,
    util::left_pad,
};
use num::ToPrimitive;
use num_bigint::BigUint;

/// Integer given either as a JSON number or as a decimal / `0x` hex string
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    Number(u64),
    Text(String),
}

impl IntoQuantity for &QuantityValue {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        match self {
            QuantityValue::Number(n) => (*n).into_quantity(),
            QuantityValue::Text(s) => s.into_quantity(),
        }
    }
}

impl From<&BigUint> for QuantityValue {
    fn from(value: &BigUint) -> Self {
        QuantityValue::Text(quantity::to_hex(value))
    }
}

/// Transaction fields with JSON names. Every field is optional here, the conversion into
/// `Transaction` checks which of them are required for the given type
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ConfluxAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<ConfluxAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_limit: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch_height: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<QuantityValue>,
    /// Hex encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_list: Option<AccessList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<QuantityValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<QuantityValue>,
}

fn required(name: &str, value: &Option<QuantityValue>) -> Result<BigUint, CodecError> {
    match value {
        Some(v) => Ok(v.into_quantity()?),
        None => Err(ConversionError::MissingField(name.to_string()).into()),
    }
}

fn optional(value: &Option<QuantityValue>) -> Result<BigUint, CodecError> {
    match value {
        Some(v) => Ok(v.into_quantity()?),
        None => Ok(BigUint::default()),
    }
}

fn forbid<T>(name: &str, value: &Option<T>) -> Result<(), CodecError> {
    match value {
        Some(_) => Err(ConversionError::UnexpectedField(name.to_string()).into()),
        None => Ok(()),
    }
}

fn scalar(value: &str) -> Result<BigUint, CodecError> {
    Ok(quantity::from_bytes(&ConfluxHex::decode(value)?))
}

/// 32 bytes hex for a valid scalar, minimal hex for anything wider
fn scalar_hex(value: &BigUint) -> String {
    match left_pad::<32>(&value.to_bytes_be()) {
        Some(bytes) => ConfluxHex::encode(bytes),
        None => quantity::to_hex(value),
    }
}

impl TransactionMeta {
    fn read_type(&self) -> Result<TransactionType, CodecError> {
        let value = match &self.tx_type {
            Some(value) => value.into_quantity()?,
            None => return Ok(TransactionType::Legacy),
        };
        let id = value.to_u64().ok_or(CodecError::UnsupportedType(u64::MAX))?;
        TransactionType::try_from(id)
    }

    fn read_fee(&self, tx_type: TransactionType) -> Result<TransactionFee, CodecError> {
        let fee = match tx_type {
            TransactionType::Legacy => {
                forbid("maxPriorityFeePerGas", &self.max_priority_fee_per_gas)?;
                forbid("maxFeePerGas", &self.max_fee_per_gas)?;
                forbid("accessList", &self.access_list)?;
                TransactionFee::Legacy {
                    gas_price: required("gasPrice", &self.gas_price)?,
                }
            }
            TransactionType::AccessList => {
                forbid("maxPriorityFeePerGas", &self.max_priority_fee_per_gas)?;
                forbid("maxFeePerGas", &self.max_fee_per_gas)?;
                TransactionFee::AccessList {
                    gas_price: required("gasPrice", &self.gas_price)?,
                    access_list: self.access_list.clone().unwrap_or_default(),
                }
            }
            TransactionType::DynamicFee => {
                forbid("gasPrice", &self.gas_price)?;
                TransactionFee::DynamicFee {
                    max_priority_fee_per_gas: required(
                        "maxPriorityFeePerGas",
                        &self.max_priority_fee_per_gas,
                    )?,
                    max_fee_per_gas: required("maxFeePerGas", &self.max_fee_per_gas)?,
                    access_list: self.access_list.clone().unwrap_or_default(),
                }
            }
        };
        Ok(fee)
    }

    fn read_signature(&self) -> Result<Option<ConfluxSignature>, CodecError> {
        match (&self.v, &self.r, &self.s) {
            (None, None, None) => Ok(None),
            (Some(v), Some(r), Some(s)) => {
                Ok(Some(ConfluxSignature {
                    v: v.into_quantity()?,
                    r: scalar(r)?,
                    s: scalar(s)?,
                }))
            }
            _ => Err(ConversionError::PartialSignature.into()),
        }
    }
}

impl TryFrom<TransactionMeta> for Transaction {
    type Error = CodecError;

    fn try_from(meta: TransactionMeta) -> Result<Self, Self::Error> {
        let tx_type = meta.read_type()?;
        let fee = meta.read_fee(tx_type)?;
        let signature = meta.read_signature()?;
        let chain_id = required("chainId", &meta.chain_id)?;
        let data = match &meta.data {
            Some(data) => ConfluxHex::decode(data)?,
            None => Vec::new(),
        };
        let from = meta.from.map(|address| Sender {
            address,
            network_id: chain_id.clone(),
        });

        Ok(Transaction {
            nonce: required("nonce", &meta.nonce)?,
            gas: required("gas", &meta.gas)?,
            to: meta.to,
            value: optional(&meta.value)?,
            storage_limit: optional(&meta.storage_limit)?,
            epoch_height: required("epochHeight", &meta.epoch_height)?,
            chain_id,
            data,
            fee,
            signature,
            from,
        })
    }
}

impl From<&Transaction> for TransactionMeta {
    fn from(tx: &Transaction) -> Self {
        let tx_type = tx.tx_type();
        TransactionMeta {
            tx_type: Some(QuantityValue::Number(u64::from(tx_type))),
            from: tx.from.as_ref().map(|sender| sender.address),
            nonce: Some(QuantityValue::from(&tx.nonce)),
            gas_price: tx.gas_price().map(QuantityValue::from),
            gas: Some(QuantityValue::from(&tx.gas)),
            to: tx.to,
            value: Some(QuantityValue::from(&tx.value)),
            storage_limit: Some(QuantityValue::from(&tx.storage_limit)),
            epoch_height: Some(QuantityValue::from(&tx.epoch_height)),
            chain_id: Some(QuantityValue::from(&tx.chain_id)),
            data: Some(ConfluxHex::encode(&tx.data)),
            v: tx.signature.as_ref().map(|sig| match sig.v.to_u64() {
                Some(v) => QuantityValue::Number(v),
                None => QuantityValue::from(&sig.v),
            }),
            r: tx.signature.as_ref().map(|sig| scalar_hex(&sig.r)),
            s: tx.signature.as_ref().map(|sig| scalar_hex(&sig.s)),
            access_list: tx.access_list().cloned(),
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas().map(QuantityValue::from),
            max_fee_per_gas: tx.max_fee_per_gas().map(QuantityValue::from),
        }
    }
}
