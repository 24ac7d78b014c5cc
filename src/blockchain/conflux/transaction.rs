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
//! # Account transaction
//!
//! Conflux knows three kinds of transactions, which differ in the fee fields and the access list.
//! Typed transactions are prefixed with `cfx` and the type byte, legacy ones have no prefix.
//!
//! The signed form nests the unsigned field list: `prefix || rlp([[fields...], v, r, s])`, and the
//! signing hash is Keccak-256 of `prefix || rlp([fields...])`.

use super::{
    access_list::AccessList,
    address::ConfluxAddress,
    hex::ConfluxHex,
    signature::{ConfluxPrivateKey, ConfluxPublicKey, ConfluxSignature},
};
use crate::{
    blockchain::chains::ConfluxNetwork,
    convert::quantity,
    error::CodecError,
    rlp::{self, RlpItem},
    util::{keccak256, KECCAK256_BYTES},
};
use num_bigint::BigUint;

/// Marker of an EIP-2930 transaction, `cfx\x01`
pub const TX_PREFIX_ACCESS_LIST: [u8; 4] = [0x63, 0x66, 0x78, 0x01];

/// Marker of an EIP-1559 transaction, `cfx\x02`
pub const TX_PREFIX_DYNAMIC_FEE: [u8; 4] = [0x63, 0x66, 0x78, 0x02];

/// Transaction kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Original transaction with a single gas price
    Legacy = 0,
    /// EIP-2930 transaction with an access list
    AccessList = 1,
    /// EIP-1559 transaction with a priority fee
    DynamicFee = 2,
}

impl TransactionType {
    /// Bytes put in front of the RLP payload, empty for a legacy transaction
    pub fn prefix(&self) -> &'static [u8] {
        match self {
            TransactionType::Legacy => &[],
            TransactionType::AccessList => &TX_PREFIX_ACCESS_LIST,
            TransactionType::DynamicFee => &TX_PREFIX_DYNAMIC_FEE,
        }
    }

    /// Find the type of a raw transaction by its first 4 bytes.
    /// Anything without a known marker is a legacy transaction.
    pub fn detect(raw: &[u8]) -> TransactionType {
        match raw.get(0..4) {
            Some(prefix) if prefix == TX_PREFIX_ACCESS_LIST => TransactionType::AccessList,
            Some(prefix) if prefix == TX_PREFIX_DYNAMIC_FEE => TransactionType::DynamicFee,
            _ => TransactionType::Legacy,
        }
    }

    /// Number of unsigned fields
    fn field_count(&self) -> usize {
        match self {
            TransactionType::Legacy => 9,
            TransactionType::AccessList => 10,
            TransactionType::DynamicFee => 11,
        }
    }
}

impl TryFrom<u64> for TransactionType {
    type Error = CodecError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransactionType::Legacy),
            1 => Ok(TransactionType::AccessList),
            2 => Ok(TransactionType::DynamicFee),
            _ => Err(CodecError::UnsupportedType(value)),
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TransactionType::try_from(u64::from(value))
    }
}

impl From<TransactionType> for u64 {
    fn from(value: TransactionType) -> Self {
        value as u64
    }
}

/// Fee model of a transaction, which also defines its type
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionFee {
    Legacy {
        gas_price: BigUint,
    },
    AccessList {
        gas_price: BigUint,
        access_list: AccessList,
    },
    DynamicFee {
        max_priority_fee_per_gas: BigUint,
        max_fee_per_gas: BigUint,
        access_list: AccessList,
    },
}

impl TransactionFee {
    pub fn tx_type(&self) -> TransactionType {
        match self {
            TransactionFee::Legacy { .. } => TransactionType::Legacy,
            TransactionFee::AccessList { .. } => TransactionType::AccessList,
            TransactionFee::DynamicFee { .. } => TransactionType::DynamicFee,
        }
    }
}

/// Signer of a transaction, with the network id the address was derived for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub address: ConfluxAddress,
    pub network_id: BigUint,
}

/// Transaction data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Nonce
    pub nonce: BigUint,

    /// Gas Limit
    pub gas: BigUint,

    /// Target address, or None to create contract
    pub to: Option<ConfluxAddress>,

    /// Value transferred with transaction
    pub value: BigUint,

    /// Storage the sender is willing to pay collateral for
    pub storage_limit: BigUint,

    /// Epoch proposed by the sender, not the epoch of the block which includes the transaction
    pub epoch_height: BigUint,

    pub chain_id: BigUint,

    /// Data transferred with transaction
    pub data: Vec<u8>,

    /// Gas price(s) and access list, depending on the transaction type
    pub fee: TransactionFee,

    /// `v`, `r`, `s` of a signed transaction
    pub signature: Option<ConfluxSignature>,

    /// Sender, known after the transaction is signed or decoded
    pub from: Option<Sender>,
}

fn quantity_item(value: &BigUint) -> RlpItem {
    RlpItem::Bytes(quantity::to_bytes(value))
}

fn read_quantity(item: &RlpItem) -> Result<BigUint, CodecError> {
    Ok(quantity::from_bytes(item.as_bytes()?))
}

impl Transaction {
    /// Decode raw transaction from a hex string
    pub fn decode_raw<S: AsRef<str>>(raw: S) -> Result<Transaction, CodecError> {
        let bytes = ConfluxHex::decode(raw)?;
        Transaction::decode(&bytes)
    }

    /// Decode a signed raw transaction.
    ///
    /// The sender is recovered right away. If it cannot be recovered, including a `v`, `r` or `s`
    /// out of range, the transaction is still returned, but with `from` unset and the caller
    /// must check it before use.
    pub fn decode(raw: &[u8]) -> Result<Transaction, CodecError> {
        let tx_type = TransactionType::detect(raw);
        debug!("Decode {:?} transaction of {} bytes", tx_type, raw.len());

        let payload = rlp::decode(&raw[tx_type.prefix().len()..])?;
        let parts = payload.as_list_of(4)?;
        let fields = parts[0].as_list_of(tx_type.field_count())?;

        let (fee, common) = match tx_type {
            TransactionType::Legacy => (
                TransactionFee::Legacy {
                    gas_price: read_quantity(&fields[1])?,
                },
                &fields[2..9],
            ),
            TransactionType::AccessList => (
                TransactionFee::AccessList {
                    gas_price: read_quantity(&fields[1])?,
                    access_list: AccessList::from_rlp(&fields[9])?,
                },
                &fields[2..9],
            ),
            TransactionType::DynamicFee => (
                TransactionFee::DynamicFee {
                    max_priority_fee_per_gas: read_quantity(&fields[1])?,
                    max_fee_per_gas: read_quantity(&fields[2])?,
                    access_list: AccessList::from_rlp(&fields[10])?,
                },
                &fields[3..10],
            ),
        };

        let signature = ConfluxSignature {
            v: read_quantity(&parts[1])?,
            r: read_quantity(&parts[2])?,
            s: read_quantity(&parts[3])?,
        };

        let mut tx = Transaction {
            nonce: read_quantity(&fields[0])?,
            gas: read_quantity(&common[0])?,
            to: ConfluxAddress::from_optional(common[1].as_bytes()?)?,
            value: read_quantity(&common[2])?,
            storage_limit: read_quantity(&common[3])?,
            epoch_height: read_quantity(&common[4])?,
            chain_id: read_quantity(&common[5])?,
            data: common[6].as_bytes()?.to_vec(),
            fee,
            signature: Some(signature),
            from: None,
        };

        match tx.recover() {
            Ok(public) => {
                tx.from = Some(Sender {
                    address: public.to_address(),
                    network_id: tx.chain_id.clone(),
                });
            }
            Err(e) => warn!("Sender of the {:?} transaction is unknown: {}", tx_type, e),
        }

        Ok(tx)
    }

    pub fn tx_type(&self) -> TransactionType {
        self.fee.tx_type()
    }

    /// Gas price of a Legacy or Access List transaction
    pub fn gas_price(&self) -> Option<&BigUint> {
        match &self.fee {
            TransactionFee::Legacy { gas_price } | TransactionFee::AccessList { gas_price, .. } => {
                Some(gas_price)
            }
            TransactionFee::DynamicFee { .. } => None,
        }
    }

    pub fn max_priority_fee_per_gas(&self) -> Option<&BigUint> {
        match &self.fee {
            TransactionFee::DynamicFee {
                max_priority_fee_per_gas,
                ..
            } => Some(max_priority_fee_per_gas),
            _ => None,
        }
    }

    pub fn max_fee_per_gas(&self) -> Option<&BigUint> {
        match &self.fee {
            TransactionFee::DynamicFee {
                max_fee_per_gas, ..
            } => Some(max_fee_per_gas),
            _ => None,
        }
    }

    /// Access list, `None` for a legacy transaction
    pub fn access_list(&self) -> Option<&AccessList> {
        match &self.fee {
            TransactionFee::Legacy { .. } => None,
            TransactionFee::AccessList { access_list, .. }
            | TransactionFee::DynamicFee { access_list, .. } => Some(access_list),
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    fn unsigned_rlp(&self) -> RlpItem {
        let mut fields = Vec::with_capacity(self.tx_type().field_count());
        fields.push(quantity_item(&self.nonce));
        match &self.fee {
            TransactionFee::Legacy { gas_price } | TransactionFee::AccessList { gas_price, .. } => {
                fields.push(quantity_item(gas_price));
            }
            TransactionFee::DynamicFee {
                max_priority_fee_per_gas,
                max_fee_per_gas,
                ..
            } => {
                fields.push(quantity_item(max_priority_fee_per_gas));
                fields.push(quantity_item(max_fee_per_gas));
            }
        }
        fields.push(quantity_item(&self.gas));
        fields.push(match &self.to {
            Some(addr) => RlpItem::bytes(addr.0.to_vec()),
            None => RlpItem::empty(),
        });
        fields.push(quantity_item(&self.value));
        fields.push(quantity_item(&self.storage_limit));
        fields.push(quantity_item(&self.epoch_height));
        fields.push(quantity_item(&self.chain_id));
        fields.push(RlpItem::bytes(self.data.clone()));
        if let Some(access_list) = self.access_list() {
            fields.push(access_list.to_rlp());
        }
        RlpItem::List(fields)
    }

    /// RLP packed transaction, with the type prefix.
    ///
    /// Fails with `SignatureRecoveryUnavailable` if the signature is requested but the
    /// transaction is not signed yet.
    pub fn encode(&self, include_signature: bool) -> Result<Vec<u8>, CodecError> {
        let unsigned = self.unsigned_rlp();
        let payload = if include_signature {
            let sig = self
                .signature
                .as_ref()
                .ok_or(CodecError::SignatureRecoveryUnavailable)?;
            RlpItem::List(vec![
                unsigned,
                quantity_item(&sig.v),
                quantity_item(&sig.r),
                quantity_item(&sig.s),
            ])
        } else {
            unsigned
        };

        let mut buf = self.tx_type().prefix().to_vec();
        buf.extend_from_slice(&rlp::encode(&payload));
        trace!(
            "Encoded {:?} transaction (signature: {}) into {} bytes",
            self.tx_type(),
            include_signature,
            buf.len()
        );
        Ok(buf)
    }

    /// Hash of the unsigned transaction, i.e. the message to sign
    pub fn signing_hash(&self) -> [u8; KECCAK256_BYTES] {
        let mut buf = self.tx_type().prefix().to_vec();
        buf.extend_from_slice(&rlp::encode(&self.unsigned_rlp()));
        keccak256(&buf)
    }

    /// Sign transaction with provided private key and set the signature and the sender.
    ///
    /// The sender is bound to `network` if provided, or to the transaction chain id otherwise.
    /// Requires exclusive access to the transaction; returns it back for chaining.
    pub fn sign(
        &mut self,
        pk: &ConfluxPrivateKey,
        network: Option<ConfluxNetwork>,
    ) -> Result<&mut Self, CodecError> {
        let signature = pk.sign_hash(self.signing_hash())?;
        let address = pk.to_address()?;
        let network_id = match network {
            Some(network) => BigUint::from(network),
            None => self.chain_id.clone(),
        };
        debug!("Signed {:?} transaction by {}", self.tx_type(), address);

        self.signature = Some(signature);
        self.from = Some(Sender {
            address,
            network_id,
        });
        Ok(self)
    }

    /// Recover public key of the signer. Doesn't update `from`
    pub fn recover(&self) -> Result<ConfluxPublicKey, CodecError> {
        let signature = self
            .signature
            .as_ref()
            .ok_or(CodecError::SignatureRecoveryUnavailable)?;
        signature.recover(self.signing_hash())
    }

    /// Transaction hash, calculated on each call from the current state of the transaction.
    /// `None` if the transaction is not signed
    pub fn hash(&self) -> Option<[u8; KECCAK256_BYTES]> {
        self.encode(true).ok().map(|raw| keccak256(&raw))
    }

    /// Signed raw transaction as a `0x` prefixed hex string
    pub fn serialize(&self) -> Result<String, CodecError> {
        Ok(ConfluxHex::encode(self.encode(true)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blockchain::conflux::access_list::{AccessListItem, StorageKey},
        convert::error::ConversionError,
        tests::*,
    };

    const ADDRESS_A: &str = "19c742cec42b9e4eff3b84cdedcde2f58a36f44f";
    const ADDRESS_B: &str = "8e1c9a5e8e3c0f9b4bd3a4c5f6f2bbbf7e1d8f6a";

    fn key_1() -> ConfluxPrivateKey {
        ConfluxPrivateKey(to_32bytes(
            "4646464646464646464646464646464646464646464646464646464646464646",
        ))
    }

    fn legacy_tx() -> Transaction {
        Transaction {
            nonce: BigUint::from(0u32),
            gas: BigUint::from(21000u32),
            to: Some(ConfluxAddress(to_20bytes(ADDRESS_A))),
            value: BigUint::from(0u32),
            storage_limit: BigUint::from(0u32),
            epoch_height: BigUint::from(100u32),
            chain_id: BigUint::from(1u32),
            data: Vec::new(),
            fee: TransactionFee::Legacy {
                gas_price: BigUint::from(1u32),
            },
            signature: None,
            from: None,
        }
    }

    fn access_list_b() -> AccessList {
        AccessList(vec![AccessListItem::new(
            ConfluxAddress(to_20bytes(ADDRESS_B)),
            vec![StorageKey([0x01; 32]), StorageKey([0x02; 32])],
        )])
    }

    #[test]
    fn encode_unsigned_legacy() {
        let hex = hex::encode(legacy_tx().encode(false).unwrap());
        assert_eq!(
            hex,
            "".to_owned()
                + "df" // total size = 1 +1 +3 +21 +1 +1 +1 +1 +1 + 0xc0
                + "80" // nonce
                + "01" // gas price
                + "82" + "5208" // gas
                + "94" + ADDRESS_A // to
                + "80" // value
                + "80" // storage limit
                + "64" // epoch height
                + "01" // chain id
                + "80" // data
        );
    }

    #[test]
    fn encode_contract_creation() {
        let mut tx = legacy_tx();
        tx.to = None;
        let hex = hex::encode(tx.encode(false).unwrap());
        assert_eq!(
            hex,
            "".to_owned() + "cb" + "80" + "01" + "825208" + "80" + "80" + "80" + "64" + "01" + "80"
        );
    }

    #[test]
    fn encode_unsigned_access_list() {
        let mut tx = legacy_tx();
        tx.fee = TransactionFee::AccessList {
            gas_price: BigUint::from(1u32),
            access_list: access_list_b(),
        };
        let hex = hex::encode(tx.encode(false).unwrap());
        assert_eq!(
            hex,
            "".to_owned()
                + "63667801" // cfx\x01
                + "f87c" // 31 + 93 bytes
                + "80" + "01" + "825208" + "94" + ADDRESS_A + "80" + "80" + "64" + "01" + "80"
                + "f85b" + "f859" + "94" + ADDRESS_B
                + "f842" + "a0" + &"01".repeat(32) + "a0" + &"02".repeat(32)
        );
    }

    #[test]
    fn encode_unsigned_dynamic_fee() {
        let mut tx = legacy_tx();
        tx.fee = TransactionFee::DynamicFee {
            max_priority_fee_per_gas: BigUint::from(1u32),
            max_fee_per_gas: BigUint::from(2u32),
            access_list: AccessList::default(),
        };
        let hex = hex::encode(tx.encode(false).unwrap());
        assert_eq!(
            hex,
            "".to_owned()
                + "63667802" // cfx\x02
                + "e1" // 33 bytes
                + "80" // nonce
                + "01" // max priority fee
                + "02" // max fee
                + "825208" + "94" + ADDRESS_A + "80" + "80" + "64" + "01" + "80"
                + "c0" // empty access list
        );
    }

    #[test]
    fn hash_unavailable_for_unsigned() {
        let tx = legacy_tx();
        assert_eq!(tx.hash(), None);
        assert_eq!(tx.encode(true), Err(CodecError::SignatureRecoveryUnavailable));
        assert_eq!(tx.serialize(), Err(CodecError::SignatureRecoveryUnavailable));
        assert_eq!(tx.recover(), Err(CodecError::SignatureRecoveryUnavailable));
    }

    #[test]
    fn sign_sets_sender() {
        let mut tx = legacy_tx();
        let key = key_1();
        tx.sign(&key, None).unwrap();

        assert!(tx.is_signed());
        let from = tx.from.clone().unwrap();
        assert_eq!(from.address, key.to_address().unwrap());
        assert_eq!(from.network_id, BigUint::from(1u32));
        assert_eq!(tx.recover().unwrap().to_address(), from.address);
        assert!(tx.hash().is_some());
    }

    #[test]
    fn sign_with_network() {
        let mut tx = legacy_tx();
        let from = tx
            .sign(&key_1(), Some(ConfluxNetwork::Mainnet))
            .unwrap()
            .from
            .clone()
            .unwrap();
        assert_eq!(from.network_id, BigUint::from(1029u32));
    }

    #[test]
    fn signed_legacy_layout() {
        let mut tx = legacy_tx();
        tx.signature = Some(ConfluxSignature::new(0, [0x11; 32], [0x22; 32]));
        let hex = hex::encode(tx.encode(true).unwrap());
        // [[fields], v, r, s], 32 + 1 + 33 + 33 bytes
        assert_eq!(
            hex,
            "".to_owned()
                + "f863"
                + "df" + "80" + "01" + "825208" + "94" + ADDRESS_A + "80" + "80" + "64" + "01" + "80"
                + "80" // v = 0 is empty
                + "a0" + &"11".repeat(32)
                + "a0" + &"22".repeat(32)
        );
    }

    #[test]
    fn signature_scalars_are_trimmed() {
        let mut tx = legacy_tx();
        let mut r = [0u8; 32];
        r[31] = 0x05;
        tx.signature = Some(ConfluxSignature::new(1, r, [0x22; 32]));
        let raw = tx.encode(true).unwrap();
        let decoded = Transaction::decode(&raw).unwrap();
        assert_eq!(decoded.signature, tx.signature);
        // r is a single byte 0x05 right after v = 0x01
        let hex = hex::encode(&raw);
        assert!(hex.contains(&("0105".to_owned() + "a0" + &"22".repeat(32))));
    }

    #[test]
    fn sign_and_decode_legacy() {
        let mut tx = legacy_tx();
        let key = key_1();
        tx.sign(&key, None).unwrap();

        let raw = tx.serialize().unwrap();
        assert!(raw.starts_with("0xf8"));
        let decoded = Transaction::decode_raw(&raw).unwrap();

        assert_eq!(decoded, tx);
        assert_eq!(
            decoded.from.as_ref().unwrap().address,
            key.to_address().unwrap()
        );
        assert_eq!(decoded.hash(), tx.hash());
    }

    #[test]
    fn sign_and_decode_access_list() {
        let mut tx = legacy_tx();
        tx.fee = TransactionFee::AccessList {
            gas_price: BigUint::from(1u32),
            access_list: access_list_b(),
        };
        tx.sign(&key_1(), None).unwrap();

        let decoded = Transaction::decode(&tx.encode(true).unwrap()).unwrap();
        assert_eq!(decoded.tx_type(), TransactionType::AccessList);
        assert_eq!(decoded, tx);
        let list = decoded.access_list().unwrap();
        assert_eq!(list[0].address, ConfluxAddress(to_20bytes(ADDRESS_B)));
        assert_eq!(
            list[0].storage_keys,
            vec![StorageKey([0x01; 32]), StorageKey([0x02; 32])]
        );
    }

    #[test]
    fn sign_and_decode_dynamic_fee() {
        let mut tx = legacy_tx();
        tx.to = None;
        tx.data = vec![0x60, 0x80, 0x60, 0x40];
        tx.fee = TransactionFee::DynamicFee {
            max_priority_fee_per_gas: BigUint::from(1_000_000_000u64),
            max_fee_per_gas: BigUint::from(20_000_000_000u64),
            access_list: AccessList::default(),
        };
        tx.sign(&key_1(), Some(ConfluxNetwork::Testnet)).unwrap();

        let decoded = Transaction::decode(&tx.encode(true).unwrap()).unwrap();
        assert_eq!(decoded.tx_type(), TransactionType::DynamicFee);
        assert_eq!(decoded.to, None);
        assert_eq!(decoded.max_fee_per_gas(), Some(&BigUint::from(20_000_000_000u64)));
        assert_eq!(decoded.gas_price(), None);
        assert_eq!(decoded, tx);
    }

    #[test]
    fn decode_keeps_unrecoverable_sender_unset() {
        let mut tx = legacy_tx();
        tx.signature = Some(ConfluxSignature::new(5, [0x11; 32], [0x22; 32]));
        let decoded = Transaction::decode(&tx.encode(true).unwrap()).unwrap();
        assert_eq!(decoded.from, None);
        assert_eq!(decoded.signature.as_ref().unwrap().v, BigUint::from(5u8));
        assert_eq!(decoded.recover(), Err(CodecError::SignatureRecoveryUnavailable));
        assert!(decoded.hash().is_some());
    }

    #[test]
    fn decode_keeps_wide_v() {
        let mut tx = legacy_tx();
        tx.signature = Some(ConfluxSignature {
            v: BigUint::from(0x0100u32),
            r: BigUint::from_bytes_be(&[0x11; 32]),
            s: BigUint::from_bytes_be(&[0x22; 32]),
        });
        let raw = tx.encode(true).unwrap();
        let decoded = Transaction::decode(&raw).unwrap();

        assert_eq!(decoded.from, None);
        assert_eq!(decoded.signature, tx.signature);
        assert_eq!(decoded.recover(), Err(CodecError::SignatureRecoveryUnavailable));
        assert_eq!(decoded.encode(true).unwrap(), raw);
    }

    #[test]
    fn decode_keeps_wide_r() {
        let mut tx = legacy_tx();
        tx.signature = Some(ConfluxSignature {
            v: BigUint::from(1u8),
            r: BigUint::from_bytes_be(&[0x11; 33]),
            s: BigUint::from_bytes_be(&[0x22; 32]),
        });
        let raw = tx.encode(true).unwrap();
        let decoded = Transaction::decode(&raw).unwrap();

        assert_eq!(decoded.from, None);
        assert_eq!(decoded.signature, tx.signature);
        assert_eq!(decoded.recover(), Err(CodecError::SignatureRecoveryUnavailable));
        assert_eq!(decoded.hash(), Some(keccak256(&raw)));
    }

    #[test]
    fn reject_deeply_nested_payload() {
        // lists nested one level deeper than the decoder accepts, built from the inside out
        let mut raw = vec![0xc0u8];
        for _ in 0..rlp::MAX_DEPTH {
            raw.push(0xc0 + raw.len() as u8);
        }
        raw.reverse();
        assert!(matches!(
            Transaction::decode(&raw),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    // Signed with key 0x46..46, values produced by an independent implementation
    // of keccak-256, RFC 6979 secp256k1 signing and RLP.

    #[test]
    fn signed_legacy_vector() {
        let mut tx = legacy_tx();
        assert_eq!(
            hex::encode(tx.signing_hash()),
            "31112ccc8e0392dbbc0163515d4a2759f789d13c0559a7ccf74aa7e563580634"
        );
        tx.sign(&key_1(), None).unwrap();
        let raw = "0xf863df80018252089419c742cec42b9e4eff3b84cdedcde2f58a36f44f808064018001\
                   a0371489d73832c8eec6db8f04e77cddc7bc6df316f828d79c46e86f691f502261\
                   a075ff195eecf89217da9832c868ebb1445b5e10140a79b903f21231f64006cf88";
        assert_eq!(tx.serialize().unwrap(), raw);
        assert_eq!(
            hex::encode(tx.hash().unwrap()),
            "93e52d490d1c04d3f31955d562fbb6f4e547e5c09beca801b55720ed3314f0fb"
        );

        let decoded = Transaction::decode_raw(raw).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(
            decoded.from.unwrap().address.to_string(),
            "0x1d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
        );
    }

    #[test]
    fn signed_access_list_vector() {
        let mut tx = legacy_tx();
        tx.fee = TransactionFee::AccessList {
            gas_price: BigUint::from(1u32),
            access_list: access_list_b(),
        };
        assert_eq!(
            hex::encode(tx.signing_hash()),
            "ccc015e8bb857b101e46431b5c3df39ceb20fc9dc38eeca9d2174b6dcdfaccd1"
        );
        tx.sign(&key_1(), None).unwrap();
        let raw = "0x63667801f8c1f87c80018252089419c742cec42b9e4eff3b84cdedcde2f58a36f44f80806401\
                   80f85bf859948e1c9a5e8e3c0f9b4bd3a4c5f6f2bbbf7e1d8f6af842\
                   a00101010101010101010101010101010101010101010101010101010101010101\
                   a00202020202020202020202020202020202020202020202020202020202020202\
                   01\
                   a008d7507f5b26bf8406d09c3d6318aace5ce554d8c70b0c2df1d7e9d2fd38e1cb\
                   a0274b4a2dd57f6521ec7e632c70e13649823ff7cbdd1dad0d671a58e3837c2c89";
        assert_eq!(tx.serialize().unwrap(), raw);
        assert_eq!(
            hex::encode(tx.hash().unwrap()),
            "bdbfff253bedf758157b74e97647a550215ee61d273ccf84043daa5bf05d6cd9"
        );
        assert_eq!(Transaction::decode_raw(raw).unwrap(), tx);
    }

    #[test]
    fn signed_dynamic_fee_vector() {
        let mut tx = legacy_tx();
        tx.fee = TransactionFee::DynamicFee {
            max_priority_fee_per_gas: BigUint::from(1u32),
            max_fee_per_gas: BigUint::from(2u32),
            access_list: AccessList::default(),
        };
        assert_eq!(
            hex::encode(tx.signing_hash()),
            "a28074502ea79d0a62c0facd2e8b594ab804cd8b6daae797fab2cb7bc8112bb0"
        );
        tx.sign(&key_1(), None).unwrap();
        let raw = "0x63667802f865e18001028252089419c742cec42b9e4eff3b84cdedcde2f58a36f44f80806401\
                   80c080\
                   a0b43d76c7d0c16dc3061e6458d135896b3b2443423fda8e6bdf332d2f79aed500\
                   a07170e6d0d41cd9c7ff96a2c8d2d9cbfa2133b0b9dbe38811f4fcb4529c96a65d";
        assert_eq!(tx.serialize().unwrap(), raw);
        assert_eq!(
            hex::encode(tx.hash().unwrap()),
            "1d6e24a8ae264fa428d0ea4f8fec8232a1e0fd5bc6b8628e563819a0af51530a"
        );
        assert_eq!(Transaction::decode_raw(raw).unwrap(), tx);
    }

    #[test]
    fn detect_type_by_prefix() {
        assert_eq!(
            TransactionType::detect(&[0x63, 0x66, 0x78, 0x01, 0xc0]),
            TransactionType::AccessList
        );
        assert_eq!(
            TransactionType::detect(&[0x63, 0x66, 0x78, 0x02, 0xc0]),
            TransactionType::DynamicFee
        );
        assert_eq!(
            TransactionType::detect(&[0x63, 0x66, 0x78, 0x03, 0xc0]),
            TransactionType::Legacy
        );
        assert_eq!(TransactionType::detect(&[0x01]), TransactionType::Legacy);
        assert_eq!(TransactionType::detect(&[]), TransactionType::Legacy);
    }

    #[test]
    fn reject_unknown_type() {
        assert_eq!(
            TransactionType::try_from(3u64),
            Err(CodecError::UnsupportedType(3))
        );
        assert_eq!(TransactionType::try_from(2u64), Ok(TransactionType::DynamicFee));
        assert_eq!(TransactionType::try_from(1u8), Ok(TransactionType::AccessList));
        assert_eq!(TransactionType::try_from(0xffu8), Err(CodecError::UnsupportedType(255)));
        assert_eq!(u64::from(TransactionType::AccessList), 1);
    }

    #[test]
    fn reject_unsigned_payload() {
        let raw = legacy_tx().encode(false).unwrap();
        assert!(matches!(
            Transaction::decode(&raw),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn reject_wrong_field_count() {
        // legacy layout behind the access list marker
        let mut tx = legacy_tx();
        tx.signature = Some(ConfluxSignature::default());
        let mut raw = TX_PREFIX_ACCESS_LIST.to_vec();
        raw.extend(tx.encode(true).unwrap());
        assert!(matches!(
            Transaction::decode(&raw),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn reject_oversized_recipient() {
        let item = RlpItem::List(vec![
            RlpItem::List(vec![
                RlpItem::empty(),
                RlpItem::bytes(vec![0x01]),
                RlpItem::bytes(vec![0x52, 0x08]),
                RlpItem::bytes(vec![0x11; 21]),
                RlpItem::empty(),
                RlpItem::empty(),
                RlpItem::bytes(vec![0x64]),
                RlpItem::bytes(vec![0x01]),
                RlpItem::empty(),
            ]),
            RlpItem::empty(),
            RlpItem::empty(),
            RlpItem::empty(),
        ]);
        assert_eq!(
            Transaction::decode(&rlp::encode(&item)),
            Err(CodecError::InvalidFieldValue(ConversionError::InvalidLength))
        );
    }

    #[test]
    fn reject_bad_hex() {
        assert_eq!(
            Transaction::decode_raw("0xf8z"),
            Err(CodecError::InvalidFieldValue(ConversionError::InvalidHex))
        );
    }

    #[test]
    fn hash_follows_mutation() {
        let mut tx = legacy_tx();
        tx.sign(&key_1(), None).unwrap();
        let before = tx.hash().unwrap();
        tx.nonce = BigUint::from(1u32);
        assert_ne!(tx.hash().unwrap(), before);
    }
}
