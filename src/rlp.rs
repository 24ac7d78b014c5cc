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
//! RLP (Recursive Length Prefix) is to encode arbitrarily nested arrays of binary data,
//! and it's the encoding every transaction variant is serialized with. Integers are represented
//! in big endian binary form with no leading zeroes, so the integer zero is the empty byte array.
//!
//! Decoding is strict: any header that is not the shortest possible one is rejected.
//!
//! See [RLP spec](https://ethereum.org/en/developers/docs/data-structures-and-encoding/rlp/)

use crate::error::CodecError;
use ::rlp::{Encodable, RlpStream};
use byteorder::{BigEndian, ByteOrder};

/// Largest payload which is described by a single byte header
const SHORT_PAYLOAD_MAX: usize = 55;

const OFFSET_SHORT_STRING: u8 = 0x80;
const OFFSET_LONG_STRING: u8 = 0xb7;
const OFFSET_SHORT_LIST: u8 = 0xc0;
const OFFSET_LONG_LIST: u8 = 0xf7;

/// Deepest list nesting accepted by the decoder. A transaction goes 5 levels deep at most
/// (payload, fields, access list, entry, storage keys).
pub const MAX_DEPTH: usize = 16;

/// A decoded RLP tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    /// Byte string
    Bytes(Vec<u8>),
    /// List of nested items
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Byte string item
    pub fn bytes<T: Into<Vec<u8>>>(value: T) -> RlpItem {
        RlpItem::Bytes(value.into())
    }

    /// Empty byte string, i.e. zero or an absent value
    pub fn empty() -> RlpItem {
        RlpItem::Bytes(Vec::new())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Get the content of a byte string item, fails for a list
    pub fn as_bytes(&self) -> Result<&[u8], CodecError> {
        match self {
            RlpItem::Bytes(b) => Ok(b.as_slice()),
            RlpItem::List(_) => Err(CodecError::MalformedEncoding(
                "expected a string, got a list".to_string(),
            )),
        }
    }

    /// Get the items of a list, fails for a byte string
    pub fn as_list(&self) -> Result<&[RlpItem], CodecError> {
        match self {
            RlpItem::List(items) => Ok(items.as_slice()),
            RlpItem::Bytes(_) => Err(CodecError::MalformedEncoding(
                "expected a list, got a string".to_string(),
            )),
        }
    }

    /// Get the items of a list which must have exactly `size` elements
    pub fn as_list_of(&self, size: usize) -> Result<&[RlpItem], CodecError> {
        let items = self.as_list()?;
        if items.len() != size {
            return Err(CodecError::MalformedEncoding(format!(
                "expected a list of {} items, got {}",
                size,
                items.len()
            )));
        }
        Ok(items)
    }
}

impl Encodable for RlpItem {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            RlpItem::Bytes(value) => value.rlp_append(s),
            RlpItem::List(items) => {
                s.begin_list(items.len());
                for item in items {
                    s.append(item);
                }
            }
        }
    }
}

/// Encode item as RLP bytes
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut stream = RlpStream::new();
    stream.append(item);
    stream.out().to_vec()
}

/// Decode RLP bytes into a tree of items. The input must contain exactly one item.
pub fn decode(data: &[u8]) -> Result<RlpItem, CodecError> {
    let (item, consumed) = decode_item(data, 0)?;
    if consumed != data.len() {
        return Err(malformed(format!(
            "{} trailing bytes after the top level item",
            data.len() - consumed
        )));
    }
    Ok(item)
}

fn malformed<S: Into<String>>(msg: S) -> CodecError {
    CodecError::MalformedEncoding(msg.into())
}

/// Decode a single item from the start of `data`, returns the item and the number of consumed bytes
fn decode_item(data: &[u8], depth: usize) -> Result<(RlpItem, usize), CodecError> {
    let prefix = *data.first().ok_or_else(|| malformed("input too short"))?;

    if prefix < OFFSET_SHORT_STRING {
        // a single byte in the [0x00, 0x7f] range is its own encoding
        return Ok((RlpItem::Bytes(vec![prefix]), 1));
    }

    if prefix < OFFSET_SHORT_LIST {
        let (header_len, len) = if prefix <= OFFSET_LONG_STRING {
            (1, (prefix - OFFSET_SHORT_STRING) as usize)
        } else {
            read_long_length(data, (prefix - OFFSET_LONG_STRING) as usize)?
        };
        let payload = payload(data, header_len, len)?;
        if len == 1 && payload[0] < OFFSET_SHORT_STRING {
            return Err(malformed("single byte below 0x80 must not have a header"));
        }
        return Ok((RlpItem::Bytes(payload.to_vec()), header_len + len));
    }

    if depth >= MAX_DEPTH {
        return Err(malformed(format!("lists nested deeper than {}", MAX_DEPTH)));
    }
    let (header_len, len) = if prefix <= OFFSET_LONG_LIST {
        (1, (prefix - OFFSET_SHORT_LIST) as usize)
    } else {
        read_long_length(data, (prefix - OFFSET_LONG_LIST) as usize)?
    };
    let mut rest = payload(data, header_len, len)?;
    let mut items = Vec::new();
    while !rest.is_empty() {
        let (item, consumed) = decode_item(rest, depth + 1)?;
        items.push(item);
        rest = &rest[consumed..];
    }
    Ok((RlpItem::List(items), header_len + len))
}

/// Read a long form length, i.e. `len_of_len` big-endian bytes following the prefix
fn read_long_length(data: &[u8], len_of_len: usize) -> Result<(usize, usize), CodecError> {
    if len_of_len > 8 {
        return Err(malformed("length of length exceeds 8 bytes"));
    }
    let len_bytes = data
        .get(1..1 + len_of_len)
        .ok_or_else(|| malformed("input too short for the length"))?;
    if len_bytes[0] == 0 {
        return Err(malformed("length has a leading zero byte"));
    }
    let len = usize::try_from(BigEndian::read_uint(len_bytes, len_of_len))
        .map_err(|_| malformed("length doesn't fit into memory"))?;
    if len <= SHORT_PAYLOAD_MAX {
        return Err(malformed("long form header used for a short payload"));
    }
    Ok((1 + len_of_len, len))
}

fn payload(data: &[u8], header_len: usize, len: usize) -> Result<&[u8], CodecError> {
    let end = header_len
        .checked_add(len)
        .ok_or_else(|| malformed("length overflow"))?;
    data.get(header_len..end)
        .ok_or_else(|| malformed("input too short for the payload"))
}
