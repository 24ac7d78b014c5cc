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
//! # Integer quantities
//!
//! All integer fields of a transaction are unbounded non-negative integers. On the wire they are
//! big-endian byte strings without leading zeros, so zero is the empty string.

use crate::convert::error::ConversionError;
use num::{Num, Zero};
use num_bigint::BigUint;

/// A value which can be interpreted as a non-negative integer quantity
pub trait IntoQuantity {
    /// Convert into an integer, or fail if the value is not a valid non-negative integer
    fn into_quantity(self) -> Result<BigUint, ConversionError>;
}

macro_rules! unsigned_quantity {
    ($($t:ty),*) => {
        $(
            impl IntoQuantity for $t {
                fn into_quantity(self) -> Result<BigUint, ConversionError> {
                    Ok(BigUint::from(self))
                }
            }
        )*
    };
}

unsigned_quantity!(u8, u16, u32, u64, u128, usize);

macro_rules! signed_quantity {
    ($($t:ty),*) => {
        $(
            impl IntoQuantity for $t {
                fn into_quantity(self) -> Result<BigUint, ConversionError> {
                    if self < 0 {
                        return Err(ConversionError::NegativeQuantity);
                    }
                    Ok(BigUint::from(self as u64))
                }
            }
        )*
    };
}

signed_quantity!(i32, i64);

impl IntoQuantity for BigUint {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        Ok(self)
    }
}

impl IntoQuantity for &BigUint {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        Ok(self.clone())
    }
}

/// A `0x` prefixed string is a hex number, anything else must be a decimal number
impl IntoQuantity for &str {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        let value = self.trim();
        if value.starts_with('-') {
            return Err(ConversionError::NegativeQuantity);
        }
        if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            if hex.is_empty() {
                return Ok(BigUint::zero());
            }
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConversionError::InvalidQuantity(self.to_string()));
            }
            return Ok(BigUint::from_str_radix(hex, 16)?);
        }
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConversionError::InvalidQuantity(self.to_string()));
        }
        Ok(BigUint::from_str_radix(value, 10)?)
    }
}

impl IntoQuantity for String {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        self.as_str().into_quantity()
    }
}

impl IntoQuantity for &String {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        self.as_str().into_quantity()
    }
}

/// Raw big-endian bytes
impl IntoQuantity for &[u8] {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        Ok(from_bytes(self))
    }
}

impl IntoQuantity for Vec<u8> {
    fn into_quantity(self) -> Result<BigUint, ConversionError> {
        Ok(from_bytes(&self))
    }
}

/// Minimal big-endian representation, the empty vector for zero
pub fn to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Read a big-endian integer; the empty slice is zero
pub fn from_bytes(data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(data)
}

/// `0x` prefixed lowercase hex, without leading zeros
pub fn to_hex(value: &BigUint) -> String {
    format!("0x{:x}", value)
}
