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
use std::fmt::Display;

/// Field level conversion failure
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Not a hex string, or a hex string of odd length
    InvalidHex,
    /// Value has a width different from the expected one
    InvalidLength,
    /// Integer quantity cannot be parsed
    InvalidQuantity(String),
    /// Integer quantity is below zero
    NegativeQuantity,
    /// Required field is not set
    MissingField(String),
    /// Field is set but doesn't belong to the transaction type
    UnexpectedField(String),
    /// Only a part of `v`, `r`, `s` is set
    PartialSignature,
}

impl From<hex::FromHexError> for ConversionError {
    fn from(_: hex::FromHexError) -> Self {
        ConversionError::InvalidHex
    }
}

impl From<num_bigint::ParseBigIntError> for ConversionError {
    fn from(err: num_bigint::ParseBigIntError) -> Self {
        ConversionError::InvalidQuantity(err.to_string())
    }
}
