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
use crate::convert::error::ConversionError;

pub struct ConfluxHex {}

///
/// Common utilities to encode and decode bytes in hex format. Decoding accepts an optional
/// `0x` prefix and any letter case, but rejects strings of odd length.
impl ConfluxHex {

    pub fn decode<S: AsRef<str>>(s: S) -> Result<Vec<u8>, ConversionError> {
        let s = s.as_ref();
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        hex::decode(s).map_err(|_| ConversionError::InvalidHex)
    }

    pub fn encode<T: AsRef<[u8]>>(n: T) -> String {
        format!("0x{}", hex::encode(n))
    }
}
