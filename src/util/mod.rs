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
//! # Util functions module

mod crypto;

pub use self::crypto::{keccak256, KECCAK256_BYTES};

/// Convert a slice into array
pub fn to_arr<A, T>(slice: &[T]) -> A
where
    A: AsMut<[T]> + Default,
    T: Clone,
{
    let mut arr = Default::default();
    <A as AsMut<[T]>>::as_mut(&mut arr).clone_from_slice(slice);
    arr
}

/// Trim all leading zero bytes, so a zero value becomes an empty slice
pub fn trim_bytes(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|b| *b != 0).unwrap_or(data.len());
    &data[start..]
}

/// Left-pad a big-endian value to `N` bytes.
/// Returns `None` if the value doesn't fit.
pub fn left_pad<const N: usize>(data: &[u8]) -> Option<[u8; N]> {
    if data.len() > N {
        return None;
    }
    let mut res = [0u8; N];
    res[N - data.len()..].copy_from_slice(data);
    Some(res)
}
