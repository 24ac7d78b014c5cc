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
use num_bigint::BigUint;
use std::str::FromStr;

/// Conflux Network Id Reference
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfluxNetwork {
    /// Conflux Core Space mainnet (Tethys)
    Mainnet,
    /// Conflux Core Space testnet
    Testnet,
    Custom(u32),
}

impl ConfluxNetwork {
    /// network_id for current Network
    pub fn as_network_id(&self) -> u32 {
        match self {
            ConfluxNetwork::Mainnet => 1029,
            ConfluxNetwork::Testnet => 1,
            ConfluxNetwork::Custom(v) => *v,
        }
    }
}

impl From<u32> for ConfluxNetwork {
    fn from(value: u32) -> Self {
        match value {
            1029 => ConfluxNetwork::Mainnet,
            1 => ConfluxNetwork::Testnet,
            v => ConfluxNetwork::Custom(v),
        }
    }
}

impl From<ConfluxNetwork> for BigUint {
    fn from(value: ConfluxNetwork) -> Self {
        BigUint::from(value.as_network_id())
    }
}

impl FromStr for ConfluxNetwork {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean = s.trim().to_lowercase();
        match clean.as_str() {
            "cfx" | "mainnet" | "conflux" | "tethys" => Ok(ConfluxNetwork::Mainnet),
            "cfxtest" | "testnet" => Ok(ConfluxNetwork::Testnet),
            _ => {
                let id = clean.strip_prefix("net").unwrap_or(clean.as_str());
                id.parse::<u32>().map(ConfluxNetwork::from).map_err(|_| ())
            }
        }
    }
}
