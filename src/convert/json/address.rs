use crate::blockchain::conflux::{access_list::StorageKey, address::ConfluxAddress};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

impl<'de> Deserialize<'de> for ConfluxAddress {
    fn deserialize<D>(deserializer: D) -> Result<ConfluxAddress, D::Error>
        where
            D: Deserializer<'de>,
    {
        String::deserialize(deserializer)
            .and_then(|s| ConfluxAddress::from_str(&s).map_err(de::Error::custom))
    }
}

impl Serialize for ConfluxAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StorageKey {
    fn deserialize<D>(deserializer: D) -> Result<StorageKey, D::Error>
        where
            D: Deserializer<'de>,
    {
        String::deserialize(deserializer)
            .and_then(|s| StorageKey::from_str(&s).map_err(de::Error::custom))
    }
}

impl Serialize for StorageKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
