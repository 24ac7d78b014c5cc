//! # JSON representation of transactions and their parts

pub mod address;
pub mod transaction;
