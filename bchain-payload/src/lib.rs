mod special_tx;
pub mod types;

pub use bitcoin::consensus::{deserialize, serialize};

pub use crate::types::*;
pub use special_tx::{split_version, SpecialTxType};

pub const COIN: i64 = 100_000_000;

/// Lowest transaction version allowed to carry a typed extra payload.
pub const SPECIAL_TX_MIN_VERSION: i32 = 3;
