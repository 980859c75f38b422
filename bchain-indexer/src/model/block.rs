use bitcoin::BlockHash;
use serde::{Deserialize, Serialize};

use super::Tx;

/// Decoded block. The block's own hash is not computed here since the
/// header hashing function is chain specific; callers key blocks by height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub prev_hash: BlockHash,
    pub time: i64,
    pub size: usize,
    pub txs: Vec<Tx>,
}

/// Per-height block summary kept next to the packed transactions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockMeta {
    pub prev_hash: BlockHash,
    pub time: i64,
    pub size: u64,
    pub tx_count: u32,
}

impl From<&Block> for BlockMeta {
    fn from(block: &Block) -> Self {
        Self {
            prev_hash: block.prev_hash,
            time: block.time,
            size: block.size as u64,
            tx_count: block.txs.len() as u32,
        }
    }
}
