use bchain_macros::ConsensusEncoding;

use super::common::{Maybe, RawBytes};

/// Coinbase special payload. Version 1 commits to the masternode list,
/// version 2 adds the quorum merkle root and later versions append chainlock
/// and credit pool data, which is kept as raw bytes.
#[derive(ConsensusEncoding, Debug, PartialEq, Eq, Clone)]
pub struct CbTx {
    pub version: u16,
    pub height: u32,
    pub merkle_root_mn_list: [u8; 32],
    pub merkle_root_quorums: Maybe<[u8; 32]>,
    pub rest: RawBytes,
}
