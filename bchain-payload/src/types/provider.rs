use bchain_macros::ConsensusEncoding;
use bitcoin::Txid;

use super::common::BlsSignature;

#[derive(ConsensusEncoding, Debug, PartialEq, Eq, Clone)]
pub struct ProUpRevTx {
    pub version: u16,
    pub pro_tx_hash: Txid,
    pub reason: u16,
    pub inputs_hash: [u8; 32],
    pub sig: BlsSignature,
}
