use bchain_payload::{split_version, SpecialTxType};
use bitcoin::consensus::deserialize_partial;

use super::ExtraPayloadParser;
use crate::Result;

/// Special transactions announce their type in the upper half of the version
/// word and append a compact-size prefixed payload after the lock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialTxPayload;

impl ExtraPayloadParser for SpecialTxPayload {
    fn split_version(&self, raw_version: i32) -> (i32, Option<u16>) {
        match split_version(raw_version) {
            (version, SpecialTxType::Normal) => (version, None),
            (version, tx_type) => (version, Some(u16::from(tx_type))),
        }
    }

    fn parse_payload(&self, _tx_type: u16, rest: &[u8]) -> Result<(Vec<u8>, usize)> {
        Ok(deserialize_partial::<Vec<u8>>(rest)?)
    }
}
