pub mod coinbase;
pub mod common;
pub mod provider;

use bitcoin::consensus::{deserialize, encode, serialize};

pub use self::{
    coinbase::CbTx,
    common::{BlsSignature, Maybe, RawBytes},
    provider::ProUpRevTx,
};
use crate::special_tx::SpecialTxType;

/// Typed view over the extra payload of a special transaction. Types without a
/// dedicated decoder stay opaque.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SpecialPayload {
    Coinbase(CbTx),
    ProviderUpdateRevoke(ProUpRevTx),
    Other(SpecialTxType, RawBytes),
}

impl SpecialPayload {
    pub fn decode(tx_type: u16, payload: &[u8]) -> Result<Self, encode::Error> {
        let message = match SpecialTxType::from(tx_type) {
            SpecialTxType::Coinbase => SpecialPayload::Coinbase(deserialize(payload)?),
            SpecialTxType::ProviderUpdateRevoke => {
                SpecialPayload::ProviderUpdateRevoke(deserialize(payload)?)
            }
            other => SpecialPayload::Other(other, RawBytes(payload.to_vec())),
        };

        Ok(message)
    }

    pub fn tx_type(&self) -> SpecialTxType {
        match self {
            SpecialPayload::Coinbase(_) => SpecialTxType::Coinbase,
            SpecialPayload::ProviderUpdateRevoke(_) => SpecialTxType::ProviderUpdateRevoke,
            SpecialPayload::Other(tx_type, _) => *tx_type,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            SpecialPayload::Coinbase(data) => serialize(data),
            SpecialPayload::ProviderUpdateRevoke(data) => serialize(data),
            SpecialPayload::Other(_, raw) => raw.0.clone(),
        }
    }
}
