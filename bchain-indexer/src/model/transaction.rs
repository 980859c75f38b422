use bchain_payload::{SpecialPayload, SpecialTxType};
use bitcoin::Txid;

use super::{Vin, VinSource, Vout};
use crate::{address::AddressResolver, Result};

/// Extension block carried by special-type transactions. The type
/// discriminant never travels without its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraPayload {
    pub tx_type: u16,
    pub payload: Vec<u8>,
}

impl ExtraPayload {
    pub fn special_type(&self) -> SpecialTxType {
        SpecialTxType::from(self.tx_type)
    }

    pub fn decode(&self) -> Result<SpecialPayload> {
        Ok(SpecialPayload::decode(self.tx_type, &self.payload)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub txid: Txid,
    pub version: i32,
    pub lock_time: u32,
    pub hex: Vec<u8>,
    pub block_time: i64,
    pub time: i64,
    /// Derived from the chain tip at read time, never stored.
    pub confirmations: u32,
    pub vin: Vec<Vin>,
    pub vout: Vec<Vout>,
    pub extra_payload: Option<ExtraPayload>,
}

impl Tx {
    pub fn is_coinbase(&self) -> bool {
        matches!(
            self.vin.as_slice(),
            [Vin {
                source: VinSource::Coinbase(_),
                ..
            }]
        )
    }

    pub fn tx_type(&self) -> SpecialTxType {
        self.extra_payload
            .as_ref()
            .map_or(SpecialTxType::Normal, ExtraPayload::special_type)
    }

    /// Copy of the transaction with confirmations counted from `best_height`.
    pub fn with_confirmations(mut self, best_height: u32, tx_height: u32) -> Self {
        self.confirmations = if best_height >= tx_height {
            best_height - tx_height + 1
        } else {
            0
        };
        self
    }

    pub fn resolve_addresses(&mut self, resolver: &AddressResolver) {
        for vout in &mut self.vout {
            vout.addresses = resolver.addresses(&vout.script_pubkey);
        }
    }
}
