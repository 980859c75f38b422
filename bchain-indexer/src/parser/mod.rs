mod json;
mod special;

use std::sync::Arc;

use bitcoin::{
    block::Header,
    consensus::deserialize_partial,
    hashes::{sha256d, Hash},
    Transaction, Txid, VarInt,
};
use log::debug;

pub use self::special::SpecialTxPayload;
use crate::{
    address::AddressResolver,
    model::{Block, ExtraPayload, Tx, Vin, Vout},
    params::ParameterSet,
    Error, Result,
};

/// Network specific extension of the standard transaction encoding.
pub trait ExtraPayloadParser: Send + Sync {
    /// Splits a raw version word into the version kept on the transaction and
    /// the special type announced by it, if any.
    fn split_version(&self, raw_version: i32) -> (i32, Option<u16>);

    /// Reads the payload of a `tx_type` transaction from the start of `rest`
    /// (the bytes following the lock time). Returns the payload and the
    /// number of bytes it occupied.
    fn parse_payload(&self, tx_type: u16, rest: &[u8]) -> Result<(Vec<u8>, usize)>;
}

/// Turns raw blocks and transactions into [`Tx`] entities.
#[derive(Clone)]
pub struct TxParser {
    resolver: AddressResolver,
    extra: Option<Arc<dyn ExtraPayloadParser>>,
}

impl TxParser {
    pub fn new(params: Arc<ParameterSet>, extra: Option<Arc<dyn ExtraPayloadParser>>) -> Self {
        Self {
            resolver: AddressResolver::new(params),
            extra,
        }
    }

    /// Parser for chains using version-word special transactions.
    pub fn with_special_txs(params: Arc<ParameterSet>) -> Self {
        Self::new(params, Some(Arc::new(SpecialTxPayload)))
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Parses exactly one serialized transaction. Time fields are left at
    /// zero since a loose transaction carries no block context.
    pub fn parse_tx(&self, raw: &[u8]) -> Result<Tx> {
        let (tx, consumed) = self.decode_tx(raw)?;
        if consumed != raw.len() {
            return Err(Error::ParseError(format!(
                "{} trailing bytes after transaction {}",
                raw.len() - consumed,
                tx.txid
            )));
        }
        Ok(tx)
    }

    pub fn parse_block(&self, raw: &[u8]) -> Result<Block> {
        let (header, mut offset) = deserialize_partial::<Header>(raw)?;
        let (count, read) = deserialize_partial::<VarInt>(&raw[offset..])?;
        offset += read;

        let time = i64::from(header.time);
        let mut txs = Vec::new();
        for _ in 0..count.0 {
            let (mut tx, read) = self.decode_tx(&raw[offset..])?;
            offset += read;
            tx.time = time;
            tx.block_time = time;
            txs.push(tx);
        }
        if offset != raw.len() {
            return Err(Error::ParseError(format!(
                "{} trailing bytes after block",
                raw.len() - offset
            )));
        }

        debug!("[parse_block] {} txs, {} bytes", txs.len(), raw.len());
        Ok(Block {
            prev_hash: header.prev_blockhash,
            time,
            size: raw.len(),
            txs,
        })
    }

    fn decode_tx(&self, raw: &[u8]) -> Result<(Tx, usize)> {
        let (tx, mut consumed) = deserialize_partial::<Transaction>(raw)?;

        let raw_version = tx.version.0;
        let (version, tx_type) = match &self.extra {
            Some(extra) => extra.split_version(raw_version),
            None => (raw_version, None),
        };
        let extra_payload = match (tx_type, &self.extra) {
            (Some(tx_type), Some(extra)) => {
                let (payload, read) = extra.parse_payload(tx_type, &raw[consumed..])?;
                consumed += read;
                Some(ExtraPayload { tx_type, payload })
            }
            _ => None,
        };

        let raw = &raw[..consumed];
        // the standard encoding does not cover the payload
        let txid = if extra_payload.is_some() {
            Txid::from_raw_hash(sha256d::Hash::hash(raw))
        } else {
            tx.compute_txid()
        };

        let tx = Tx {
            txid,
            version,
            lock_time: tx.lock_time.to_consensus_u32(),
            hex: raw.to_vec(),
            block_time: 0,
            time: 0,
            confirmations: 0,
            vin: tx.input.iter().map(to_vin).collect(),
            vout: tx
                .output
                .into_iter()
                .enumerate()
                .map(|(n, out)| Vout {
                    n: n as u32,
                    value: out.value,
                    addresses: self.resolver.addresses(&out.script_pubkey),
                    script_pubkey: out.script_pubkey,
                })
                .collect(),
            extra_payload,
        };
        Ok((tx, consumed))
    }
}

fn to_vin(input: &bitcoin::TxIn) -> Vin {
    let prev = &input.previous_output;
    if prev.vout == u32::MAX && prev.txid == Txid::all_zeros() {
        Vin::coinbase(input.script_sig.to_bytes(), input.sequence.0)
    } else {
        Vin::outpoint(
            prev.txid,
            prev.vout,
            input.script_sig.clone(),
            input.sequence.0,
        )
    }
}
