mod packed;

use std::sync::Arc;

use bitcoin::{hashes::Hash, Amount, ScriptBuf, Txid};
use log::trace;
use prost::Message;

pub use self::packed::{PackedExtra, PackedTx, PackedVin, PackedVout};
use crate::{
    address::AddressResolver,
    model::{ExtraPayload, Tx, Vin, VinSource, Vout},
    params::ParameterSet,
    Error, Result,
};

/// Converts transactions to and from their stored record form.
///
/// The codec holds no mutable state and can be shared freely between
/// indexing threads.
#[derive(Debug, Clone)]
pub struct TxCodec {
    resolver: AddressResolver,
}

impl TxCodec {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            resolver: AddressResolver::new(params),
        }
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Packs `tx` together with the height and time of the block holding it.
    /// Timestamps are stored as given, including values before the epoch.
    pub fn pack_tx(&self, tx: &Tx, height: u32, block_time: i64) -> Result<Vec<u8>> {
        if tx.hex.is_empty() {
            return Err(Error::InvalidField {
                field: "hex",
                msg: format!("{} has no raw transaction", tx.txid),
            });
        }
        if tx.vin.is_empty() {
            return Err(Error::InvalidField {
                field: "vin",
                msg: format!("{} has no inputs", tx.txid),
            });
        }

        let vin = tx.vin.iter().map(pack_vin).collect::<Result<Vec<_>>>()?;
        let vout = tx
            .vout
            .iter()
            .enumerate()
            .map(|(i, vout)| pack_vout(i, vout))
            .collect::<Result<Vec<_>>>()?;

        let packed = PackedTx {
            txid: hash_to_bytes(&tx.txid),
            hex: tx.hex.clone(),
            block_time: Some(block_time),
            lock_time: Some(tx.lock_time),
            height: Some(height),
            vin,
            vout,
            version: Some(tx.version),
            time: (tx.time != block_time).then_some(tx.time),
            extra: tx.extra_payload.as_ref().map(|extra| PackedExtra {
                tx_type: u32::from(extra.tx_type),
                payload: extra.payload.clone(),
            }),
            tx_block_time: (tx.block_time != block_time).then_some(tx.block_time),
        };

        Ok(packed.encode_to_vec())
    }

    /// Inverse of [`TxCodec::pack_tx`]. Returns the transaction and the height
    /// it was packed with; `confirmations` is always zero.
    pub fn unpack_tx(&self, buf: &[u8]) -> Result<(Tx, u32)> {
        let packed = PackedTx::decode(buf)?;

        let txid = bytes_to_txid(&packed.txid, "txid")?;
        if packed.hex.is_empty() {
            return Err(malformed(format!("{txid}: missing raw transaction")));
        }
        let block_time = packed
            .block_time
            .ok_or_else(|| malformed(format!("{txid}: missing block time")))?;
        let height = packed
            .height
            .ok_or_else(|| malformed(format!("{txid}: missing height")))?;
        let time = packed.time.unwrap_or(block_time);
        if packed.vin.is_empty() {
            return Err(malformed(format!("{txid}: no inputs")));
        }

        let vin = packed
            .vin
            .into_iter()
            .map(unpack_vin)
            .collect::<Result<Vec<_>>>()?;
        let vout = packed
            .vout
            .into_iter()
            .enumerate()
            .map(|(i, vout)| self.unpack_vout(i, vout))
            .collect::<Result<Vec<_>>>()?;
        let extra_payload = packed.extra.map(unpack_extra).transpose()?;

        trace!("[unpack_tx] {txid} at height {height}");
        let tx = Tx {
            txid,
            version: packed.version.unwrap_or_default(),
            lock_time: packed.lock_time.unwrap_or_default(),
            hex: packed.hex,
            block_time: packed.tx_block_time.unwrap_or(block_time),
            time,
            confirmations: 0,
            vin,
            vout,
            extra_payload,
        };
        Ok((tx, height))
    }

    fn unpack_vout(&self, position: usize, packed: PackedVout) -> Result<Vout> {
        let n = u32::try_from(position)
            .map_err(|_| malformed(format!("output position {position} out of range")))?;
        if let Some(stored) = packed.n {
            if stored != n {
                return Err(malformed(format!("output {n} stored with index {stored}")));
            }
        }

        let script_pubkey = ScriptBuf::from_bytes(packed.script_pubkey);
        let addresses = if packed.addresses.is_empty() {
            self.resolver.addresses(&script_pubkey)
        } else {
            packed.addresses
        };

        Ok(Vout {
            n,
            value: Amount::from_sat(value_from_bytes(&packed.value)?),
            script_pubkey,
            addresses,
        })
    }
}

fn malformed(msg: String) -> Error {
    Error::MalformedRecord(msg)
}

/// Hashes are stored in display order, the reverse of their internal order.
fn hash_to_bytes(txid: &Txid) -> Vec<u8> {
    let mut bytes = txid.to_byte_array();
    bytes.reverse();
    bytes.to_vec()
}

fn bytes_to_txid(bytes: &[u8], field: &str) -> Result<Txid> {
    let mut array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| malformed(format!("{field} is {} bytes, expected 32", bytes.len())))?;
    array.reverse();
    Ok(Txid::from_byte_array(array))
}

fn value_to_bytes(value: Amount) -> Vec<u8> {
    let bytes = value.to_sat().to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

fn value_from_bytes(bytes: &[u8]) -> Result<u64> {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.len() > 8 {
        return Err(malformed(format!(
            "value of {} bytes exceeds 64 bits",
            significant.len()
        )));
    }
    let mut buf = [0u8; 8];
    buf[8 - significant.len()..].copy_from_slice(significant);
    Ok(u64::from_be_bytes(buf))
}

fn pack_vin(vin: &Vin) -> Result<PackedVin> {
    let packed = match &vin.source {
        VinSource::Coinbase(data) => {
            if data.is_empty() {
                return Err(Error::InvalidField {
                    field: "coinbase",
                    msg: "empty coinbase data".to_string(),
                });
            }
            PackedVin {
                coinbase: Some(hex::encode(data)),
                txid: Vec::new(),
                vout: Some(0),
                script_sig: Vec::new(),
                sequence: Some(vin.sequence),
            }
        }
        VinSource::Outpoint {
            txid,
            vout,
            script_sig,
        } => PackedVin {
            coinbase: Some(String::new()),
            txid: hash_to_bytes(txid),
            vout: Some(*vout),
            script_sig: script_sig.to_bytes(),
            sequence: Some(vin.sequence),
        },
    };
    Ok(packed)
}

fn unpack_vin(packed: PackedVin) -> Result<Vin> {
    let coinbase = packed.coinbase.unwrap_or_default();
    let sequence = packed.sequence.unwrap_or_default();
    match (coinbase.is_empty(), packed.txid.is_empty()) {
        (false, true) => {
            let data = hex::decode(&coinbase)
                .map_err(|e| malformed(format!("coinbase data is not hex: {e}")))?;
            Ok(Vin::coinbase(data, sequence))
        }
        (true, false) => Ok(Vin::outpoint(
            bytes_to_txid(&packed.txid, "vin txid")?,
            packed.vout.unwrap_or_default(),
            ScriptBuf::from_bytes(packed.script_sig),
            sequence,
        )),
        (false, false) => Err(Error::UnsupportedShape(
            "input carries both coinbase data and an outpoint".to_string(),
        )),
        (true, true) => Err(Error::UnsupportedShape(
            "input carries neither coinbase data nor an outpoint".to_string(),
        )),
    }
}

fn pack_vout(position: usize, vout: &Vout) -> Result<PackedVout> {
    if vout.n as usize != position {
        return Err(Error::InvalidField {
            field: "vout.n",
            msg: format!("output at position {position} has index {}", vout.n),
        });
    }
    Ok(PackedVout {
        value: value_to_bytes(vout.value),
        n: Some(vout.n),
        script_pubkey: vout.script_pubkey.to_bytes(),
        addresses: vout.addresses.clone(),
    })
}

fn unpack_extra(packed: PackedExtra) -> Result<ExtraPayload> {
    let tx_type = u16::try_from(packed.tx_type)
        .map_err(|_| malformed(format!("tx type {} exceeds 16 bits", packed.tx_type)))?;
    Ok(ExtraPayload {
        tx_type,
        payload: packed.payload,
    })
}
