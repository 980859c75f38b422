use std::str::FromStr;

use bchain_payload::COIN;
use bitcoin::{Amount, ScriptBuf, Txid};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Deserialize;

use super::TxParser;
use crate::{
    model::{ExtraPayload, Tx, Vin, Vout},
    Error, Result,
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonTx {
    hex: String,
    txid: String,
    version: i32,
    #[serde(default, rename = "type")]
    tx_type: u16,
    locktime: u32,
    vin: Vec<JsonVin>,
    vout: Vec<JsonVout>,
    extra_payload: Option<String>,
    #[serde(default)]
    time: i64,
    #[serde(default)]
    blocktime: i64,
    #[serde(default)]
    confirmations: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonVin {
    coinbase: Option<String>,
    txid: Option<String>,
    vout: Option<u32>,
    script_sig: Option<JsonScript>,
    sequence: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonVout {
    value: Option<Decimal>,
    value_sat: Option<u64>,
    n: u32,
    script_pub_key: JsonScript,
}

#[derive(Deserialize, Debug)]
struct JsonScript {
    hex: String,
    #[serde(default)]
    addresses: Vec<String>,
}

impl TxParser {
    /// Builds a transaction from verbose `getrawtransaction` output.
    pub fn parse_tx_from_json(&self, msg: &[u8]) -> Result<Tx> {
        let json: JsonTx = serde_json::from_slice(msg)?;

        let vin = json
            .vin
            .into_iter()
            .map(json_vin)
            .collect::<Result<Vec<_>>>()?;

        let mut vout = Vec::with_capacity(json.vout.len());
        for (position, out) in json.vout.into_iter().enumerate() {
            if out.n as usize != position {
                return Err(Error::ParseError(format!(
                    "output {position} reports index {}",
                    out.n
                )));
            }
            let value = match (out.value_sat, out.value) {
                (Some(sat), _) => sat,
                (None, Some(coins)) => (coins * Decimal::from(COIN))
                    .round()
                    .to_u64()
                    .ok_or_else(|| Error::ParseError(format!("invalid value {coins}")))?,
                (None, None) => {
                    return Err(Error::ParseError(format!("output {position} has no value")))
                }
            };
            let script_pubkey = ScriptBuf::from_bytes(hex::decode(&out.script_pub_key.hex)?);
            let addresses = if out.script_pub_key.addresses.is_empty() {
                self.resolver.addresses(&script_pubkey)
            } else {
                out.script_pub_key.addresses
            };
            vout.push(Vout {
                n: out.n,
                value: Amount::from_sat(value),
                script_pubkey,
                addresses,
            });
        }

        let extra_payload = match (json.tx_type, json.extra_payload) {
            (0, _) => None,
            (tx_type, payload) => Some(ExtraPayload {
                tx_type,
                payload: payload.map(hex::decode).transpose()?.unwrap_or_default(),
            }),
        };

        Ok(Tx {
            txid: Txid::from_str(&json.txid)?,
            version: json.version,
            lock_time: json.locktime,
            hex: hex::decode(&json.hex)?,
            block_time: json.blocktime,
            time: json.time,
            confirmations: json.confirmations,
            vin,
            vout,
            extra_payload,
        })
    }
}

fn json_vin(vin: JsonVin) -> Result<Vin> {
    match (vin.coinbase, vin.txid) {
        (Some(coinbase), None) => Ok(Vin::coinbase(hex::decode(coinbase)?, vin.sequence)),
        (None, Some(txid)) => {
            let script_sig = match vin.script_sig {
                Some(script) => ScriptBuf::from_bytes(hex::decode(script.hex)?),
                None => ScriptBuf::new(),
            };
            Ok(Vin::outpoint(
                Txid::from_str(&txid)?,
                vin.vout.unwrap_or_default(),
                script_sig,
                vin.sequence,
            ))
        }
        _ => Err(Error::UnsupportedShape(
            "input must carry either coinbase data or an outpoint".to_string(),
        )),
    }
}
