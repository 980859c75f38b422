use bitcoin::{ScriptBuf, Txid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VinSource {
    Coinbase(Vec<u8>),
    Outpoint {
        txid: Txid,
        vout: u32,
        script_sig: ScriptBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vin {
    pub source: VinSource,
    pub sequence: u32,
}

impl Vin {
    pub fn coinbase(data: Vec<u8>, sequence: u32) -> Self {
        Self {
            source: VinSource::Coinbase(data),
            sequence,
        }
    }

    pub fn outpoint(txid: Txid, vout: u32, script_sig: ScriptBuf, sequence: u32) -> Self {
        Self {
            source: VinSource::Outpoint {
                txid,
                vout,
                script_sig,
            },
            sequence,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        matches!(self.source, VinSource::Coinbase(_))
    }
}
