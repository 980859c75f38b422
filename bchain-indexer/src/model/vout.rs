use bitcoin::{Amount, ScriptBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vout {
    pub n: u32,
    pub value: Amount,
    pub script_pubkey: ScriptBuf,
    pub addresses: Vec<String>,
}
