use std::sync::Arc;

use bitcoin::{
    base58,
    hashes::{hash160, Hash},
    Script,
};

use crate::params::ParameterSet;

/// Derives base58check addresses from locking scripts.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    params: Arc<ParameterSet>,
}

impl AddressResolver {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Arc<ParameterSet> {
        &self.params
    }

    /// Scripts without a single-key or script-hash address (null data, bare
    /// multisig, witness programs) resolve to no addresses.
    pub fn addresses(&self, script: &Script) -> Vec<String> {
        let bytes = script.as_bytes();
        if script.is_p2pkh() {
            vec![self.encode(&self.params.pubkey_hash_addr_id, &bytes[3..23])]
        } else if script.is_p2sh() {
            vec![self.encode(&self.params.script_hash_addr_id, &bytes[2..22])]
        } else if script.is_p2pk() {
            // push opcode equals the key length for both key forms
            let key = &bytes[1..1 + bytes[0] as usize];
            let hash = hash160::Hash::hash(key);
            vec![self.encode(&self.params.pubkey_hash_addr_id, hash.as_byte_array())]
        } else {
            Vec::new()
        }
    }

    fn encode(&self, version: &[u8], hash: &[u8]) -> String {
        let mut data = Vec::with_capacity(version.len() + hash.len());
        data.extend_from_slice(version);
        data.extend_from_slice(hash);
        base58::encode_check(&data)
    }
}
