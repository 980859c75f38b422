//! Protobuf layout of a stored transaction record. Tags are part of the
//! on-disk format: new fields get new tags, existing tags are never reused.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PackedTx {
    #[prost(bytes = "vec", tag = "1")]
    pub txid: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub hex: Vec<u8>,
    #[prost(int64, optional, tag = "3")]
    pub block_time: Option<i64>,
    #[prost(uint32, optional, tag = "4")]
    pub lock_time: Option<u32>,
    #[prost(uint32, optional, tag = "5")]
    pub height: Option<u32>,
    #[prost(message, repeated, tag = "6")]
    pub vin: Vec<PackedVin>,
    #[prost(message, repeated, tag = "7")]
    pub vout: Vec<PackedVout>,
    #[prost(int32, optional, tag = "8")]
    pub version: Option<i32>,
    /// Only written when it differs from the block time.
    #[prost(int64, optional, tag = "9")]
    pub time: Option<i64>,
    #[prost(message, optional, tag = "10")]
    pub extra: Option<PackedExtra>,
    /// The transaction's own block time, only written when it differs from
    /// the block time the record is indexed under.
    #[prost(int64, optional, tag = "11")]
    pub tx_block_time: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PackedVin {
    /// Hex text of the coinbase data, empty for outpoint inputs.
    #[prost(string, optional, tag = "1")]
    pub coinbase: Option<String>,
    #[prost(bytes = "vec", tag = "2")]
    pub txid: Vec<u8>,
    #[prost(uint32, optional, tag = "3")]
    pub vout: Option<u32>,
    #[prost(bytes = "vec", tag = "4")]
    pub script_sig: Vec<u8>,
    #[prost(uint32, optional, tag = "5")]
    pub sequence: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PackedVout {
    /// Big-endian with leading zeros stripped.
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
    #[prost(uint32, optional, tag = "2")]
    pub n: Option<u32>,
    #[prost(bytes = "vec", tag = "3")]
    pub script_pubkey: Vec<u8>,
    #[prost(string, repeated, tag = "4")]
    pub addresses: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PackedExtra {
    #[prost(uint32, tag = "1")]
    pub tx_type: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
}
