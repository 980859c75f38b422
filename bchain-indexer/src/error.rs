use bchain_db::DBError;
use anyhow::format_err;
use bitcoin::hex::HexToArrayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Indexer: malformed record: {0}")]
    MalformedRecord(String),
    #[error("Indexer: unsupported shape: {0}")]
    UnsupportedShape(String),
    #[error("Indexer: magic {magic:#010x} of {name} is already taken by {existing}")]
    RegistryConflict {
        magic: u32,
        name: String,
        existing: String,
    },
    #[error("Indexer: invalid field {field}: {msg}")]
    InvalidField { field: &'static str, msg: String },
    #[error("Indexer: chain parameters are not registered")]
    NotRegistered,
    #[error("Indexer: parse error: {0}")]
    ParseError(String),
    #[error("Indexer: HexToArrayError error: {0:?}")]
    HexToArrayError(#[from] HexToArrayError),
    #[error("Indexer: DBError error: {0:?}")]
    DBError(#[from] DBError),
    #[error("Indexer: IO error: {0:?}")]
    IOError(#[from] std::io::Error),
    #[error("Indexer: FromHexError error: {0:?}")]
    FromHexError(#[from] hex::FromHexError),
    #[error("Indexer: Consensus encode error: {0:?}")]
    ConsensusEncodeError(#[from] bitcoin::consensus::encode::Error),
    #[error("Indexer: jsonrpsee error: {0:?}")]
    JsonrpseeError(#[from] jsonrpsee::core::Error),
    #[error("Indexer: serde_json error: {0:?}")]
    SerdeJSONError(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<prost::DecodeError> for Error {
    fn from(err: prost::DecodeError) -> Error {
        Error::MalformedRecord(err.to_string())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(format_err!("{s}"))
    }
}
