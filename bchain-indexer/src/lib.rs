pub mod address;
pub mod codec;
pub mod config;
pub mod error;
pub mod indexer;
pub mod model;
pub mod network;
pub mod params;
pub mod parser;
pub mod rpc;
pub mod storage;

pub use address::AddressResolver;
pub use codec::TxCodec;
pub use error::Error;
pub use indexer::BlockIndexer;
pub use model::{Block, ExtraPayload, Tx, Vin, VinSource, Vout};
pub use params::{ParameterSet, Registry};
pub use parser::{ExtraPayloadParser, SpecialTxPayload, TxParser};

pub type Result<T> = std::result::Result<T, Error>;
