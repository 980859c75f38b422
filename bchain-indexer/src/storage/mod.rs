pub mod columns;
mod tx_store;

pub use tx_store::TxStore;
