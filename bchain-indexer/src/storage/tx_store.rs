use std::{fs, marker::PhantomData, path::Path, sync::Arc};

use bchain_db::{Column, ColumnName, LedgerColumn, Rocks, WriteBatch};
use bitcoin::Txid;

use super::columns::{PackedTx, COLUMN_NAMES};
use crate::Result;

/// Record store for packed transactions and their block placement.
#[derive(Debug, Clone)]
pub struct TxStore(Arc<Rocks>);

impl TxStore {
    pub fn new(path: &Path) -> Result<Self> {
        let path = path.join("index");
        fs::create_dir_all(&path)?;
        let backend = Arc::new(Rocks::open(&path, &COLUMN_NAMES)?);

        Ok(Self(backend))
    }

    pub fn column<C>(&self) -> LedgerColumn<C>
    where
        C: Column + ColumnName,
    {
        LedgerColumn {
            backend: Arc::clone(&self.0),
            column: PhantomData,
        }
    }

    pub fn put_packed(&self, txid: &Txid, record: &[u8]) -> Result<()> {
        Ok(self.column::<PackedTx>().put_bytes(txid, record)?)
    }

    pub fn get_packed(&self, txid: &Txid) -> Result<Option<Vec<u8>>> {
        Ok(self.column::<PackedTx>().get_bytes(txid)?)
    }

    pub fn delete(&self, txid: &Txid) -> Result<()> {
        Ok(self.column::<PackedTx>().delete(txid)?)
    }

    pub fn write(&self, batch: WriteBatch) -> Result<()> {
        Ok(self.0.write(batch)?)
    }

    pub fn flush(&self) -> Result<()> {
        Ok(self.0.flush()?)
    }

    pub fn log_sizes(&self) -> Result<()> {
        Ok(self.0.log_table_sizes(&COLUMN_NAMES)?)
    }
}
