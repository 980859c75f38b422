use std::time::Instant;

use bchain_db::{Direction, WriteBatch};
use bitcoin::Txid;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    codec::TxCodec,
    model::{Block, BlockMeta, Tx},
    storage::{
        columns::{BlockByHeight, PackedTx, TxByHeight},
        TxStore,
    },
    Result,
};

fn log_elapsed(previous: Instant, msg: &str) {
    let now = Instant::now();
    debug!("{} in {} ms", msg, now.duration_since(previous).as_millis());
}

/// Writes decoded blocks to the record store and reads transactions back.
#[derive(Debug, Clone)]
pub struct BlockIndexer {
    store: TxStore,
    codec: TxCodec,
}

impl BlockIndexer {
    pub fn new(store: TxStore, codec: TxCodec) -> Self {
        Self { store, codec }
    }

    pub fn store(&self) -> &TxStore {
        &self.store
    }

    /// Packs every transaction of `block` in parallel and commits the block
    /// in a single write.
    pub fn index_block(&self, block: &Block, height: u32) -> Result<()> {
        debug!("[index_block] Indexing block {height}...");
        let start = Instant::now();

        let packed = block
            .txs
            .par_iter()
            .map(|tx| Ok((tx.txid, self.codec.pack_tx(tx, height, block.time)?)))
            .collect::<Result<Vec<_>>>()?;
        log_elapsed(start, "Packed txs");

        let packed_tx = self.store.column::<PackedTx>();
        let tx_by_height = self.store.column::<TxByHeight>();
        let mut batch = WriteBatch::default();
        for (position, (txid, record)) in packed.iter().enumerate() {
            packed_tx.batch_put_bytes(&mut batch, txid, record)?;
            tx_by_height.batch_put(&mut batch, &(height, position as u32), txid)?;
        }
        self.store
            .column::<BlockByHeight>()
            .batch_put(&mut batch, &height, &BlockMeta::from(block))?;
        self.store.write(batch)?;

        log_elapsed(start, &format!("Indexed block {height} with {} txs", packed.len()));
        Ok(())
    }

    /// Removes a block and its transactions, e.g. after a reorg.
    pub fn invalidate_block(&self, height: u32) -> Result<()> {
        let txids = self.txids_at_height(height)?;

        let packed_tx = self.store.column::<PackedTx>();
        let tx_by_height = self.store.column::<TxByHeight>();
        let mut batch = WriteBatch::default();
        for (position, txid) in txids.iter().enumerate() {
            packed_tx.batch_delete(&mut batch, txid)?;
            tx_by_height.batch_delete(&mut batch, &(height, position as u32))?;
        }
        self.store
            .column::<BlockByHeight>()
            .batch_delete(&mut batch, &height)?;
        self.store.write(batch)?;

        info!("Invalidated block {height} ({} txs)", txids.len());
        Ok(())
    }

    /// Decodes a stored transaction and fills in its confirmations relative to
    /// `best_height`.
    pub fn get_tx(&self, txid: &Txid, best_height: u32) -> Result<Option<(Tx, u32)>> {
        let Some(record) = self.store.get_packed(txid)? else {
            return Ok(None);
        };
        let (tx, height) = self.codec.unpack_tx(&record)?;
        Ok(Some((tx.with_confirmations(best_height, height), height)))
    }

    pub fn txids_at_height(&self, height: u32) -> Result<Vec<Txid>> {
        let mut txids = Vec::new();
        for item in self
            .store
            .column::<TxByHeight>()
            .iter(Some((height, 0)), Direction::Forward)?
        {
            let ((h, _), txid) = item?;
            if h != height {
                break;
            }
            txids.push(txid);
        }
        Ok(txids)
    }

    pub fn get_block_meta(&self, height: u32) -> Result<Option<BlockMeta>> {
        Ok(self.store.column::<BlockByHeight>().get(&height)?)
    }

    pub fn highest_height(&self) -> Result<Option<u32>> {
        let highest = self
            .store
            .column::<BlockByHeight>()
            .iter(None, Direction::Reverse)?
            .next()
            .transpose()?;
        Ok(highest.map(|(height, _)| height))
    }
}
