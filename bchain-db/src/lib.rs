use std::{
    fmt::Debug,
    iter::Iterator,
    marker::PhantomData,
    path::Path,
    sync::Arc,
};

use anyhow::format_err;
use log::debug;
pub use rocksdb::{Direction, WriteBatch};
use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamily, ColumnFamilyDescriptor, DBCompressionType, DBIterator,
    IteratorMode, Options, DB,
};
use serde::{de::DeserializeOwned, Serialize};

pub type Result<T> = result::Result<T, DBError>;

fn get_db_default_options() -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_size(32 << 10); // kb
    block_opts.set_block_cache(&Cache::new_lru_cache(128 << 20)); // mb
    block_opts.set_cache_index_and_filter_blocks(true);
    block_opts.set_bloom_filter(10.0, true);

    let mut opts = Options::default();
    opts.create_if_missing(true);
    opts.create_missing_column_families(true);
    opts.set_write_buffer_size(64 << 20); // mb
    opts.set_max_write_buffer_number(2);
    opts.set_enable_pipelined_write(true);

    opts.set_compression_type(DBCompressionType::Lz4);
    opts.set_bottommost_compression_type(DBCompressionType::Zstd);
    opts.set_block_based_table_factory(&block_opts);
    let n = num_cpus::get();
    opts.increase_parallelism(n as i32);
    opts.set_level_compaction_dynamic_level_bytes(true);
    opts
}

#[derive(Debug)]
pub struct Rocks(DB);

impl Rocks {
    pub fn open(path: &Path, cf_names: &[&'static str]) -> Result<Self> {
        let cf_descriptors = cf_names
            .iter()
            .map(|cf_name| ColumnFamilyDescriptor::new(*cf_name, Options::default()));

        let db_opts = get_db_default_options();
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        Ok(Self(db))
    }

    pub fn compact(&self) {
        self.0.compact_range(None::<&[u8]>, None::<&[u8]>);
    }

    pub fn cf_handle(&self, cf: &str) -> Result<&ColumnFamily> {
        self.0
            .cf_handle(cf)
            .ok_or_else(|| DBError::Custom(format_err!("Unknown column: {}", cf)))
    }

    fn get_cf(&self, cf: &ColumnFamily, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let opt = self.0.get_cf(cf, key)?;
        Ok(opt)
    }

    fn put_cf(&self, cf: &ColumnFamily, key: &[u8], value: &[u8]) -> Result<()> {
        self.0.put_cf(cf, key, value)?;
        Ok(())
    }

    fn delete_cf(&self, cf: &ColumnFamily, key: &[u8]) -> Result<()> {
        self.0.delete_cf(cf, key)?;
        Ok(())
    }

    fn iterator_cf(&self, cf: &ColumnFamily, iterator_mode: IteratorMode) -> DBIterator {
        self.0.iterator_cf(cf, iterator_mode)
    }

    /// Applies every staged write atomically.
    pub fn write(&self, batch: WriteBatch) -> Result<()> {
        self.0.write(batch)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.0.flush()?;
        Ok(())
    }

    pub fn log_table_sizes(&self, cf_names: &[&'static str]) -> Result<()> {
        for cf_name in cf_names {
            let cf = self.cf_handle(cf_name)?;
            let size = self
                .0
                .property_int_value_cf(cf, "rocksdb.estimate-live-data-size")?
                .unwrap_or(0);
            let entries = self
                .0
                .property_int_value_cf(cf, "rocksdb.estimate-num-keys")?
                .unwrap_or(0);
            debug!(
                "{:<20} {:>10.2} MB {:>12} entries",
                cf_name,
                size as f64 / (1024.0 * 1024.0),
                entries
            );
        }
        Ok(())
    }
}

//
// ColumnName trait. Define associated column family NAME
//
pub trait ColumnName {
    const NAME: &'static str;
}

//
// Column trait. Define associated index type
//
pub trait Column {
    type Index: Debug + Serialize + DeserializeOwned;

    fn key(index: &Self::Index) -> Result<Vec<u8>> {
        bincode::serialize(index).map_err(DBError::Bincode)
    }

    fn get_key(raw_key: Box<[u8]>) -> Result<Self::Index> {
        bincode::deserialize(&raw_key).map_err(DBError::Bincode)
    }
}

//
// TypedColumn trait. Define associated value type
//
pub trait TypedColumn: Column {
    type Type: Serialize + DeserializeOwned + Debug;
}

#[derive(Debug, Clone)]
pub struct LedgerColumn<C>
where
    C: Column + ColumnName,
{
    pub backend: Arc<Rocks>,
    pub column: PhantomData<C>,
}

impl<C> LedgerColumn<C>
where
    C: Column + ColumnName,
{
    pub fn new(backend: Arc<Rocks>) -> Self {
        Self {
            backend,
            column: PhantomData,
        }
    }

    pub fn get_bytes(&self, key: &C::Index) -> Result<Option<Vec<u8>>> {
        self.backend.get_cf(self.handle()?, &C::key(key)?)
    }

    pub fn put_bytes(&self, key: &C::Index, value: &[u8]) -> Result<()> {
        self.backend.put_cf(self.handle()?, &C::key(key)?, value)
    }

    pub fn batch_put_bytes(&self, batch: &mut WriteBatch, key: &C::Index, value: &[u8]) -> Result<()> {
        batch.put_cf(self.handle()?, C::key(key)?, value);
        Ok(())
    }

    pub fn delete(&self, key: &C::Index) -> Result<()> {
        self.backend.delete_cf(self.handle()?, &C::key(key)?)
    }

    pub fn batch_delete(&self, batch: &mut WriteBatch, key: &C::Index) -> Result<()> {
        batch.delete_cf(self.handle()?, C::key(key)?);
        Ok(())
    }

    pub fn handle(&self) -> Result<&ColumnFamily> {
        self.backend.cf_handle(C::NAME)
    }
}

impl<C> LedgerColumn<C>
where
    C: TypedColumn + ColumnName,
{
    pub fn get(&self, key: &C::Index) -> Result<Option<C::Type>> {
        if let Some(serialized_value) = self.get_bytes(key)? {
            let value = bincode::deserialize(&serialized_value)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    pub fn put(&self, key: &C::Index, value: &C::Type) -> Result<()> {
        let serialized_value = bincode::serialize(value)?;
        self.put_bytes(key, &serialized_value)
    }

    pub fn batch_put(&self, batch: &mut WriteBatch, key: &C::Index, value: &C::Type) -> Result<()> {
        let serialized_value = bincode::serialize(value)?;
        self.batch_put_bytes(batch, key, &serialized_value)
    }

    pub fn iter(
        &self,
        from: Option<C::Index>,
        direction: Direction,
    ) -> Result<impl Iterator<Item = Result<(C::Index, C::Type)>> + '_> {
        let index = from
            .as_ref()
            .map(|i| C::key(i))
            .transpose()?
            .unwrap_or_default();

        let iterator_mode = match direction {
            Direction::Forward => from.map_or(IteratorMode::Start, |_| {
                IteratorMode::From(&index, Direction::Forward)
            }),
            Direction::Reverse => from.map_or(IteratorMode::End, |_| {
                IteratorMode::From(&index, Direction::Reverse)
            }),
        };
        Ok(self
            .backend
            .iterator_cf(self.handle()?, iterator_mode)
            .map(|k| {
                let (key, value) = k?;
                let value = bincode::deserialize(&value)?;
                let key = C::get_key(key)?;
                Ok((key, value))
            }))
    }
}

use std::{error::Error, fmt, result};

use bincode::Error as BincodeError;
use rocksdb::Error as RocksDBError;

#[derive(Debug)]
pub enum DBError {
    RocksDBError(RocksDBError),
    Bincode(BincodeError),
    WrongKeyLength { expected: usize, got: usize },
    Custom(anyhow::Error),
}

impl fmt::Display for DBError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DBError::RocksDBError(e) => write!(f, "RocksDB Error: {e}"),
            DBError::Bincode(e) => write!(f, "Bincode Error: {e}"),
            DBError::WrongKeyLength { expected, got } => {
                write!(f, "Wrong key length: expected {expected}, got {got}")
            }
            DBError::Custom(e) => write!(f, "Custom Error: {e}"),
        }
    }
}

impl Error for DBError {}

impl From<RocksDBError> for DBError {
    fn from(e: RocksDBError) -> Self {
        DBError::RocksDBError(e)
    }
}

impl From<BincodeError> for DBError {
    fn from(e: BincodeError) -> Self {
        DBError::Bincode(e)
    }
}

impl From<anyhow::Error> for DBError {
    fn from(e: anyhow::Error) -> Self {
        DBError::Custom(e)
    }
}
