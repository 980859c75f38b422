use bchain_db::{Column, ColumnName, DBError, TypedColumn};
use bitcoin::{hashes::Hash, Txid};

use crate::model::BlockMeta;

pub const COLUMN_NAMES: [&str; 3] = [PackedTx::NAME, TxByHeight::NAME, BlockByHeight::NAME];

fn fixed<const N: usize>(raw_key: &[u8]) -> Result<[u8; N], DBError> {
    raw_key.try_into().map_err(|_| DBError::WrongKeyLength {
        expected: N,
        got: raw_key.len(),
    })
}

/// Packed transaction records by txid. Values are raw record bytes.
#[derive(Debug)]
pub struct PackedTx;

impl ColumnName for PackedTx {
    const NAME: &'static str = "packed_tx";
}

impl Column for PackedTx {
    type Index = Txid;

    fn key(index: &Self::Index) -> Result<Vec<u8>, DBError> {
        Ok(index.to_byte_array().to_vec())
    }

    fn get_key(raw_key: Box<[u8]>) -> Result<Self::Index, DBError> {
        Ok(Txid::from_byte_array(fixed::<32>(&raw_key)?))
    }
}

/// Block order of transactions, keyed by height then position.
#[derive(Debug)]
pub struct TxByHeight;

impl ColumnName for TxByHeight {
    const NAME: &'static str = "tx_by_height";
}

impl Column for TxByHeight {
    type Index = (u32, u32);

    fn key((height, position): &Self::Index) -> Result<Vec<u8>, DBError> {
        let mut key = Vec::with_capacity(8);
        key.extend_from_slice(&height.to_be_bytes());
        key.extend_from_slice(&position.to_be_bytes());
        Ok(key)
    }

    fn get_key(raw_key: Box<[u8]>) -> Result<Self::Index, DBError> {
        let key = fixed::<8>(&raw_key)?;
        let (height, position) = key.split_at(4);
        Ok((
            u32::from_be_bytes(fixed::<4>(height)?),
            u32::from_be_bytes(fixed::<4>(position)?),
        ))
    }
}

impl TypedColumn for TxByHeight {
    type Type = Txid;
}

#[derive(Debug)]
pub struct BlockByHeight;

impl ColumnName for BlockByHeight {
    const NAME: &'static str = "block_by_height";
}

impl Column for BlockByHeight {
    type Index = u32;

    fn key(index: &Self::Index) -> Result<Vec<u8>, DBError> {
        Ok(index.to_be_bytes().to_vec())
    }

    fn get_key(raw_key: Box<[u8]>) -> Result<Self::Index, DBError> {
        Ok(u32::from_be_bytes(fixed::<4>(&raw_key)?))
    }
}

impl TypedColumn for BlockByHeight {
    type Type = BlockMeta;
}
